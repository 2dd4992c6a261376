use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use futures::{Stream, TryStreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

lazy_static! {
    static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .unwrap();
    static ref EXPLORABLE_RE: Regex = Regex::new("(?i)text/(html|css)").unwrap();
}

/// One retrieved page, before any link extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// Whether the response is markup text worth running extraction on.
    /// Non-markup payloads are counted as visited but never explored.
    pub fn is_explorable(&self) -> bool {
        (200..300).contains(&self.status)
            && self
                .content_type
                .as_deref()
                .map_or(false, |ct| EXPLORABLE_RE.is_match(ct))
    }
}

pub type PageFuture<'a> = Pin<Box<dyn Future<Output = Result<FetchedPage>> + 'a>>;
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>>> + Send>>;
pub type StreamFuture<'a> = Pin<Box<dyn Future<Output = Result<ByteStream>> + 'a>>;

/// Injected HTTP transport. Every returned error is a network-level failure
/// the caller may recover from; response handling stays on the caller side.
pub trait Fetch {
    /// Retrieves a page's body along with its status and content type.
    fn fetch_page<'a>(&'a self, url: &'a str) -> PageFuture<'a>;

    /// Opens the response body as a byte stream, for downloads.
    fn fetch_stream<'a>(&'a self, url: &'a str) -> StreamFuture<'a>;
}

/// The reqwest-backed transport used outside of tests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        Ok(HTTP_CLI
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?)
    }
}

impl Fetch for HttpClient {
    fn fetch_page<'a>(&'a self, url: &'a str) -> PageFuture<'a> {
        Box::pin(async move {
            let resp = self.get(url).await?;
            let status = resp.status().as_u16();
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|ct| ct.to_str().ok())
                .map(|ct| ct.to_string());
            let body = resp.text().await?;
            Ok(FetchedPage {
                url: url.to_string(),
                status,
                content_type,
                body,
            })
        })
    }

    fn fetch_stream<'a>(&'a self, url: &'a str) -> StreamFuture<'a> {
        Box::pin(async move {
            let resp = self.get(url).await?.error_for_status()?;
            let stream = resp
                .bytes_stream()
                .map_ok(|chunk| chunk.to_vec())
                .map_err(anyhow::Error::from);
            Ok(Box::pin(stream) as ByteStream)
        })
    }
}
