use std::collections::HashMap;
use std::sync::Mutex;

use docsweep_crawler::anyhow::anyhow;
use docsweep_crawler::{ByteStream, Fetch, FetchedPage, PageFuture, StreamFuture};
use futures::stream;

/// In-memory transport serving a canned set of responses; anything else
/// fails like a refused connection.
#[derive(Debug, Default)]
pub struct StubFetch {
    responses: HashMap<String, FetchedPage>,
    fetched: Mutex<Vec<String>>,
}

impl StubFetch {
    pub fn html(self, url: &str, body: &str) -> Self {
        self.response(url, 200, Some("text/html"), body)
    }

    pub fn response(
        mut self,
        url: &str,
        status: u16,
        content_type: Option<&str>,
        body: &str,
    ) -> Self {
        self.responses.insert(
            url.to_string(),
            FetchedPage {
                url: url.to_string(),
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_string(),
            },
        );
        self
    }

    /// URLs given to `fetch_page`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Fetch for StubFetch {
    fn fetch_page<'a>(&'a self, url: &'a str) -> PageFuture<'a> {
        self.fetched.lock().unwrap().push(url.to_string());
        let response = self.responses.get(url).cloned();
        Box::pin(async move { response.ok_or_else(|| anyhow!("connection refused: {url}")) })
    }

    fn fetch_stream<'a>(&'a self, url: &'a str) -> StreamFuture<'a> {
        let body = self.responses.get(url).map(|page| page.body.clone());
        Box::pin(async move {
            let body = body.ok_or_else(|| anyhow!("connection refused: {url}"))?;
            let chunks = vec![Ok(body.into_bytes())];
            Ok(Box::pin(stream::iter(chunks)) as ByteStream)
        })
    }
}
