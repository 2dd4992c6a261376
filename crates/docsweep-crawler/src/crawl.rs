use anyhow::Result;

use crate::classify::{Link, LinkClassifier};
use crate::config::{CrawlerConfig, OnError};
use crate::download;
use crate::extract;
use crate::fetch::Fetch;
use crate::frontier::Frontier;
use crate::journal::Journal;
use crate::resolve::resolve;
use crate::throttle;

/// Terminal accounting for one crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Distinct pages ever scheduled, the starting one included.
    pub pages: usize,
    /// Caught document URLs, in discovery order.
    pub documents: Vec<String>,
}

/// Explores a website breadth-first from `start_url` and catches the
/// documents whose URL matches the configured accept pattern.
///
/// Caught documents are printed to stdout as they are found, or downloaded
/// into the current directory when `conf.download` is set. Fetch failures
/// are journaled and skipped unless `conf.on_fetch_error` says otherwise;
/// the crawl stops when the frontier is exhausted, or after the starting
/// page in single-page mode.
pub async fn crawl_site<F, J>(
    conf: &CrawlerConfig,
    start_url: &str,
    fetcher: &F,
    journal: &J,
) -> Result<CrawlReport>
where
    F: Fetch,
    J: Journal,
{
    let classifier = LinkClassifier::new(start_url, &conf.accept, &conf.reject)?;
    let mut frontier = Frontier::seeded(start_url);
    let mut documents = Vec::new();

    while let Some(page_url) = frontier.next() {
        if let Some(throttle) = &conf.throttle {
            throttle::pause(throttle).await;
        }
        journal.info(&format!("tries page {page_url}"));

        match fetcher.fetch_page(&page_url).await {
            Ok(page) if page.is_explorable() => {
                for raw in extract::links(&page.body) {
                    let abs = match resolve(&page_url, raw) {
                        Ok(abs) => abs,
                        Err(e) => {
                            log::debug!("Unresolvable reference {raw:?} on {page_url}: {e}");
                            continue;
                        }
                    };
                    match classifier.classify(&abs) {
                        Link::Document => {
                            if frontier.mark_caught(&abs) {
                                journal.info(&format!("caught doc {abs}"));
                                handle_document(conf, fetcher, journal, &abs).await?;
                                documents.push(abs);
                            }
                        }
                        Link::Page => {
                            if frontier.enqueue(&abs) {
                                journal.info(&format!("will explore {abs}"));
                            }
                        }
                        Link::Ignored => {
                            if frontier.mark_ignored(&abs) {
                                journal.debug(&format!("regurgited link {abs}"));
                            }
                        }
                    }
                }
            }
            // fetched but not markup text, counted as visited and left unexplored
            Ok(_) => (),
            Err(e) => {
                journal.error(&format!("{page_url}: {e}"));
                match conf.on_fetch_error {
                    OnError::SkipAndLog => log::error!("Skipping page {page_url}: {e}"),
                    OnError::Fail => return Err(e),
                }
            }
        }

        if conf.single_page {
            break;
        }
    }

    journal.info(&format!(
        "found {} pages, {} doc(s)",
        frontier.pages_seen(),
        frontier.docs_caught()
    ));

    Ok(CrawlReport {
        pages: frontier.pages_seen(),
        documents,
    })
}

async fn handle_document<F, J>(
    conf: &CrawlerConfig,
    fetcher: &F,
    journal: &J,
    url: &str,
) -> Result<()>
where
    F: Fetch,
    J: Journal,
{
    if !conf.download {
        println!("{url}");
        return Ok(());
    }

    let dest_dir = std::env::current_dir()?;
    match download::download_file(fetcher, url, &dest_dir).await {
        Ok(_) => Ok(()),
        Err(e) => {
            journal.error(&format!("{url}: {e}"));
            match conf.on_fetch_error {
                OnError::SkipAndLog => {
                    log::error!("Skipping document {url}: {e}");
                    Ok(())
                }
                OnError::Fail => Err(e),
            }
        }
    }
}
