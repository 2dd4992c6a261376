mod classify;
mod config;
mod crawl;
mod download;
mod extract;
mod fetch;
mod frontier;
mod journal;
mod resolve;
mod throttle;

pub use classify::{Link, LinkClassifier};
pub use config::{CrawlerConfig, OnError, Throttle, DEFAULT_ACCEPT, DEFAULT_REJECT};
pub use crawl::{crawl_site, CrawlReport};
pub use download::{download_file, download_list};
pub use extract::links;
pub use fetch::{ByteStream, Fetch, FetchedPage, HttpClient, PageFuture, StreamFuture};
pub use frontier::Frontier;
pub use journal::{FileJournal, Journal, Silent};
pub use resolve::resolve;
pub use throttle::pause;

pub use anyhow;
