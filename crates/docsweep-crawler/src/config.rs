use serde::{Deserialize, Serialize};

/// Default regex of document extensions worth catching.
pub const DEFAULT_ACCEPT: &str =
    r"\.(pdf|docx?|xlsx?|pptx?|o(d|t)[cgmpst]|csv|rtf|zip|rar|t?gz|xz)$";

/// Default regex of binary/media extensions never worth exploring.
pub const DEFAULT_REJECT: &str =
    r"\.?(jpe?g|png|gif|ico|bmp|swf|flv|mpe?.|h26.|avi|m.v|flac|zip|rar|t?gz|xz|js)$";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Case-insensitive regex of document URLs to catch.
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Case-insensitive regex of binary/media URLs to skip.
    #[serde(default = "default_reject")]
    pub reject: String,

    /// Download caught documents instead of printing their URL.
    #[serde(default)]
    pub download: bool,

    /// Stop after the starting page, keeping discovered pages unvisited.
    #[serde(default)]
    pub single_page: bool,

    #[serde(default = "default_throttle")]
    pub throttle: Option<Throttle>,

    #[serde(default = "default_on_fetch_error")]
    pub on_fetch_error: OnError,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            reject: default_reject(),
            download: false,
            single_page: false,
            throttle: default_throttle(),
            on_fetch_error: default_on_fetch_error(),
        }
    }
}

fn default_user_agent() -> String {
    String::from("docsweep")
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

fn default_reject() -> String {
    DEFAULT_REJECT.to_string()
}

fn default_throttle() -> Option<Throttle> {
    None
}

fn default_on_fetch_error() -> OnError {
    OnError::SkipAndLog
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OnError {
    Fail,
    SkipAndLog,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Throttle {
    /// Fixed delay in seconds before each request
    Delay(f32),
    /// Random delay between 1 second and the given number of seconds
    RandomDelay(f32),
}

impl Default for Throttle {
    fn default() -> Self {
        Self::RandomDelay(5.0)
    }
}
