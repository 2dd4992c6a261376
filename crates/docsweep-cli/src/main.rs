use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use docsweep_crawler::{
    crawl_site, download_file, download_list, pause, CrawlerConfig, FileJournal, HttpClient,
    OnError, Silent, Throttle,
};
use tokio::runtime;

/// Breadth-first document crawler
///
/// Explores a website from a starting URL and catches the documents whose
/// URL matches a wanted-extension pattern, printing or downloading them.
/// Can also directly download one file, or every URL listed in a file.
#[derive(Debug, Parser)]
#[command(version, group = clap::ArgGroup::new("mode").required(true))]
pub struct Args {
    /// Page URL the crawl starts from
    #[arg(group = "mode", value_name = "URL")]
    pub url: Option<String>,
    /// Regex of document URLs worth catching
    #[arg(long, value_name = "REGEX")]
    pub accept: Option<String>,
    /// Regex of binary/media URLs never worth exploring
    #[arg(long, value_name = "REGEX")]
    pub reject: Option<String>,
    /// Download caught documents instead of printing their URL
    #[arg(long)]
    pub download: bool,
    /// Stop after the starting page, without following discovered pages
    #[arg(long)]
    pub single_page: bool,
    /// Write a timestamped journal of the run in the current directory
    #[arg(long, short)]
    pub verbose: bool,
    /// Longest pause in seconds before each request, 0 to disable pacing
    #[arg(long, value_name = "SECONDS")]
    pub wait: Option<f32>,
    /// Pause exactly --wait seconds instead of a random 1 to --wait
    #[arg(long)]
    pub no_random_wait: bool,
    /// Download one file and exit
    #[arg(long, group = "mode", value_name = "URL")]
    pub download_file: Option<String>,
    /// Download every URL listed in a file, one per line
    #[arg(long, group = "mode", value_name = "FILE")]
    pub download_files: Option<PathBuf>,
    /// Optional default crawler yaml configuration file
    #[arg(env = "DOCSWEEP_CONFIG", long, value_name = "FILE")]
    pub crawler_config: Option<PathBuf>,
    /// Override the crawler user agent
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Override the fetch error handling strategy
    #[arg(value_enum, long)]
    pub on_fetch_error: Option<OnError>,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

impl TryFrom<&Args> for CrawlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut conf: CrawlerConfig =
            if let Some(file) = args.crawler_config.as_ref().map(File::open) {
                serde_yaml::from_reader(file?)?
            } else {
                CrawlerConfig::default()
            };
        if let Some(accept) = &args.accept {
            conf.accept = accept.to_string();
        }
        if let Some(reject) = &args.reject {
            conf.reject = reject.to_string();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = user_agent.to_string();
        }
        if let Some(on_fetch_error) = args.on_fetch_error {
            conf.on_fetch_error = on_fetch_error;
        }
        if args.download {
            conf.download = true;
        }
        if args.single_page {
            conf.single_page = true;
        }
        match (args.wait, args.no_random_wait) {
            (Some(_), _) => conf.throttle = throttle_for(args.wait, args.no_random_wait),
            (None, true) => {
                if let Some(Throttle::RandomDelay(secs)) = conf.throttle {
                    conf.throttle = Some(Throttle::Delay(secs));
                }
            }
            (None, false) => (),
        }
        Ok(conf)
    }
}

fn throttle_for(wait: Option<f32>, no_random_wait: bool) -> Option<Throttle> {
    match wait {
        Some(secs) if secs <= 0.0 => None,
        Some(secs) if no_random_wait => Some(Throttle::Delay(secs)),
        Some(secs) => Some(Throttle::RandomDelay(secs)),
        None => None,
    }
}

/// Direct download modes pace themselves by default; `--wait=0` disables it.
fn download_throttle(args: &Args) -> Option<Throttle> {
    throttle_for(args.wait.or(Some(5.0)), args.no_random_wait)
}

fn user_agent(args: &Args) -> String {
    args.user_agent
        .clone()
        .unwrap_or_else(|| CrawlerConfig::default().user_agent)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        env::set_var("RUST_LOG", "docsweep_crawler=warn,docsweep=warn");
        env_logger::init();
    }

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;

    if let Some(url) = &args.download_file {
        let client = HttpClient::new(user_agent(&args));
        let throttle = download_throttle(&args);
        rt.block_on(async {
            if let Some(throttle) = &throttle {
                pause(throttle).await;
            }
            download_file(&client, url, Path::new(".")).await
        })?;
        Ok(())
    } else if let Some(list) = &args.download_files {
        let client = HttpClient::new(user_agent(&args));
        let throttle = download_throttle(&args);
        rt.block_on(download_list(&client, list, Path::new("."), throttle.as_ref()))?;
        Ok(())
    } else if let Some(url) = &args.url {
        let conf: CrawlerConfig = (&args).try_into()?;
        let client = HttpClient::new(conf.user_agent.clone());
        if args.verbose {
            let journal = FileJournal::create_in(Path::new("."))?;
            rt.block_on(crawl_site(&conf, url, &client, &journal))?;
        } else {
            rt.block_on(crawl_site(&conf, url, &client, &Silent))?;
        }
        Ok(())
    } else {
        anyhow::bail!("Missing URL or file argument")
    }
}
