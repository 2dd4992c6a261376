use std::path::Path;

use anyhow::{anyhow, Result};
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::Throttle;
use crate::fetch::Fetch;
use crate::throttle;

/// Streams `url` into a file named after its last path segment, inside
/// `dest_dir`. An existing file with that name is overwritten. Returns the
/// number of bytes written.
pub async fn download_file<F: Fetch>(fetcher: &F, url: &str, dest_dir: &Path) -> Result<u64> {
    let name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("No file name in URL: {url}"))?;

    let mut stream = fetcher.fetch_stream(url).await?;
    let mut file = File::create(dest_dir.join(name)).await?;
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

/// Downloads every URL listed in `list_path`, one per line, blank lines
/// skipped. A failing line is logged and does not stop the rest of the
/// batch. Returns `(downloaded, attempted)`.
pub async fn download_list<F: Fetch>(
    fetcher: &F,
    list_path: &Path,
    dest_dir: &Path,
    throttle: Option<&Throttle>,
) -> Result<(usize, usize)> {
    let lines = std::fs::read_to_string(list_path)?;
    let mut attempted = 0;
    let mut downloaded = 0;

    for line in lines.lines() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        attempted += 1;
        println!("download {attempted} - {url}");

        if let Some(throttle) = throttle {
            throttle::pause(throttle).await;
        }
        match download_file(fetcher, url, dest_dir).await {
            Ok(_) => downloaded += 1,
            Err(e) => log::error!("Skipping {url}: {e}"),
        }
    }

    println!("downloaded {downloaded} / {attempted}");
    Ok((downloaded, attempted))
}
