use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::api::modrinth::ModrinthClient;
use crate::utils;

/// Downloads each URL in order into `output_dir`, named after the URL's last
/// path segment.
///
/// Files sharing a last segment overwrite each other. The first failed
/// download aborts the rest; files written before it stay on disk.
pub async fn download_all<I, S>(
    client: &ModrinthClient,
    urls: I,
    output_dir: &Path,
    progress: &ProgressBar,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    utils::ensure_dir_exists(output_dir)?;

    let mut written = Vec::new();
    for url in urls {
        let url = url.as_ref();
        let file_name = utils::file_name_from_url(url)?;
        let target_path = output_dir.join(&file_name);

        progress.set_message(format!("Downloading {}", file_name));
        let data = client.download_file(url).await?;

        let mut file_handle = File::create(&target_path)
            .with_context(|| format!("Failed to create file: {}", target_path.display()))?;
        file_handle
            .write_all(&data)
            .with_context(|| format!("Failed to write mod data to {}", target_path.display()))?;

        info!("Downloaded {} as {}", url, target_path.display());
        progress.inc(1);
        written.push(target_path);
    }

    Ok(written)
}
