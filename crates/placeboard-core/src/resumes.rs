//! Resume download and viewing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::ApiClient;
use crate::config::paths;

/// Local file name for a backend file path ("2024/alice.pdf" -> "2024_alice.pdf").
///
/// # Errors
/// Returns an error if the path has no segment left after dropping `.` and `..`.
pub fn local_file_name(filepath: &str) -> Result<String> {
    let name = filepath
        .split('/')
        .filter(|s| !matches!(*s, "" | "." | ".."))
        .collect::<Vec<_>>()
        .join("_");
    if name.is_empty() {
        anyhow::bail!("Invalid resume path: {filepath:?}");
    }
    Ok(name)
}

/// Downloads a resume into `dir` and returns the written path.
///
/// # Errors
/// Returns an error if the path is unusable, or the download or the write fails.
pub async fn download_to(client: &ApiClient, filepath: &str, dir: &Path) -> Result<PathBuf> {
    let file_name = local_file_name(filepath)?;
    let bytes = client
        .download_resume(filepath)
        .await
        .with_context(|| format!("Failed to download resume {filepath}"))?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let target = dir.join(file_name);
    tokio::fs::write(&target, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    debug!(path = %target.display(), bytes = bytes.len(), "Saved resume");
    Ok(target)
}

/// Downloads a resume into the downloads directory and opens it with the
/// system viewer.
///
/// # Errors
/// Returns an error if the download fails or no viewer could be launched.
pub async fn open_resume(client: &ApiClient, filepath: &str) -> Result<PathBuf> {
    let target = download_to(client, filepath, &paths::downloads_dir()).await?;
    open::that_detached(&target)
        .with_context(|| format!("Failed to open {}", target.display()))?;
    Ok(target)
}
