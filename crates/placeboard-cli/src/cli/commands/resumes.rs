//! `placeboard resumes list|open|download`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use placeboard_core::api::ApiClient;
use placeboard_core::card::verified_label;
use placeboard_core::config::{Config, paths};
use placeboard_core::resumes;
use placeboard_types::Resume;

use super::table;

pub async fn list(config: &Config) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let resumes = client.resumes().await.context("list resumes")?;
    print!("{}", render(&resumes));
    Ok(())
}

pub async fn open(config: &Config, filepath: &str) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let path = resumes::open_resume(&client, filepath).await?;
    println!("Opened {}", path.display());
    Ok(())
}

pub async fn download(config: &Config, filepath: &str, dir: Option<PathBuf>) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let dir = dir.unwrap_or_else(paths::downloads_dir);
    let path = resumes::download_to(&client, filepath, &dir).await?;
    println!("Saved {}", path.display());
    Ok(())
}

pub(crate) fn render(resumes: &[Resume]) -> String {
    if resumes.is_empty() {
        return "No resumes uploaded\n".to_string();
    }
    let rows = resumes.iter().map(|r| {
        vec![
            r.id.clone(),
            r.name.clone(),
            verified_label(r.verified).to_string(),
            r.filepath.clone(),
        ]
    });
    format!("{}\n", table(&["ID", "Name", "Status", "File"], rows))
}
