//! Configuration management for placeboard.
//!
//! Loads configuration from ${PLACEBOARD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::stats::ViewMode;

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "PLACEBOARD_BACKEND_URL";

/// Environment variable that overrides `api_token`.
pub const API_TOKEN_ENV: &str = "PLACEBOARD_API_TOKEN";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for placeboard configuration and data directories.
    //!
    //! PLACEBOARD_HOME resolution order:
    //! 1. PLACEBOARD_HOME environment variable (if set)
    //! 2. ~/.config/placeboard (default)

    use std::path::PathBuf;

    /// Returns the placeboard home directory.
    pub fn placeboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("PLACEBOARD_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".placeboard"),
            |h| h.join(".config").join("placeboard"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        placeboard_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        placeboard_home().join("logs")
    }

    /// Returns the directory downloaded resumes are stored in.
    pub fn downloads_dir() -> PathBuf {
        placeboard_home().join("downloads")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the placement backend
    pub backend_url: String,

    /// Optional bearer token passed through to the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Initial chart/table mode for dimension statistics
    pub default_view: ViewMode,

    /// Number of past years shown in the season picker
    pub year_span: u32,
}

impl Config {
    pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
    const DEFAULT_YEAR_SPAN: u32 = 5;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the backend base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the resolved URL is not a valid http(s) URL.
    pub fn backend_base_url(&self) -> Result<String> {
        resolve_base_url(
            std::env::var(BACKEND_URL_ENV).ok().as_deref(),
            Some(&self.backend_url),
            Self::DEFAULT_BACKEND_URL,
        )
    }

    /// Returns the effective API token (env first, then config) if non-empty.
    pub fn effective_api_token(&self) -> Option<String> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .or_else(|| self.api_token.clone())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        // Parse template as base (preserves comments)
        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            api_token: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            default_view: ViewMode::default(),
            year_span: Self::DEFAULT_YEAR_SPAN,
        }
    }
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

/// Resolves a base URL with precedence: env > config > default.
///
/// Empty values are skipped. The winner must parse as an http(s) URL.
pub fn resolve_base_url(
    env_value: Option<&str>,
    config_value: Option<&str>,
    default_url: &str,
) -> Result<String> {
    let chosen = [env_value, config_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(default_url);

    validate_url(chosen)?;
    Ok(chosen.trim_end_matches('/').to_string())
}

/// Validates that a URL is well-formed and uses http(s).
fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).with_context(|| format!("Invalid backend base URL: {url}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("Invalid backend base URL: {url} (expected http or https)");
    }
    Ok(())
}
