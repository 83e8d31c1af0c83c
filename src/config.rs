use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::{related, search};

pub const DEFAULT_CONFIG_PATH: &str = "notes.toml";
pub const CONFIG_ENV: &str = "NOTES_CONFIG";

/// Site settings read from `notes.toml`. Every key is optional.
///
/// ```toml
/// posts_index = "https://example.dev/blog/posts.json"
/// fallback_index = "blog/posts.json"
/// site_url = "https://example.dev"
/// author = "Jane Doe"
/// related_max = 4
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// URL or path of the live `posts.json`.
    pub posts_index: String,
    /// Static copy used when the live index can't be loaded.
    pub fallback_index: Option<String>,
    pub site_url: String,
    pub site_name: String,
    pub author: String,
    pub blog_path: String,
    pub tag_page_path: String,
    pub tags_index_path: String,
    pub search_max_results: usize,
    /// Raw related-notes limit; clamped to 1..=6 when used.
    pub related_max: i64,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            posts_index: "/blog/posts.json".to_string(),
            fallback_index: None,
            site_url: "http://localhost:8000".to_string(),
            site_name: "Notes".to_string(),
            author: "Notes".to_string(),
            blog_path: "/blog/".to_string(),
            tag_page_path: "/blog/tags/tag.html".to_string(),
            tags_index_path: "/blog/tags/".to_string(),
            search_max_results: search::DEFAULT_MAX_RESULTS,
            related_max: related::DEFAULT_MAX as i64,
            fetch_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Load from `path`; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&text)
    }

    /// `$NOTES_CONFIG` if set, otherwise `./notes.toml`.
    pub fn load_default() -> Result<Self, String> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }

    pub fn related_limit(&self) -> usize {
        related::clamp_max(Some(self.related_max.to_string().as_str()))
    }
}
