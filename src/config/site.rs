//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    /// Absolute site address, used as the prefix of comment thread URLs
    pub url: String,
    pub root: String,
    /// Permalink pattern for posts, `:uid` is replaced by the document uid
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Integrations
    #[serde(default)]
    pub disqus: DisqusConfig,
    #[serde(default)]
    pub prismic: PrismicConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: "blog/:uid/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            disqus: DisqusConfig::default(),
            prismic: PrismicConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        // Page paths start with '/', so the site URL carries no trailing one
        let trimmed = config.url.trim_end_matches('/').len();
        config.url.truncate(trimmed);
        if config.disqus.shortname.is_empty() {
            tracing::warn!("disqus.shortname is not set, comment threads will not load");
        }
        Ok(config)
    }
}

/// Disqus comment widget configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisqusConfig {
    /// Forum shortname registered with Disqus
    pub shortname: String,
}

/// Content repository settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismicConfig {
    /// Repository name; enables the in-context editing toolbar when set
    pub repository: Option<String>,
}
