//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    content::ContentKind,
    error::{CoreError, Result},
};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content directory settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Fallback values for optional frontmatter fields.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Canonical base URL for the site (e.g., "https://example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Author credited on posts that do not name one.
    #[serde(default)]
    pub author: Option<String>,
}

/// Where documents live and how they are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per content kind.
    #[serde(default = "default_content_root")]
    pub root: PathBuf,

    /// Document file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Reading speed used for derived read times.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

/// Defaults applied when a document omits an optional field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Category for blog posts.
    #[serde(default = "default_post_category")]
    pub post_category: String,

    /// Difficulty for homelabs.
    #[serde(default = "default_lab_difficulty")]
    pub lab_difficulty: String,

    /// Status for homelabs.
    #[serde(default = "default_lab_status")]
    pub lab_status: String,

    /// Category (and fallback focus area) for homelabs.
    #[serde(default = "default_lab_category")]
    pub lab_category: String,
}

// Default value functions
fn default_title() -> String {
    "Portfolio".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_content_root() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_extension() -> String {
    "mdx".to_string()
}

fn default_words_per_minute() -> u32 {
    225
}

fn default_post_category() -> String {
    "General".to_string()
}

fn default_lab_difficulty() -> String {
    "Intermediate".to_string()
}

fn default_lab_status() -> String {
    "Ready".to_string()
}

fn default_lab_category() -> String {
    "Blue Team".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            author: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            extension: default_extension(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            post_category: default_post_category(),
            lab_difficulty: default_lab_difficulty(),
            lab_status: default_lab_status(),
            lab_category: default_lab_category(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.content.extension.is_empty() || self.content.extension.starts_with('.') {
            return Err(CoreError::config(
                "content.extension must be non-empty and must not start with '.'",
            ));
        }

        if self.content.words_per_minute == 0 {
            return Err(CoreError::config(
                "content.words_per_minute must be greater than zero",
            ));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Directory holding documents of the given kind.
    pub fn content_dir(&self, kind: ContentKind) -> PathBuf {
        self.content.root.join(kind.dir_name())
    }
}
