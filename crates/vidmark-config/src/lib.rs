//! File configuration for the vidmark video transform.
//!
//! Parses `vidmark.toml` with serde and resolves it into a
//! [`VideoConfig`]. When no path is given, the file is discovered in the
//! current directory or its parents.
//!
//! Overrides (e.g. from command-line flags) can be applied during load via
//! [`ConfigOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! `video.base_url` and `video.public_dir` support `${VAR}` (error if unset)
//! and `${VAR:-default}`.
//!
//! ## Example
//!
//! ```toml
//! [video]
//! base_url = "https://cdn.example.com"
//! public_dir = "public"
//! container_tag = "figure"
//! fallback_text = "Your browser does not support embedded video."
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use vidmark::{DEFAULT_PUBLIC_DIR, HintNode, VideoConfig};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vidmark.toml";

/// Settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override the public URL prefix.
    pub base_url: Option<String>,
    /// Override the media root directory.
    pub public_dir: Option<PathBuf>,
    /// Override the outer element tag.
    pub container_tag: Option<String>,
    /// Override the outer element class.
    pub container_class: Option<String>,
}

/// Loaded configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[video]` section as written in the file.
    video: VideoSectionRaw,

    /// Resolved transform configuration (set after loading).
    #[serde(skip)]
    pub video_resolved: VideoConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[video]` section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct VideoSectionRaw {
    base_url: Option<String>,
    public_dir: Option<String>,
    container_tag: Option<String>,
    container_class: Option<String>,
    fallback_html: Option<String>,
    fallback_text: Option<String>,
    mark_figure: Option<bool>,
    full_width: Option<bool>,
    container_title: Option<bool>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`video.base_url`").
        field: String,
        /// Error message (e.g., "${`CDN_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `vidmark.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Require a non-empty `base_url`.
    ///
    /// Use this where sources must be absolute, e.g. when publishing to a CDN.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `video.base_url` is empty.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        let base_url = self.video_resolved.base_url.as_str();
        require_non_empty(base_url, "video.base_url")?;
        Ok(base_url)
    }

    /// Validate resolved values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the container tag is not a valid
    /// element name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tag = &self.video_resolved.container_tag;
        require_non_empty(tag, "video.container_tag")?;
        if !is_valid_tag_name(tag) {
            return Err(ConfigError::Validation(format!(
                "video.container_tag is not a valid element name: {tag}"
            )));
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let video = &mut self.video_resolved;
        if let Some(base_url) = &overrides.base_url {
            video.base_url.clone_from(base_url);
        }
        if let Some(public_dir) = &overrides.public_dir {
            video.public_dir.clone_from(public_dir);
        }
        if let Some(tag) = &overrides.container_tag {
            video.container_tag.clone_from(tag);
        }
        if let Some(class) = &overrides.container_class {
            video.container_class = Some(class.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Default config with the public directory relative to `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            video: VideoSectionRaw::default(),
            video_resolved: VideoConfig::new().with_public_dir(base.join(DEFAULT_PUBLIC_DIR)),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.video.base_url {
            self.video.base_url = Some(expand::expand_env(url, "video.base_url")?);
        }
        if let Some(ref dir) = self.video.public_dir {
            self.video.public_dir = Some(expand::expand_env(dir, "video.public_dir")?);
        }
        Ok(())
    }

    /// Build the transform configuration, resolving `public_dir` against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let raw = &self.video;

        let fallback_content = match (&raw.fallback_html, &raw.fallback_text) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "video.fallback_html and video.fallback_text are mutually exclusive".to_owned(),
                ));
            }
            (Some(html), None) => Some(HintNode::Raw(html.clone())),
            (None, Some(text)) => Some(HintNode::Text(text.clone())),
            (None, None) => None,
        };

        let defaults = VideoConfig::new();
        self.video_resolved = VideoConfig {
            base_url: raw.base_url.clone().unwrap_or_default(),
            public_dir: config_dir.join(raw.public_dir.as_deref().unwrap_or(DEFAULT_PUBLIC_DIR)),
            container_tag: raw.container_tag.clone().unwrap_or(defaults.container_tag),
            container_class: raw.container_class.clone().filter(|c| !c.is_empty()),
            fallback_content,
            mark_figure: raw.mark_figure.unwrap_or(defaults.mark_figure),
            full_width: raw.full_width.unwrap_or(defaults.full_width),
            container_title: raw.container_title.unwrap_or(defaults.container_title),
        };

        Ok(())
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Element names start with a letter and contain letters, digits and hyphens.
fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
