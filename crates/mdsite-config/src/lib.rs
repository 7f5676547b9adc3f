//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config
//! file the conventional layout is used:
//!
//! | Setting       | Default           |
//! |---------------|-------------------|
//! | `content_dir` | `content`         |
//! | `template`    | `template.html`   |
//! | `static_dir`  | `static`          |
//! | `output_dir`  | `docs`            |
//! | `base_path`   | `/docs`           |
//! | `parallel`    | `false`           |
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override HTML template file.
    pub template: Option<PathBuf>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override URL base path.
    pub base_path: Option<String>,
    /// Override parallel rendering flag.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// Base path used when neither the config file nor the CLI sets one.
pub const DEFAULT_BASE_PATH: &str = "/docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    content_dir: Option<String>,
    template: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
    base_path: Option<String>,
    parallel: Option<bool>,
}

/// Resolved build configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Markdown content directory.
    pub content_dir: PathBuf,
    /// HTML template file.
    pub template: PathBuf,
    /// Static assets directory.
    pub static_dir: PathBuf,
    /// Output directory, deleted and recreated on every build.
    pub output_dir: PathBuf,
    /// Prefix substituted for the leading `/` of root-relative URLs.
    pub base_path: String,
    /// Render pages in parallel.
    pub parallel: bool,
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
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdsite.toml` in current directory and parents,
    /// falling back to the defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let build = &mut self.build_resolved;
        if let Some(content_dir) = &settings.content_dir {
            build.content_dir.clone_from(content_dir);
        }
        if let Some(template) = &settings.template {
            build.template.clone_from(template);
        }
        if let Some(static_dir) = &settings.static_dir {
            build.static_dir.clone_from(static_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            build.output_dir.clone_from(output_dir);
        }
        if let Some(base_path) = &settings.base_path {
            build.base_path.clone_from(base_path);
        }
        if let Some(parallel) = settings.parallel {
            build.parallel = parallel;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                content_dir: base.join("content"),
                template: base.join("template.html"),
                static_dir: base.join("static"),
                output_dir: base.join("docs"),
                base_path: DEFAULT_BASE_PATH.to_owned(),
                parallel: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.build_resolved.base_path, "build.base_path")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let raw = &self.build;

        self.build_resolved = BuildConfig {
            content_dir: resolve(raw.content_dir.as_deref(), "content"),
            template: resolve(raw.template.as_deref(), "template.html"),
            static_dir: resolve(raw.static_dir.as_deref(), "static"),
            output_dir: resolve(raw.output_dir.as_deref(), "docs"),
            base_path: raw
                .base_path
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_owned()),
            parallel: raw.parallel.unwrap_or(false),
        };
    }
}
