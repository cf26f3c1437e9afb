//! Configuration management for mdwiki.
//!
//! Parses `mdwiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `wiki.source_dir`
//! - `wiki.base_path`
//! - `export.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdwiki.toml";

/// Default source directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "docs";

/// Default export directory, relative to the config file.
const DEFAULT_OUTPUT_DIR: &str = "site";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override wiki source directory.
    pub source_dir: Option<PathBuf>,
    /// Override index URL prefix.
    pub base_path: Option<String>,
    /// Override export link rewriting.
    pub export: Option<bool>,
    /// Override export output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wiki configuration (paths are relative strings from TOML).
    wiki: WikiConfigRaw,
    /// Export configuration (paths are relative strings from TOML).
    export: ExportConfigRaw,

    /// Resolved wiki configuration (set after loading).
    #[serde(skip)]
    pub wiki_resolved: WikiConfig,
    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw wiki configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WikiConfigRaw {
    source_dir: Option<String>,
    base_path: Option<String>,
    export: Option<bool>,
}

/// Resolved wiki configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WikiConfig {
    /// Directory holding the Markdown pages.
    pub source_dir: PathBuf,
    /// Prefix for page URLs in the site index.
    pub base_path: String,
    /// Rewrite internal links to `.html` targets.
    pub export: bool,
}

/// Raw export configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output_dir: Option<String>,
}

/// Resolved static export configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory the exported site is written to.
    pub output_dir: PathBuf,
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
        /// Config field path (e.g., "`wiki.base_path`").
        field: String,
        /// Error message (e.g., "${`WIKI_BASE`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdwiki.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
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
        if let Some(source_dir) = &settings.source_dir {
            self.wiki_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(base_path) = &settings.base_path {
            self.wiki_resolved.base_path.clone_from(base_path);
        }
        if let Some(export) = settings.export {
            self.wiki_resolved.export = export;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.export_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            wiki: WikiConfigRaw::default(),
            export: ExportConfigRaw::default(),
            wiki_resolved: WikiConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                base_path: String::new(),
                export: false,
            },
            export_resolved: ExportConfig {
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_path = &self.wiki_resolved.base_path;
        if base_path.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(ConfigError::Validation(format!(
                "wiki.base_path cannot contain '..' segments: {base_path}"
            )));
        }

        if self.export_resolved.output_dir == self.wiki_resolved.source_dir {
            return Err(ConfigError::Validation(format!(
                "export.output_dir must differ from wiki.source_dir ({})",
                self.wiki_resolved.source_dir.display()
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.wiki.source_dir {
            self.wiki.source_dir = Some(expand::expand_env(dir, "wiki.source_dir")?);
        }
        if let Some(ref base_path) = self.wiki.base_path {
            self.wiki.base_path = Some(expand::expand_env(base_path, "wiki.base_path")?);
        }
        if let Some(ref dir) = self.export.output_dir {
            self.export.output_dir = Some(expand::expand_env(dir, "export.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.wiki_resolved = WikiConfig {
            source_dir: resolve(self.wiki.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            base_path: self.wiki.base_path.clone().unwrap_or_default(),
            export: self.wiki.export.unwrap_or(false),
        };
        self.export_resolved = ExportConfig {
            output_dir: resolve(self.export.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
        };
    }
}
