//! Configuration loading and resolution
//!
//! Every setting has a built-in default, so a missing configuration file
//! never stops the tools from running. Config file resolution order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config file (`<config_dir>/plx/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::columns::ColumnMapping;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PLX_CONFIG";

/// Configuration loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// File name used when no output path is given on the command line
    pub output_filename: String,

    /// Spreadsheet column letters for each source field
    pub columns: ColumnMapping,

    /// Constant artist/label credited on every output row
    pub labels: LabelConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            output_filename: default_output_filename(),
            columns: ColumnMapping::default(),
            labels: LabelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Artist and label written on every schedule row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub artist: String,
    pub label: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            artist: "Paralux".to_string(),
            label: "Paralux".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_output_filename() -> String {
    "PLX Schedule A.xlsx".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformFile(PathBuf),
    Defaults,
}

impl ConfigSource {
    /// Config file path, if the configuration was read from a file
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformFile(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Effective configuration plus its origin
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Read and parse a TOML config file
///
/// A missing file is `Error::NotFound`; any other read failure is `Error::Io`.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(format!("Config file {}", path.display())));
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Platform config file path (`~/.config/plx/config.toml` on Linux)
pub fn platform_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plx").join("config.toml"))
}

/// Config file resolver following the CLI → ENV → platform file → defaults order
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    env_var: String,
    platform_path: Option<PathBuf>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver using `PLX_CONFIG` and the platform config directory
    pub fn new() -> Self {
        Self {
            env_var: CONFIG_ENV_VAR.to_string(),
            platform_path: platform_config_path(),
        }
    }

    /// Use a different environment variable name
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Use a different platform config file (None disables the lookup)
    pub fn with_platform_path(mut self, path: Option<PathBuf>) -> Self {
        self.platform_path = path;
        self
    }

    /// Resolve the effective configuration
    ///
    /// Explicitly named files (CLI or environment) must exist and parse.
    /// A missing platform file falls through to the compiled defaults.
    pub fn resolve(&self, cli_path: Option<&Path>) -> Result<ResolvedConfig> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_path {
            let config = load_toml_config(path)?;
            info!("Loaded configuration from {} (command line)", path.display());
            return Ok(ResolvedConfig {
                config,
                source: ConfigSource::CommandLine(path.to_path_buf()),
            });
        }

        // Priority 2: Environment variable
        if let Some(value) = std::env::var_os(&self.env_var).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(value);
            let config = load_toml_config(&path)?;
            info!("Loaded configuration from {} ({})", path.display(), self.env_var);
            return Ok(ResolvedConfig {
                config,
                source: ConfigSource::Environment(path),
            });
        }

        // Priority 3: Platform config file
        if let Some(path) = &self.platform_path {
            if path.exists() {
                let config = load_toml_config(path)?;
                info!("Loaded configuration from {}", path.display());
                return Ok(ResolvedConfig {
                    config,
                    source: ConfigSource::PlatformFile(path.clone()),
                });
            }
            debug!("No config file at {}, using defaults", path.display());
        }

        // Priority 4: Compiled defaults
        Ok(ResolvedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.output_filename, "PLX Schedule A.xlsx");
        assert_eq!(config.columns, ColumnMapping::default());
        assert_eq!(config.labels.artist, "Paralux");
        assert_eq!(config.labels.label, "Paralux");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_partial_columns_keep_other_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [columns]
            track_name = "B"
            "#,
        )
        .unwrap();

        assert_eq!(config.columns.track_name, "B");
        assert_eq!(config.columns.version, "S");
        assert_eq!(config.columns.publishers, "AA");
    }

    #[test]
    fn test_config_source_path() {
        let source = ConfigSource::CommandLine(PathBuf::from("/tmp/plx.toml"));
        assert_eq!(source.path(), Some(Path::new("/tmp/plx.toml")));
        assert_eq!(ConfigSource::Defaults.path(), None);
    }
}
