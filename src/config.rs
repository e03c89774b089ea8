//! Project configuration (webidl2ts.toml) parsing and types.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use webidl_ts::ConvertOptions;

/// File name looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "webidl2ts.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure for webidl2ts.toml.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Options forwarded to the converter.
    #[serde(default)]
    pub convert: ConvertOptions,
    /// Output layout.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Namespace wrapping emscripten bindings.
    pub module: Option<String>,
    /// Spaces per indentation level.
    pub indent_size: Option<usize>,
    /// Indent with tabs.
    pub use_tabs: Option<bool>,
    /// Emit the generated-file comment (default: true).
    pub header: Option<bool>,
    /// Write a markdown report next to the output.
    pub report: Option<bool>,
}

impl Config {
    /// Load `webidl2ts.toml` from the current directory, if present.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from_path(path).map(Some)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
