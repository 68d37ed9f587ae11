use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::util::paths::config_path;
use crate::view::panel::DEFAULT_INDENT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Indent width for pretty-printed JSON panels
    pub indent: usize,
    /// Propagate unreadable or malformed JSON instead of rendering a placeholder panel
    pub strict: bool,
    /// Render `*.json` files outside the known set as raw panels
    pub raw_json: bool,
    /// Annotate reasoning/build titles with their pack reference
    pub pack_titles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            strict: false,
            raw_json: true,
            pack_titles: true,
        }
    }
}

/// TOML representation of the `[view]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlViewConfig {
    pub indent: Option<usize>,
    pub strict: Option<bool>,
    pub raw_json: Option<bool>,
    pub pack_titles: Option<bool>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Rendering configuration
    pub view: Option<TomlViewConfig>,
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// A missing file means defaults; a malformed one is logged and ignored.
    pub fn load() -> Self {
        let config_file = config_path();
        if !config_file.exists() {
            return Config::default();
        }
        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from an explicit path. Errors are returned, not swallowed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML contents and merge them over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.merge(toml_config);
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        // Load view configuration
        if let Some(view) = toml_config.view {
            if let Some(indent) = view.indent {
                self.indent = indent;
            }
            if let Some(strict) = view.strict {
                self.strict = strict;
            }
            if let Some(raw_json) = view.raw_json {
                self.raw_json = raw_json;
            }
            if let Some(pack_titles) = view.pack_titles {
                self.pack_titles = pack_titles;
            }
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_raw_json(mut self, raw_json: bool) -> Self {
        self.raw_json = raw_json;
        self
    }
}
