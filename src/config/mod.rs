mod settings;

pub use settings::{Config, ConfigError, TomlConfig, TomlViewConfig};
