//! Where blux keeps its own files, and how run directories given on the command line resolve

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Pinned from `--data-dir`; unset means `~/.blux`.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Pin the data directory for this process. The first call wins; later calls are logged
/// and ignored.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    if let Err(ignored) = DATA_DIR.set(custom_path.unwrap_or_else(default_data_dir)) {
        tracing::debug!(
            ignored = %ignored.display(),
            active = %data_dir().display(),
            "Data directory already pinned"
        );
    }
}

/// `~/.blux`, or `.blux` relative to the working directory when there is no home.
fn default_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".blux")
}

/// Directory holding the viewer config.
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// `config.toml` inside [`data_dir`]. Never created by blux.
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// `~`-expanded, absolute form of a user-supplied directory.
///
/// Paths that do not exist are returned un-canonicalized so callers can report them.
pub fn resolve_input_dir(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    match expanded.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) if expanded.is_relative() => std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded),
        Err(_) => expanded,
    }
}
