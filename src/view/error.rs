use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Input directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {} as JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
