//! Error types for the platform extensions.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the extension's error type.
pub type Result<T> = std::result::Result<T, ShowError>;

#[derive(Error, Debug)]
pub enum ShowError {
    /// A status file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A status file was read but is not valid YAML of the expected shape.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A group root the extensions import is not provided by the host.
    #[error("{name} - required module not found")]
    MissingModule { name: String },
}
