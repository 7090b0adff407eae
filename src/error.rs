use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("'{text}' is not a valid integer: {source}")]
    BadInt { text: String, source: ParseIntError },

    #[error("separator '{sep}' not found in '{text}'")]
    MissingSeparator { text: String, sep: String },

    #[error("{0}")]
    BadInput(String),

    #[error("invalid log filter: {0}")]
    LogFilter(String),

    #[error("failed to create {}: {source}", path.display())]
    Scaffold { path: PathBuf, source: io::Error },

    #[error("{} already exists, not overwriting it", .0.display())]
    AlreadyExists(PathBuf),
}

impl Error {
    pub fn bad_input<S: Into<String>>(message: S) -> Error {
        Error::BadInput(message.into())
    }
}
