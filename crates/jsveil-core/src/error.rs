use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jsveil operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read scope description at {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scope description at {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Unknown identifier names generator `{token}` (expected one of: dictionary, hexadecimal, keep-original, mangled, mangled-shuffled)"
    )]
    UnknownGenerator { token: String },

    #[error("{generator} generator gave up after {attempts} invalid candidates")]
    GenerationExhausted {
        generator: &'static str,
        attempts: u32,
    },

    #[error("Identifiers prefix `{prefix}` is not a valid identifier")]
    InvalidPrefix { prefix: String },

    #[error("Invalid value for option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result alias used throughout the core crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
