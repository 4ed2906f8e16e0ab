use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Why a generation request did not produce reply text
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never completed (connection refused, DNS, timeout)
    #[error("request to generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation backend returned status {0}")]
    Status(StatusCode),

    /// Body was not JSON, or carried no `response` text
    #[error("malformed response from generation backend: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The request was aborted or superseded before it resolved
    #[error("request cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
