use std::path::PathBuf;

use thiserror::Error;

use showroom_decode::DecodeError;

/// Errors that can occur on the fetch-and-decode path. All of them collapse
/// to the failure variant of the response at the worker boundary.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {status} fetching '{url}'")]
    Status { url: String, status: u16 },

    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("decode task failed: {0}")]
    TaskFailed(String),

    #[error("failed to start worker runtime: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for WorkerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WorkerError::Timeout
        } else {
            WorkerError::Network(err.to_string())
        }
    }
}
