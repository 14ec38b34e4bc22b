// src/error.rs
use thiserror::Error;

/// Why a source's document could not be obtained. Recorded per source by the
/// orchestrator; never escapes its public operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("reading {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported url: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path} failed: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {0} lists no sources")]
    Empty(String),
}
