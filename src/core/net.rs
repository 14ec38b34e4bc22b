// src/core/net.rs
// Page loading. The orchestrator only sees the `Loader` trait; `HttpLoader` is
// the production implementation (ureq, blocking).

use std::{fs, time::Duration};

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

use super::dom::{Document, parse_document};

/// Fetch a URL and hand back a queryable document.
/// Implementations must be shareable across the report's worker threads.
pub trait Loader: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError>;
}

impl<L: Loader + ?Sized> Loader for &L {
    fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        (**self).fetch(url)
    }
}

/// HTTP(S) via ureq with a browser User-Agent; `file://` URLs and bare paths
/// are read from disk so captured pages can be replayed offline.
pub struct HttpLoader {
    agent: ureq::Agent,
}

impl HttpLoader {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }

    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        if let Some(path) = local_path(url) {
            return fs::read_to_string(path).map_err(|source| FetchError::Io { path: s!(path), source });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::Unsupported(s!(url)));
        }

        let t = std::time::Instant::now();
        let http_err = |e: &dyn std::fmt::Display| FetchError::Http { url: s!(url), message: e.to_string() };
        let resp = self
            .agent
            .get(url)
            .set("Accept", "text/html,application/xhtml+xml")
            .set("Accept-Language", "en-GB,en;q=0.9,it;q=0.8")
            .call()
            .map_err(|e| http_err(&e))?;
        let body = resp.into_string().map_err(|e| http_err(&e))?;
        logd!("Net: GET {url} -> {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for HttpLoader {
    fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        let body = self.get_text(url)?;
        Ok(parse_document(&body))
    }
}

fn local_path(url: &str) -> Option<&str> {
    if let Some(p) = url.strip_prefix("file://") {
        return Some(p);
    }
    if url.contains("://") { None } else { Some(url) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_paths_are_recognized() {
        assert_eq!(local_path("file:///tmp/page.html"), Some("/tmp/page.html"));
        assert_eq!(local_path("fixtures/page.html"), Some("fixtures/page.html"));
        assert_eq!(local_path("https://example.org/"), None);
    }

    #[test]
    fn unsupported_scheme_is_an_error() {
        let loader = HttpLoader::new();
        assert!(matches!(loader.get_text("ftp://example.org/x"), Err(FetchError::Unsupported(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let loader = HttpLoader::new();
        let path = std::env::temp_dir().join("enalotto_missing_page.html");
        let url = join!("file://", path.to_string_lossy());
        assert!(matches!(loader.get_text(&url), Err(FetchError::Io { .. })));
    }
}
