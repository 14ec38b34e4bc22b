// tests/common/mod.rs
//
// Shared helpers: an in-memory loader and fixture paths.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use enalotto_scrape::config::options::{SourcePlan, SourceSpec, Strategy};
use enalotto_scrape::core::dom::{Document, parse_document};
use enalotto_scrape::core::net::Loader;
use enalotto_scrape::error::FetchError;

/// Serves bodies by URL; anything else is a 503.
#[derive(Default)]
pub struct MapLoader {
    pages: HashMap<String, String>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

impl Loader for MapLoader {
    fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        match self.pages.get(url) {
            Some(body) => Ok(parse_document(body)),
            None => Err(FetchError::Http { url: url.to_string(), message: "status code 503".to_string() }),
        }
    }
}

pub fn fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name].iter().collect();
    path.to_string_lossy().into_owned()
}

pub fn page_text(name: &str, url: &str) -> SourceSpec {
    SourceSpec::new(name, url, Strategy::PageText)
}

/// Same source list for every field.
pub fn plan_all(list: Vec<SourceSpec>) -> SourcePlan {
    SourcePlan { jackpot: list.clone(), latest: list.clone(), previous: list.clone(), unified: list }
}

pub const FLAT_ARCHIVE: &str = "Jackpot €97.3 million \
    Saturday 2 March 2024 Drawing n. 27 5 12 34 56 78 90 Jolly 11 SuperStar 22 \
    Thursday 29 February 2024 Drawing n. 26 1 2 3 4 5 6 Jolly 7 SuperStar 8 \
    Tuesday 27 February 2024 Drawing n. 25 10 20 30 40 50 60 Jolly 70 SuperStar 80";
