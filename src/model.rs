// src/model.rs
//! Output shapes. Everything here is built fresh per request and not mutated
//! after assembly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::{MAIN_COUNT, MAX_NUMBER, MIN_NUMBER};

/// One draw as read from a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    /// Date text as found on the page, weekday dropped (e.g. `"2 March 2024"`).
    pub date: Option<String>,
    /// Draw sequence id (`"27"`, `"27/24"`).
    pub draw: Option<String>,
    /// Main numbers in order of first appearance.
    pub main: Vec<u8>,
    pub jolly: Option<u8>,
    pub superstar: Option<u8>,
    pub source: Option<String>,
}

pub fn in_range(n: u8) -> bool {
    (MIN_NUMBER..=MAX_NUMBER).contains(&n)
}

impl DrawRecord {
    /// All fields null.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Six distinct mains, both bonuses, a date, and every structural
    /// invariant holding.
    pub fn is_complete(&self) -> bool {
        let (Some(jolly), Some(superstar)) = (self.jolly, self.superstar) else {
            return false;
        };
        if self.date.is_none() || self.main.len() != MAIN_COUNT {
            return false;
        }
        let mut seen = [false; MAX_NUMBER as usize + 1];
        for &n in &self.main {
            if !in_range(n) || seen[n as usize] {
                return false;
            }
            seen[n as usize] = true;
        }
        in_range(jolly)
            && in_range(superstar)
            && jolly != superstar
            && !seen[jolly as usize]
            && !seen[superstar as usize]
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(s!(source));
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct JackpotRecord {
    pub source: Option<String>,
    /// `€<amount> <Unit>`, e.g. `"€130 Million"`.
    pub amount: Option<String>,
}

impl JackpotRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.amount.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PreviousDraws {
    pub source: Option<String>,
    pub draws: Vec<DrawRecord>,
}

impl PreviousDraws {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Latest draw plus archive tail read from one document in one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UnifiedResult {
    pub latest: Option<DrawRecord>,
    pub previous: PreviousDraws,
}

impl UnifiedResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.latest.as_ref().is_some_and(DrawRecord::is_complete)
    }
}

/// Per-source failures, keyed by source name.
pub type ErrorMap = BTreeMap<String, String>;

/// The return of every orchestrator operation: a value that is always present
/// (possibly the empty shape) plus what went wrong on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Fetched<T> {
    pub value: T,
    pub errors: ErrorMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DrawRecord {
        DrawRecord {
            date: Some(s!("2 March 2024")),
            draw: Some(s!("27")),
            main: vec![5, 12, 34, 56, 78, 90],
            jolly: Some(11),
            superstar: Some(22),
            source: None,
        }
    }

    #[test]
    fn complete_record_passes() {
        assert!(complete().is_complete());
    }

    #[test]
    fn completeness_rejects_each_broken_invariant() {
        let mut r = complete();
        r.main.pop();
        assert!(!r.is_complete());

        let mut r = complete();
        r.main[5] = 5;
        assert!(!r.is_complete(), "duplicate main");

        let mut r = complete();
        r.jolly = Some(12);
        assert!(!r.is_complete(), "jolly among main");

        let mut r = complete();
        r.superstar = Some(11);
        assert!(!r.is_complete(), "jolly == superstar");

        let mut r = complete();
        r.main[0] = 91;
        assert!(!r.is_complete(), "out of range");

        let mut r = complete();
        r.date = None;
        assert!(!r.is_complete());
    }

    #[test]
    fn empty_shapes_serialize_as_nulls() {
        let v = serde_json::to_value(DrawRecord::empty()).unwrap();
        assert!(v["date"].is_null());
        assert!(v["jolly"].is_null());
        assert_eq!(v["main"], serde_json::json!([]));
        assert!(DrawRecord::empty().is_empty());
    }
}
