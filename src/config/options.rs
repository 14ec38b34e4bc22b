// src/config/options.rs
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;

/// How to find the interesting text inside one source's page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The whole page text.
    PageText,
    /// Elements matching these selectors (in order), then the smallest element
    /// carrying both bonus labels, then the whole page.
    Container(Vec<String>),
}

/// One upstream mirror plus how to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
}

fn default_strategy() -> Strategy {
    Strategy::PageText
}

impl SourceSpec {
    pub fn new(name: &str, url: &str, strategy: Strategy) -> Self {
        Self { name: s!(name), url: s!(url), strategy }
    }
}

/// Ordered source lists per field. Earlier entries win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePlan {
    #[serde(default)]
    pub jackpot: Vec<SourceSpec>,
    #[serde(default)]
    pub latest: Vec<SourceSpec>,
    #[serde(default)]
    pub previous: Vec<SourceSpec>,
    #[serde(default)]
    pub unified: Vec<SourceSpec>,
}

fn selectors(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s!(*s)).collect()
}

impl Default for SourcePlan {
    fn default() -> Self {
        let net_latest = Strategy::Container(selectors(&[
            ".latest-results", ".results-latest", "#latest-result", ".result-balls",
        ]));
        let com_latest = Strategy::Container(selectors(&[".latest-draw", ".draw-result", ".balls"]));
        let jackpot_box = Strategy::Container(selectors(&[".jackpot", "#jackpot", ".next-jackpot"]));

        Self {
            jackpot: vec![
                SourceSpec::new("superenalotto.net", SUPERENALOTTO_NET, jackpot_box.clone()),
                SourceSpec::new("superenalotto.com", SUPERENALOTTO_COM, jackpot_box),
                SourceSpec::new("lottery.net", LOTTO_NET, Strategy::PageText),
            ],
            latest: vec![
                SourceSpec::new("superenalotto.net", SUPERENALOTTO_NET, net_latest.clone()),
                SourceSpec::new("superenalotto.com", SUPERENALOTTO_COM, com_latest.clone()),
                SourceSpec::new("lotteryguru.com", LOTTERY_GURU, Strategy::PageText),
            ],
            previous: vec![
                SourceSpec::new("superenalotto.net", SUPERENALOTTO_NET, Strategy::PageText),
                SourceSpec::new("lotteryguru.com", LOTTERY_GURU, Strategy::PageText),
                SourceSpec::new("lottery.net", LOTTO_NET, Strategy::PageText),
            ],
            unified: vec![
                SourceSpec::new("superenalotto.net", SUPERENALOTTO_NET, net_latest),
                SourceSpec::new("superenalotto.com", SUPERENALOTTO_COM, com_latest),
                SourceSpec::new("lotteryguru.com", LOTTERY_GURU, Strategy::PageText),
            ],
        }
    }
}

impl SourcePlan {
    /// Read a plan from JSON. Fields left out fall back to empty lists; a plan
    /// with no source at all is rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: shown.clone(), source })?;
        let plan: SourcePlan =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: shown.clone(), source })?;
        if plan.is_empty() {
            return Err(ConfigError::Empty(shown));
        }
        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.jackpot.is_empty() && self.latest.is_empty() && self.previous.is_empty() && self.unified.is_empty()
    }
}

/// Per-request knobs shared by the CLI and the report layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    pub limit: usize,
    pub exclude_date: Option<String>,
    pub debug: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, exclude_date: None, debug: false }
    }
}

impl RequestOptions {
    pub fn clamped_limit(&self) -> usize {
        clamp_limit(self.limit)
    }
}

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIMIT)
}
