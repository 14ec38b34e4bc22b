// src/extract/date.rs
//! Draw date canonicalization and same-day matching.
//!
//! Mirrors print dates as `2 March 2024`, `Saturday 2nd March 2024`,
//! `March 2, 2024`, or without the year in page headers (`Sat 2 Mar`). Two
//! dates denote the same draw day when day and month agree and, if both carry
//! a year, the years agree too.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Match, Regex};
use serde::Serialize;

const MONTH: &str = r"(?:january|february|march|april|may|june|july|august|september|october|november|december|gennaio|febbraio|marzo|aprile|maggio|giugno|luglio|agosto|settembre|ottobre|novembre|dicembre|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec|gen|mag|giu|lug|ott|dic)\.?";
const DAY: &str = r"(?:3[01]|[12]\d|0?[1-9])";
const ORDINAL: &str = r"(?:st|nd|rd|th|°|º)?";
const WEEKDAY: &str = r"(?:[a-z]+day|luned[iì]|marted[iì]|mercoled[iì]|gioved[iì]|venerd[iì]|sabato|domenica|mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun|lun|mer|gio|ven|sab|dom)\.?,?\s+";

fn date_pattern(year: &str) -> String {
    format!(
        r"(?i)\b(?:{WEEKDAY})?(?P<date>(?P<d1>{DAY}){ORDINAL}(?:\s+of)?\s+(?P<m1>{MONTH})(?:,?\s+(?P<y1>\d{{4}})){year}|(?P<m2>{MONTH})\s+(?P<d2>{DAY}){ORDINAL}(?:,?\s+(?P<y2>\d{{4}})){year})(?:\b|$)"
    )
}

/// Long-form date, optional weekday prefix. Group `date` excludes the weekday.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&date_pattern("?")).expect("date regex"));

/// Same shape with the year required.
static DATED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&date_pattern("")).expect("dated regex"));

/// Every date in `text`, in document order.
///
/// Dated forms are matched first and yearless ones only where no dated match
/// lies. In `SuperStar 8 March 5, 2024` the ball and the month would
/// otherwise read as `8 March`, hiding the real `March 5, 2024`.
pub(crate) fn date_captures(text: &str) -> Vec<Captures<'_>> {
    let mut found: Vec<Captures<'_>> = DATED_RE.captures_iter(text).collect();
    let dated: Vec<Range<usize>> = found.iter().filter_map(|c| c.get(0)).map(|m| m.range()).collect();
    let overlaps = |m: &Match<'_>| dated.iter().any(|r| r.start < m.end() && m.start() < r.end);

    found.extend(DATE_RE.captures_iter(text).filter(|c| c.get(0).is_some_and(|m| !overlaps(&m))));
    found.sort_by_key(|c| c.get(0).map_or(0, |m| m.start()));
    found
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// English or Italian, full or abbreviated, any case, trailing dot allowed.
    pub fn from_name(s: &str) -> Option<Month> {
        let lc = s.trim().trim_end_matches('.').to_lowercase();
        let idx = match lc.as_str() {
            "january" | "jan" | "gennaio" | "gen" => 0,
            "february" | "feb" | "febbraio" => 1,
            "march" | "mar" | "marzo" => 2,
            "april" | "apr" | "aprile" => 3,
            "may" | "maggio" | "mag" => 4,
            "june" | "jun" | "giugno" | "giu" => 5,
            "july" | "jul" | "luglio" | "lug" => 6,
            "august" | "aug" | "agosto" => 7,
            "september" | "sept" | "sep" | "settembre" => 8,
            "october" | "oct" | "ottobre" | "ott" => 9,
            "november" | "nov" | "novembre" => 10,
            "december" | "dec" | "dicembre" | "dic" => 11,
            _ => return None,
        };
        Some(Self::ALL[idx])
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalDate {
    pub day: u8,
    pub month: Month,
    pub year: Option<u16>,
}

impl CanonicalDate {
    /// Day and month must agree; the year only counts when both sides have one.
    pub fn same_day(&self, other: &CanonicalDate) -> bool {
        if self.day != other.day || self.month != other.month {
            return false;
        }
        match (self.year, other.year) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(y) => write!(f, "{} {} {}", self.day, self.month, y),
            None => write!(f, "{} {}", self.day, self.month),
        }
    }
}

/// Parse the first long-form date found in `text`. Ordinal suffixes and a
/// leading weekday are ignored.
pub fn canonicalize(text: &str) -> Option<CanonicalDate> {
    let caps = date_captures(text).into_iter().next()?;
    let (d, m, y) = if caps.name("d1").is_some() {
        (caps.name("d1"), caps.name("m1"), caps.name("y1"))
    } else {
        (caps.name("d2"), caps.name("m2"), caps.name("y2"))
    };
    let day: u8 = d?.as_str().parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let month = Month::from_name(m?.as_str())?;
    let year = match y {
        Some(y) => Some(y.as_str().parse::<u16>().ok()?),
        None => None,
    };
    Some(CanonicalDate { day, month, year })
}

/// Year-tolerant equality on raw date strings. False when either side does
/// not parse.
pub fn dates_match(a: &str, b: &str) -> bool {
    match (canonicalize(a), canonicalize(b)) {
        (Some(x), Some(y)) => x.same_day(&y),
        _ => false,
    }
}

/// Key used for deduplication: canonical form if parseable, else the
/// lowercased raw text.
pub fn date_key(raw: &str) -> String {
    canonicalize(raw).map(|d| d.to_string()).unwrap_or_else(|| raw.trim().to_lowercase())
}
