// src/extract/jackpot.rs
//! Jackpot estimate: the largest euro amount on the region.
//!
//! Pages mention several amounts (minimum prize, last winner, rollover); the
//! jackpot is always the biggest one, so every match is normalized to a
//! magnitude and the maximum wins.

use std::sync::LazyLock;

use regex::Regex;

const UNIT: &str = r"billion|billions|miliardi|miliardo|mld|bn|million|millions|milioni|milione|mln|mio|m";
const AMOUNT: &str = r"\d[\d.,]*\d|\d";

/// Euro amounts, sign before (`€ 130 Million`, `EUR 2,000,000`) or after
/// (`130 milioni di euro`).
pub(crate) static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pat = format!(
        r"(?i)(?:(?:€|\beur\b|\beuro\b)\s*(?P<amt>{AMOUNT})(?:\s*(?P<unit>{UNIT})\b)?|\b(?P<amt2>{AMOUNT})\s*(?:(?P<unit2>{UNIT})\s+)?(?:di\s+)?(?:€|euro\b|eur\b))"
    );
    Regex::new(&pat).expect("currency regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    None,
    Million,
    Billion,
}

impl Unit {
    fn parse(s: Option<&str>) -> Unit {
        let Some(s) = s else { return Unit::None };
        let lc = s.to_lowercase();
        if lc.starts_with('b') || lc.starts_with("miliard") || lc == "mld" {
            Unit::Billion
        } else {
            Unit::Million
        }
    }

    fn factor(self) -> f64 {
        match self {
            Unit::None => 1.0,
            Unit::Million => 1e6,
            Unit::Billion => 1e9,
        }
    }
}

/// One currency mention.
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    /// Byte span in the source text.
    pub start: usize,
    pub end: usize,
    /// Value in euro.
    pub magnitude: f64,
    /// `€130 Million`
    pub display: String,
}

/// All parseable euro amounts in document order.
pub fn find_amounts(text: &str) -> Vec<Amount> {
    let mut out = Vec::new();
    for caps in CURRENCY_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let (amt, unit) = match caps.name("amt") {
            Some(a) => (a.as_str(), caps.name("unit")),
            None => match caps.name("amt2") {
                Some(a) => (a.as_str(), caps.name("unit2")),
                None => continue,
            },
        };
        let unit = Unit::parse(unit.map(|u| u.as_str()));
        let Some(value) = parse_amount(amt, unit != Unit::None) else { continue };
        let magnitude = value * unit.factor();
        out.push(Amount { start: whole.start(), end: whole.end(), magnitude, display: display(magnitude) });
    }
    out
}

/// Largest amount, formatted. `None` when the text has no euro amount.
pub fn extract_jackpot(text: &str) -> Option<String> {
    find_amounts(text)
        .into_iter()
        .filter(|a| a.magnitude > 0.0)
        .fold(None::<Amount>, |best, a| match best {
            Some(b) if b.magnitude >= a.magnitude => Some(b),
            _ => Some(a),
        })
        .map(|a| a.display)
}

/// Separators: with a unit a single separator is a decimal point
/// (`1,5 milioni`); otherwise groups of three are thousands (`2.000.000`).
fn parse_amount(raw: &str, has_unit: bool) -> Option<f64> {
    let groups: Vec<&str> = raw.split(['.', ',']).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }
    let n = groups.len();
    let last = groups[n - 1];
    let decimal = n > 1 && (last.len() != 3 || (has_unit && n == 2));
    let mut s = if decimal { groups[..n - 1].concat() } else { groups.concat() };
    if decimal {
        s.push('.');
        s.push_str(last);
    }
    s.parse().ok()
}

fn display(magnitude: f64) -> String {
    let (value, unit) = if magnitude >= 1e9 {
        (magnitude / 1e9, " Billion")
    } else if magnitude >= 1e6 {
        (magnitude / 1e6, " Million")
    } else {
        (magnitude, "")
    };
    let mut num = format!("{value:.1}");
    if num.ends_with(".0") {
        num.truncate(num.len() - 2);
    }
    join!("€", num, unit)
}
