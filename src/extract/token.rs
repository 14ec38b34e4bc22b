// src/extract/token.rs
//! Normalized text → typed token stream.
//!
//! Only four things matter on a results page: candidate ball numbers, the two
//! bonus labels, dates, and draw ids. Everything else is dropped. Positions
//! are byte offsets into the text that was tokenized.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::date::date_captures;
use super::jackpot::CURRENCY_RE;
use crate::model::in_range;

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:(?P<jolly>jolly)|(?P<star>super[\s-]?star))\b").expect("label regex"));

/// `Drawing n. 123`, `Draw No. 5`, `Concorso n° 27`, `n. 27`, `27/24`. A bare
/// "Draw 5" is not an id: too easy to confuse with the first ball. Neither is
/// "drawn 5".
static DRAW_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:drawing|draw|concorso|estrazione)\b\s*(?:n[°º.]|no\b\.?|nr\b\.?|number\b|#)|concorso\b|n[°º.])\s*(?P<id>\d{1,4}(?:/\d{2,4})?)\b|\b(?P<bare>\d{1,3}/\d{2})\b",
    )
    .expect("draw id regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Jolly,
    SuperStar,
}

impl LabelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelKind::Jolly => "jolly",
            LabelKind::SuperStar => "superstar",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// 1..=90; `in_date` when the digits belong to a date (day of month).
    Number { value: u8, in_date: bool },
    Label(LabelKind),
    /// Date text without weekday.
    Date(String),
    DrawId(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl Token {
    /// Value of a number token usable as a ball (not part of a date).
    pub fn ball(&self) -> Option<u8> {
        match self.kind {
            TokenKind::Number { value, in_date: false } => Some(value),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<LabelKind> {
        match self.kind {
            TokenKind::Label(k) => Some(k),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn draw_id(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::DrawId(d) => Some(d),
            _ => None,
        }
    }

    /// Labels and dates end a picker's scan.
    pub fn is_boundary(&self) -> bool {
        matches!(self.kind, TokenKind::Label(_) | TokenKind::Date(_))
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    let dates: Vec<(Range<usize>, String)> = date_captures(text)
        .iter()
        .filter_map(|c| {
            let whole = c.get(0)?;
            let core = c.name("date")?;
            Some((whole.range(), core.as_str().trim().to_string()))
        })
        .collect();

    let draw_ids: Vec<(Range<usize>, String)> = DRAW_ID_RE
        .captures_iter(text)
        .filter_map(|c| {
            let whole = c.get(0)?;
            if let Some(id) = c.name("id") {
                return Some((whole.range(), s!(id.as_str())));
            }
            let bare = c.name("bare")?;
            // 02/03/2024 is a date, not a draw id.
            let next = text[whole.end()..].chars().next();
            let prev = text[..whole.start()].chars().next_back();
            if next == Some('/') || prev == Some('/') {
                return None;
            }
            Some((whole.range(), s!(bare.as_str())))
        })
        .collect();

    let money: Vec<Range<usize>> = CURRENCY_RE.find_iter(text).map(|m| m.range()).collect();
    let inside = |spans: &[Range<usize>], at: usize| spans.iter().any(|r| r.contains(&at));
    let date_spans: Vec<Range<usize>> = dates.iter().map(|(r, _)| r.clone()).collect();
    let id_spans: Vec<Range<usize>> = draw_ids.iter().map(|(r, _)| r.clone()).collect();

    let mut tokens: Vec<Token> = Vec::new();

    for (r, raw) in dates {
        tokens.push(Token { kind: TokenKind::Date(raw), pos: r.start });
    }
    for (r, raw) in draw_ids {
        // A draw id inside a date span cannot happen with sane input; dates win.
        if !inside(&date_spans, r.start) {
            tokens.push(Token { kind: TokenKind::DrawId(raw), pos: r.start });
        }
    }
    for m in LABEL_RE.captures_iter(text) {
        let Some(whole) = m.get(0) else { continue };
        let kind = if m.name("jolly").is_some() { LabelKind::Jolly } else { LabelKind::SuperStar };
        tokens.push(Token { kind: TokenKind::Label(kind), pos: whole.start() });
    }

    for run in digit_runs(text) {
        if run.len() > 2 || inside(&id_spans, run.start) || inside(&money, run.start) {
            continue;
        }
        let in_date = inside(&date_spans, run.start);
        if !in_date && !standalone(text, &run) {
            continue;
        }
        let Ok(value) = text[run.clone()].parse::<u8>() else { continue };
        if !in_range(value) {
            continue;
        }
        tokens.push(Token { kind: TokenKind::Number { value, in_date }, pos: run.start });
    }

    tokens.sort_by_key(|t| t.pos);
    tokens
}

/// Tokenize only `range` of `text`; positions stay relative to `text`.
/// The range is widened to char boundaries if needed.
pub fn tokenize_window(text: &str, range: Range<usize>) -> Vec<Token> {
    let mut start = range.start.min(text.len());
    let mut end = range.end.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    let mut tokens = tokenize(&text[start..end]);
    for t in &mut tokens {
        t.pos += start;
    }
    tokens
}

fn digit_runs(text: &str) -> Vec<Range<usize>> {
    let b = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < b.len() {
        if b[i].is_ascii_digit() {
            let s = i;
            while i < b.len() && b[i].is_ascii_digit() {
                i += 1;
            }
            out.push(s..i);
        } else {
            i += 1;
        }
    }
    out
}

/// A ball number stands alone: no letters/digits glued to it, not a decimal,
/// time, fraction or percentage, no currency sign in front.
fn standalone(text: &str, run: &Range<usize>) -> bool {
    let before = &text[..run.start];
    let after = &text[run.end..];
    let prev = before.chars().next_back();
    let next = after.chars().next();
    let next2 = after.chars().nth(1);
    let prev2 = before.chars().rev().nth(1);

    if prev.is_some_and(char::is_alphanumeric) || next.is_some_and(char::is_alphanumeric) {
        return false;
    }
    if matches!(prev, Some('€' | '$' | '£' | '#' | '+' | '/' | ':')) || matches!(next, Some('%' | '/' | ':')) {
        return false;
    }
    // 2.5 / 97.3 ; a comma list "5,12,34" is fine
    if prev == Some('.') && prev2.is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    if next == Some('.') && next2.is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    true
}
