// src/extract/archive.rs
//! Archive listing → draws, newest first.
//!
//! Results archives are flat runs of text with no reliable row markup: every
//! draw starts with its date, so dates are the anchors and each draw's window
//! runs from its date to the next one.

use std::collections::HashSet;

use super::assemble::{Window, assemble};
use super::date::{date_key, dates_match};
use super::token::{Token, tokenize};
use crate::config::consts::WINDOW_BUDGET;
use crate::core::sanitize::clip;
use crate::model::DrawRecord;
use crate::trace::{TraceEntry, TraceSink, emit, reborrow};

type DrawKey = (String, Option<String>, Vec<u8>, Option<u8>, Option<u8>);

fn key_of(r: &DrawRecord) -> DrawKey {
    let mut main = r.main.clone();
    main.sort_unstable();
    (r.date.as_deref().map(date_key).unwrap_or_default(), r.draw.clone(), main, r.jolly, r.superstar)
}

/// Up to `limit` complete, distinct draws in document order. Windows dated
/// `exclude_date` (same day, year-tolerant) are skipped.
pub fn scan_archive(
    text: &str,
    limit: usize,
    exclude_date: Option<&str>,
    trace: Option<&mut dyn TraceSink>,
) -> Vec<DrawRecord> {
    scan_archive_excluding(text, limit, exclude_date.as_slice(), trace)
}

/// `scan_archive` with any number of excluded days. Skipped windows do not
/// count against `limit`.
pub fn scan_archive_excluding(
    text: &str,
    limit: usize,
    excluded: &[&str],
    mut trace: Option<&mut dyn TraceSink>,
) -> Vec<DrawRecord> {
    let mut out: Vec<DrawRecord> = Vec::new();
    if limit == 0 {
        return out;
    }

    let tokens = tokenize(text);
    let anchors: Vec<usize> = tokens.iter().enumerate().filter(|(_, t)| t.date().is_some()).map(|(i, _)| i).collect();

    let mut seen: HashSet<DrawKey> = HashSet::new();
    let mut windows = 0usize;
    let mut incomplete = 0usize;

    for (k, &start) in anchors.iter().enumerate() {
        let next = anchors.get(k + 1).copied().unwrap_or(tokens.len());
        let end = bound_window(&tokens, start, next);
        windows += 1;

        if let Some(d) = tokens[start].date() {
            if let Some(ex) = excluded.iter().find(|ex| dates_match(ex, d)) {
                logd!("Archive: skipping window dated {d:?} (excluded)");
                emit(&mut trace, || TraceEntry::new("exclude", d).picked(Some(*ex)));
                continue;
            }
        }

        let context = window_text(text, &tokens, start, end);
        let mut record = assemble(Window { context, tokens: &tokens[start..end] }, reborrow(&mut trace));
        if let Some(id) = leading_draw_id(&tokens, start, end) {
            record.draw = Some(s!(id));
        }
        if !record.is_complete() {
            incomplete += 1;
            continue;
        }
        if !seen.insert(key_of(&record)) {
            emit(&mut trace, || TraceEntry::new("duplicate", context).picked(record.date.clone()));
            continue;
        }
        out.push(record);
        if out.len() >= limit {
            break;
        }
    }

    logd!("Archive: {} anchors, {windows} windows, {incomplete} incomplete, {} kept", anchors.len(), out.len());
    out
}

/// End index (exclusive) of the window starting at anchor `start`: the next
/// anchor, or the first token past the character budget.
fn bound_window(tokens: &[Token], start: usize, next: usize) -> usize {
    let limit = tokens[start].pos + WINDOW_BUDGET;
    tokens[start..next].iter().position(|t| t.pos >= limit).map(|off| start + off).unwrap_or(next)
}

/// Listings that print the draw id before the date leave it just ahead of
/// the anchor, and the window itself then ends on the next row's id. The id
/// ahead of the anchor wins unless the window has its own before the labels.
fn leading_draw_id(tokens: &[Token], start: usize, end: usize) -> Option<&str> {
    let before = tokens[..start].last()?.draw_id()?;
    let own = tokens[start..end].iter().take_while(|t| t.label().is_none()).any(|t| t.draw_id().is_some());
    (!own).then_some(before)
}

fn window_text<'a>(text: &'a str, tokens: &[Token], start: usize, end: usize) -> &'a str {
    let from = tokens[start].pos;
    let to = tokens.get(end).map(|t| t.pos).unwrap_or(text.len());
    clip(&text[from..to], WINDOW_BUDGET)
}
