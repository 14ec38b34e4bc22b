// src/extract/assemble.rs
//! One token window → one `DrawRecord`.
//!
//! The window is whatever the caller bounded: a container's text, or the span
//! between two date anchors of an archive listing. The record is returned as
//! found; callers decide whether it is complete enough to keep.

use std::collections::BTreeSet;

use super::pick::{Direction, pick_either, pick_nearest};
use super::token::{LabelKind, Token, tokenize};
use crate::config::consts::MAIN_COUNT;
use crate::model::DrawRecord;
use crate::trace::{TraceEntry, TraceSink, emit};

/// A bounded slice of tokens plus the text it came from (for trace context).
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    pub context: &'a str,
    pub tokens: &'a [Token],
}

pub fn assemble(window: Window<'_>, mut trace: Option<&mut dyn TraceSink>) -> DrawRecord {
    let tokens = window.tokens;

    // (a) first occurrence of each label, in document order
    let mut labels: Vec<(LabelKind, usize)> = Vec::with_capacity(2);
    for kind in [LabelKind::Jolly, LabelKind::SuperStar] {
        if let Some(i) = tokens.iter().position(|t| t.label() == Some(kind)) {
            labels.push((kind, i));
        }
    }
    labels.sort_by_key(|(_, i)| *i);

    // (b) head: everything before the first label
    let head_end = labels.first().map(|(_, i)| *i).unwrap_or(tokens.len());

    // (c) first six distinct balls of the head
    let mut main: Vec<u8> = Vec::with_capacity(MAIN_COUNT);
    for t in &tokens[..head_end] {
        if main.len() == MAIN_COUNT {
            break;
        }
        if let Some(n) = t.ball() {
            if !main.contains(&n) {
                main.push(n);
            }
        }
    }
    emit(&mut trace, || {
        let shown = main.iter().map(u8::to_string).collect::<Vec<_>>().join(" ");
        TraceEntry::new("main", window.context).picked(Some(shown))
    });

    // (d) bonus numbers, each excluding main and the other bonus
    let mut claimed: BTreeSet<u8> = main.iter().copied().collect();
    let prefer = label_side(tokens, &labels, &claimed);
    if prefer == Direction::Backward {
        logd!("Assemble: labels follow their numbers");
    }
    let mut jolly = None;
    let mut superstar = None;
    for (kind, idx) in labels {
        let pick = pick_either(tokens, idx, &claimed, prefer);
        if let Some((n, dir)) = pick {
            claimed.insert(n);
            if dir != prefer {
                logd!("Assemble: {} resolved {dir:?} to {n}", kind.as_str());
            }
        }
        let value = pick.map(|(n, _)| n);
        match kind {
            LabelKind::Jolly => jolly = value,
            LabelKind::SuperStar => superstar = value,
        }
        emit(&mut trace, || TraceEntry::new(kind.as_str(), window.context).label(kind.as_str()).picked(value));
    }

    // (e) date, (f) draw id
    let date = tokens.iter().find_map(|t| t.date()).map(|d| s!(d));
    let draw = tokens.iter().find_map(|t| t.draw_id()).map(|d| s!(d));
    emit(&mut trace, || TraceEntry::new("date", window.context).picked(date.clone()));

    DrawRecord { date, draw, main, jolly, superstar, source: None }
}

/// Which side of its label a bonus number sits on, decided once per window.
///
/// Labels normally lead their numbers. When the last label has nothing after
/// it but a free number right before it (`… 90 11 Jolly 22 SuperStar`), the
/// whole window is read label-after; reading it forward would hand the Jolly
/// the SuperStar's number.
fn label_side(tokens: &[Token], labels: &[(LabelKind, usize)], main: &BTreeSet<u8>) -> Direction {
    let Some(&(_, last)) = labels.last() else { return Direction::Forward };
    let ahead = pick_nearest(tokens, last, main, Direction::Forward);
    let behind = pick_nearest(tokens, last, main, Direction::Backward);
    if labels.len() > 1 && ahead.is_none() && behind.is_some() {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

/// Tokenize and assemble a whole region in one go.
pub fn assemble_text(text: &str, trace: Option<&mut dyn TraceSink>) -> DrawRecord {
    let tokens = tokenize(text);
    assemble(Window { context: text, tokens: &tokens }, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceLog;

    #[test]
    fn assembles_a_complete_record() {
        let r = assemble_text("Saturday 2 March 2024 Drawing n. 27 5 12 34 56 78 90 Jolly 11 SuperStar 22", None);
        assert_eq!(r.date.as_deref(), Some("2 March 2024"));
        assert_eq!(r.draw.as_deref(), Some("27"));
        assert_eq!(r.main, vec![5, 12, 34, 56, 78, 90]);
        assert_eq!(r.jolly, Some(11));
        assert_eq!(r.superstar, Some(22));
        assert!(r.is_complete());
    }

    #[test]
    fn superstar_before_jolly() {
        let r = assemble_text("2 March 2024 5 12 34 56 78 90 SuperStar 22 Jolly 11", None);
        assert_eq!(r.jolly, Some(11));
        assert_eq!(r.superstar, Some(22));
    }

    #[test]
    fn bonus_equal_to_a_main_is_not_taken() {
        // "12" after Jolly is a repeated main number (e.g. a highlighted ball);
        // the next free number is the jolly.
        let r = assemble_text("2 March 2024 5 12 34 56 78 90 Jolly 12 40 SuperStar 22", None);
        assert_eq!(r.jolly, Some(40));
        assert_eq!(r.superstar, Some(22));
        assert!(r.is_complete());
    }

    #[test]
    fn date_after_numbers_still_found() {
        let r = assemble_text("5 12 34 56 78 90 Jolly 11 SuperStar 22 drawn on March 2, 2024", None);
        assert_eq!(r.date.as_deref(), Some("March 2, 2024"));
        assert!(r.is_complete());
    }

    #[test]
    fn labels_printed_after_their_numbers() {
        let r = assemble_text("2 March 2024 5 12 34 56 78 90 11 Jolly 22 SuperStar", None);
        assert_eq!(r.main, vec![5, 12, 34, 56, 78, 90]);
        assert_eq!((r.jolly, r.superstar), (Some(11), Some(22)));
        assert!(r.is_complete());

        let r = assemble_text("2 March 2024 5 12 34 56 78 90 22 SuperStar 11 Jolly", None);
        assert_eq!((r.jolly, r.superstar), (Some(11), Some(22)));
    }

    #[test]
    fn numbers_drawn_wording_keeps_first_ball() {
        let r = assemble_text("2 March 2024 Numbers drawn 5 12 34 56 78 90 Jolly 11 SuperStar 22", None);
        assert_eq!(r.draw, None);
        assert_eq!(r.main, vec![5, 12, 34, 56, 78, 90]);
        assert!(r.is_complete());
    }

    #[test]
    fn missing_label_leaves_field_empty() {
        let r = assemble_text("2 March 2024 5 12 34 56 78 90 Jolly 11", None);
        assert_eq!(r.superstar, None);
        assert!(!r.is_complete());
    }

    #[test]
    fn duplicate_balls_in_head_counted_once() {
        let r = assemble_text("2 March 2024 5 5 12 34 56 78 90 Jolly 11 SuperStar 22", None);
        assert_eq!(r.main, vec![5, 12, 34, 56, 78, 90]);
    }

    #[test]
    fn records_each_decision() {
        let mut log = TraceLog::new();
        assemble_text("2 March 2024 5 12 34 56 78 90 Jolly 11 SuperStar 22", Some(&mut log));
        let stages: Vec<_> = log.entries.iter().map(|e| e.stage.as_str()).collect();
        assert_eq!(stages, vec!["main", "jolly", "superstar", "date"]);
        assert_eq!(log.entries[1].picked.as_deref(), Some("11"));
        assert_eq!(log.entries[0].picked.as_deref(), Some("5 12 34 56 78 90"));
    }
}
