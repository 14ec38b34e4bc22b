// src/extract/pick.rs
//! Label-relative number picking.
//!
//! Given the index of a `Jolly`/`SuperStar` label in a token window, find the
//! number that belongs to it. Pure function of the tokens and an exclusion
//! set, so it can be exercised without any page.

use std::collections::BTreeSet;

use super::token::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Tokens after the label (the number follows its label).
    Forward,
    /// Tokens before the label (label printed under/after its ball).
    Backward,
}

/// First ball number from `label_index` in `direction` that is not a date
/// number and not in `exclude`. The scan stops at the next label or date, or
/// at the end of the window.
pub fn pick_nearest(tokens: &[Token], label_index: usize, exclude: &BTreeSet<u8>, direction: Direction) -> Option<u8> {
    if label_index >= tokens.len() {
        return None;
    }
    let qualifies = |t: &Token| t.ball().filter(|n| !exclude.contains(n));

    match direction {
        Direction::Forward => {
            for t in &tokens[label_index + 1..] {
                if t.is_boundary() {
                    return None;
                }
                if let Some(n) = qualifies(t) {
                    return Some(n);
                }
            }
        }
        Direction::Backward => {
            for t in tokens[..label_index].iter().rev() {
                if t.is_boundary() {
                    return None;
                }
                if let Some(n) = qualifies(t) {
                    return Some(n);
                }
            }
        }
    }
    None
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// `prefer` first; the other side only when nothing qualifies there.
pub fn pick_either(
    tokens: &[Token],
    label_index: usize,
    exclude: &BTreeSet<u8>,
    prefer: Direction,
) -> Option<(u8, Direction)> {
    let other = prefer.reverse();
    pick_nearest(tokens, label_index, exclude, prefer)
        .map(|n| (n, prefer))
        .or_else(|| pick_nearest(tokens, label_index, exclude, other).map(|n| (n, other)))
}
