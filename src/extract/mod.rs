// src/extract/mod.rs
//! # Extraction
//!
//! Text in, records out. Nothing here knows about URLs, mirrors or markup:
//! the callers in `specs` hand over normalized region text and get back draws,
//! dates and amounts.
//!
//! ## Pipeline
//! ```text
//! region text → token::tokenize → assemble (one window)      → DrawRecord
//!                               ↘ archive (date-anchored windows) → Vec<DrawRecord>
//! region text → jackpot::extract_jackpot                       → "€130 Million"
//! ```
//!
//! ## Conventions
//! - Pure functions. Same text, same output.
//! - Every decision (main run, each bonus pick, the date) can be reported to an
//!   optional `TraceSink`; passing `None` costs nothing.
//! - Records are returned as found. Completeness is checked by whoever decides
//!   to keep or discard them (`archive` drops incomplete windows, the
//!   orchestrator moves to the next source).

pub mod archive;
pub mod assemble;
pub mod date;
pub mod jackpot;
pub mod pick;
pub mod token;

pub use archive::{scan_archive, scan_archive_excluding};
pub use assemble::{Window, assemble, assemble_text};
pub use date::{CanonicalDate, Month, canonicalize, date_key, dates_match};
pub use jackpot::{extract_jackpot, find_amounts};
pub use pick::{Direction, pick_either, pick_nearest};
pub use token::{LabelKind, Token, TokenKind, tokenize, tokenize_window};
