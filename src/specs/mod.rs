// src/specs/mod.rs
//! # Source “specs” module
//!
//! This module knows **how to read one mirror's page** once it is loaded. Each
//! `SourceSpec` names a `Strategy`; the functions here turn a `Document` plus
//! that strategy into text regions, and the regions into records.
//!
//! ## What lives here
//! - **Region selection** (`regions`): whole page text, or the texts of the
//!   nodes matching the source's selectors, then the smallest node carrying both
//!   bonus labels, then the whole page.
//! - **Per-field readers** (`read`): jackpot, latest draw, archive, and the
//!   unified latest + archive pass over a single document.
//!
//! ## What does **not** live here
//! - **Fetching and fallback** across mirrors: that is `scrape::Lotto`.
//! - **Token-level heuristics**: those are `extract::*`, which never see a
//!   document, only text.
//! - **Source attribution**: readers return records without `source`; the
//!   orchestrator stamps it once a record is accepted.
//!
//! ## Typical call chain
//! ```text
//! scrape::Lotto → Loader::fetch → specs::read::<field>(doc, spec)
//!                                 ↘ specs::regions → extract::*
//! ```
//!
//! ## Conventions & invariants
//! - Readers are total: a page with nothing usable yields the empty shape.
//! - Region order is precedence order; the first region that yields a complete
//!   record wins.
//! - Identical region texts are visited once.

pub mod read;
pub mod regions;

pub use read::{jackpot_from, latest_from, previous_excluding, previous_from, unified_from};
pub use regions::{archive_regions, draw_regions, jackpot_regions};
