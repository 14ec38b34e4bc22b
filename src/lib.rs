// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod model;
pub mod report;
pub mod scrape;
pub mod specs;
pub mod trace;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::dom::{Document, Query};
pub use crate::core::net::{HttpLoader, Loader};
pub use model::{DrawRecord, Fetched, JackpotRecord, PreviousDraws, UnifiedResult};
pub use report::{Report, collect_report};
pub use scrape::Lotto;
