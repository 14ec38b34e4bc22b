// src/scrape/mod.rs
mod lotto;

pub use lotto::Lotto;
pub use lotto::Sourced;
