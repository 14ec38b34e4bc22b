// src/trace.rs
//! Optional diagnostic channel for disambiguation decisions.
//!
//! Callers that want to compare picks against ground truth pass a sink down
//! the call chain; everybody else passes `None`. Only the component making a
//! decision writes to it.

use serde::Serialize;

use crate::core::sanitize::clip;
use crate::config::consts::TRACE_CONTEXT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Which decision: `"main"`, `"jolly"`, `"superstar"`, `"date"`, `"jackpot"`, `"source"`…
    pub stage: String,
    /// Label or marker involved, if any.
    pub label: Option<String>,
    /// Picked value, rendered as text.
    pub picked: Option<String>,
    /// Text of the region the decision was made in (clipped).
    pub context: String,
    pub source: Option<String>,
}

impl TraceEntry {
    pub fn new(stage: &str, context: &str) -> Self {
        Self { stage: s!(stage), label: None, picked: None, context: s!(clip(context, TRACE_CONTEXT)), source: None }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(s!(label));
        self
    }

    pub fn picked<T: ToString>(mut self, picked: Option<T>) -> Self {
        self.picked = picked.map(|p| p.to_string());
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.source = Some(s!(source));
        self
    }
}

pub trait TraceSink {
    fn record(&mut self, entry: TraceEntry);
}

/// Collects every entry in order.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    pub entries: Vec<TraceEntry>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }
}

/// Tags every entry with the source it came from before forwarding.
pub struct SourceTagged<'a> {
    pub source: &'a str,
    pub inner: &'a mut dyn TraceSink,
}

impl TraceSink for SourceTagged<'_> {
    fn record(&mut self, entry: TraceEntry) {
        let entry = if entry.source.is_some() { entry } else { entry.source(self.source) };
        self.inner.record(entry);
    }
}

/// Reborrow an optional sink for a callee, leaving it usable afterwards.
pub fn reborrow<'s>(sink: &'s mut Option<&mut dyn TraceSink>) -> Option<&'s mut dyn TraceSink> {
    match sink {
        Some(s) => Some(&mut **s),
        None => None,
    }
}

/// Record into an optional sink.
pub fn emit(sink: &mut Option<&mut dyn TraceSink>, entry: impl FnOnce() -> TraceEntry) {
    if let Some(s) = sink.as_deref_mut() {
        s.record(entry());
    }
}
