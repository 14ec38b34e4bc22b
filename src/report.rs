// src/report.rs
//! The combined answer: jackpot, latest draw and archive, keyed by field.
//!
//! Jackpot and unified results come from independent sources and run side by
//! side. When no source produced a unified result, the latest draw and the
//! archive are asked for separately.

use std::thread;

use serde::Serialize;

use crate::{
    config::options::RequestOptions,
    core::net::Loader,
    model::{DrawRecord, ErrorMap, Fetched, JackpotRecord, PreviousDraws, UnifiedResult},
    scrape::Lotto,
    trace::{TraceEntry, TraceLog, TraceSink},
};

pub const NO_RESULT: &str = "no source yielded a result";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub jackpot: JackpotRecord,
    pub latest: DrawRecord,
    pub previous: PreviousDraws,
    /// One message per field that came back empty or needed a fallback.
    pub errors: ErrorMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<TraceEntry>>,
}

pub fn collect_report<L: Loader>(lotto: &Lotto<L>, opts: &RequestOptions) -> Report {
    let limit = opts.clamped_limit();
    let debug = opts.debug;
    let requested: Vec<&str> = opts.exclude_date.as_deref().into_iter().collect();

    let ((jackpot, jackpot_log), (unified, unified_log)) = thread::scope(|s| {
        let jackpot = s.spawn(|| {
            let mut log = TraceLog::new();
            let got = lotto.get_jackpot_traced(sink(debug, &mut log));
            (got, log)
        });
        let mut log = TraceLog::new();
        let unified = lotto.get_unified_results_excluding(limit, &requested, sink(debug, &mut log));
        let jackpot = match jackpot.join() {
            Ok(done) => done,
            Err(_) => {
                loge!("Report: jackpot worker panicked");
                (Fetched::default(), TraceLog::new())
            }
        };
        (jackpot, (unified, log))
    });

    let mut errors = ErrorMap::new();
    let mut entries = jackpot_log.into_entries();
    entries.extend(unified_log.into_entries());

    note(&mut errors, "jackpot", jackpot.value.is_complete(), &jackpot.errors);

    let (latest, previous) = if unified.value.is_complete() {
        let UnifiedResult { latest, previous } = unified.value;
        (latest.unwrap_or_default(), previous)
    } else {
        logf!("Report: no unified source, asking latest and previous separately");
        let mut log = TraceLog::new();
        let latest = lotto.get_latest_draw_traced(sink(debug, &mut log));
        let mut skip: Vec<&str> = latest.value.date.as_deref().into_iter().collect();
        skip.extend_from_slice(&requested);
        let previous = lotto.get_previous_draws_excluding(limit, &skip, sink(debug, &mut log));
        entries.extend(log.into_entries());

        note(&mut errors, "latest", latest.value.is_complete(), &merged(&unified.errors, &latest.errors));
        note(&mut errors, "previous", !previous.value.draws.is_empty(), &merged(&unified.errors, &previous.errors));
        (latest.value, previous.value)
    };

    Report { jackpot: jackpot.value, latest, previous, errors, debug: debug.then_some(entries) }
}

fn sink(debug: bool, log: &mut TraceLog) -> Option<&mut dyn TraceSink> {
    let log: &mut dyn TraceSink = log;
    debug.then_some(log)
}

/// Record a field-level message unless the field came back filled.
fn note(errors: &mut ErrorMap, field: &str, filled: bool, per_source: &ErrorMap) {
    if filled {
        return;
    }
    let message = if per_source.is_empty() {
        s!(NO_RESULT)
    } else {
        per_source.iter().map(|(source, e)| format!("{source}: {e}")).collect::<Vec<_>>().join("; ")
    };
    errors.insert(s!(field), message);
}

fn merged(a: &ErrorMap, b: &ErrorMap) -> ErrorMap {
    let mut out = a.clone();
    for (k, v) in b {
        out.entry(k.clone()).and_modify(|e| *e = join!(e.as_str(), "; ", v)).or_insert_with(|| v.clone());
    }
    out
}
