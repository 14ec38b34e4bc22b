// src/specs/read.rs
//! Per-field readers over one loaded document.

use crate::config::options::{SourceSpec, Strategy};
use crate::core::dom::Document;
use crate::extract::{assemble_text, extract_jackpot, scan_archive, scan_archive_excluding};
use crate::model::{DrawRecord, JackpotRecord, PreviousDraws, UnifiedResult};
use crate::trace::{TraceEntry, TraceSink, emit, reborrow};

use super::regions::{archive_regions, draw_regions, jackpot_regions};

/// First region with a euro amount; the largest amount of that region.
pub fn jackpot_from(doc: &dyn Document, spec: &SourceSpec, mut trace: Option<&mut dyn TraceSink>) -> JackpotRecord {
    for region in jackpot_regions(doc, &spec.strategy) {
        if let Some(amount) = extract_jackpot(&region) {
            emit(&mut trace, || TraceEntry::new("jackpot", &region).picked(Some(&amount)));
            return JackpotRecord { source: None, amount: Some(amount) };
        }
    }
    emit(&mut trace, || TraceEntry::new("jackpot", "").picked(None::<String>));
    JackpotRecord::empty()
}

/// Most recent draw on the page.
///
/// Container regions are tried whole first (a results box holds one draw),
/// then as an archive whose first complete entry is taken. Page text goes
/// straight to the archive scan: the newest draw is listed first.
pub fn latest_from(doc: &dyn Document, spec: &SourceSpec, mut trace: Option<&mut dyn TraceSink>) -> DrawRecord {
    for region in draw_regions(doc, &spec.strategy) {
        if matches!(spec.strategy, Strategy::Container(_)) {
            let whole = assemble_text(&region, reborrow(&mut trace));
            if whole.is_complete() {
                return whole;
            }
        }
        if let Some(first) = scan_archive(&region, 1, None, reborrow(&mut trace)).into_iter().next() {
            return first;
        }
    }
    DrawRecord::empty()
}

/// Up to `limit` archive draws from the first region that has any.
pub fn previous_from(
    doc: &dyn Document,
    spec: &SourceSpec,
    limit: usize,
    exclude_date: Option<&str>,
    trace: Option<&mut dyn TraceSink>,
) -> PreviousDraws {
    previous_excluding(doc, spec, limit, exclude_date.as_slice(), trace)
}

/// `previous_from` skipping every day in `excluded`.
pub fn previous_excluding(
    doc: &dyn Document,
    spec: &SourceSpec,
    limit: usize,
    excluded: &[&str],
    mut trace: Option<&mut dyn TraceSink>,
) -> PreviousDraws {
    for region in archive_regions(doc, &spec.strategy) {
        let draws = scan_archive_excluding(&region, limit, excluded, reborrow(&mut trace));
        if !draws.is_empty() {
            return PreviousDraws { source: None, draws };
        }
    }
    PreviousDraws::empty()
}

/// Latest draw and the archive behind it, from the same document. The
/// archive never repeats the latest draw's date, nor any day in `excluded`.
pub fn unified_from(
    doc: &dyn Document,
    spec: &SourceSpec,
    limit: usize,
    excluded: &[&str],
    mut trace: Option<&mut dyn TraceSink>,
) -> UnifiedResult {
    let latest = latest_from(doc, spec, reborrow(&mut trace));
    if !latest.is_complete() {
        return UnifiedResult::empty();
    }
    let mut skip: Vec<&str> = latest.date.as_deref().into_iter().collect();
    skip.extend_from_slice(excluded);
    let previous = previous_excluding(doc, spec, limit, &skip, reborrow(&mut trace));
    UnifiedResult { latest: Some(latest), previous }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::{HtmlDocument, TextDocument};
    use crate::trace::TraceLog;

    const RESULTS: &str = r#"<html><body>
        <div class="next">Next draw Tuesday 5 March 2024. Jackpot €130 Million (minimum €2 Million)</div>
        <div class="latest">
          <h3>Saturday 2 March 2024</h3>
          <ul><li>5</li><li>12</li><li>34</li><li>56</li><li>78</li><li>90</li></ul>
          <p>Jolly <b>11</b></p><p>SuperStar <b>22</b></p>
        </div>
        <table class="archive">
          <tr><td>Saturday 2 March 2024</td><td>5 12 34 56 78 90</td><td>Jolly 11</td><td>SuperStar 22</td></tr>
          <tr><td>Thursday 29 February 2024</td><td>1 2 3 4 5 6</td><td>Jolly 7</td><td>SuperStar 8</td></tr>
          <tr><td>Tuesday 27 February 2024</td><td>10 20 30 40 50 60</td><td>Jolly 70</td><td>SuperStar 80</td></tr>
        </table>
    </body></html>"#;

    fn spec(strategy: Strategy) -> SourceSpec {
        SourceSpec::new("test", "https://test.example/", strategy)
    }

    #[test]
    fn jackpot_is_largest_in_first_region() {
        let doc = HtmlDocument::parse(RESULTS);
        let j = jackpot_from(&doc, &spec(Strategy::Container(vec![s!(".next")])), None);
        assert_eq!(j.amount.as_deref(), Some("€130 Million"));
        assert_eq!(j.source, None);
    }

    #[test]
    fn latest_from_container() {
        let doc = HtmlDocument::parse(RESULTS);
        let r = latest_from(&doc, &spec(Strategy::Container(vec![s!(".latest")])), None);
        assert!(r.is_complete());
        assert_eq!(r.main, vec![5, 12, 34, 56, 78, 90]);
        assert_eq!((r.jolly, r.superstar), (Some(11), Some(22)));
    }

    #[test]
    fn latest_from_page_text_takes_first_archive_entry() {
        let doc = TextDocument::new("Results Saturday 2 March 2024 5 12 34 56 78 90 Jolly 11 SuperStar 22");
        let r = latest_from(&doc, &spec(Strategy::PageText), None);
        assert_eq!(r.date.as_deref(), Some("2 March 2024"));
        assert!(r.is_complete());
    }

    #[test]
    fn previous_respects_limit() {
        let doc = HtmlDocument::parse(RESULTS);
        let p = previous_from(&doc, &spec(Strategy::Container(vec![s!(".archive")])), 2, None, None);
        assert_eq!(p.draws.len(), 2);
        assert_eq!(p.draws[1].date.as_deref(), Some("29 February 2024"));
    }

    #[test]
    fn unified_excludes_latest_from_archive() {
        let doc = HtmlDocument::parse(RESULTS);
        let mut log = TraceLog::new();
        let u = unified_from(&doc, &spec(Strategy::Container(vec![s!(".latest")])), 10, &[], Some(&mut log));
        let latest = u.latest.unwrap();
        assert_eq!(latest.date.as_deref(), Some("2 March 2024"));
        assert_eq!(u.previous.draws.len(), 2);
        assert!(u.previous.draws.iter().all(|d| d.date.as_deref() != Some("2 March 2024")));
        assert!(log.entries.iter().any(|e| e.stage == "exclude"));
    }

    #[test]
    fn unified_fills_limit_past_an_extra_exclusion() {
        let doc = HtmlDocument::parse(RESULTS);
        let s = spec(Strategy::Container(vec![s!(".latest")]));
        let u = unified_from(&doc, &s, 1, &["29 February 2024"], None);
        let dates: Vec<_> = u.previous.draws.iter().filter_map(|d| d.date.as_deref()).collect();
        assert_eq!(dates, vec!["27 February 2024"]);
    }

    #[test]
    fn nothing_usable_is_empty() {
        let doc = TextDocument::new("Site under maintenance");
        let s = spec(Strategy::PageText);
        assert_eq!(jackpot_from(&doc, &s, None), JackpotRecord::empty());
        assert_eq!(latest_from(&doc, &s, None), DrawRecord::empty());
        assert_eq!(unified_from(&doc, &s, 5, &[], None), UnifiedResult::empty());
    }
}
