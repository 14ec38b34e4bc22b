// src/specs/regions.rs
//! Strategy → text regions, in precedence order.

use crate::config::options::Strategy;
use crate::core::dom::{Document, NodeId, Query};

/// Marker used to find a draw box when no selector matched.
const LABEL_MARKERS: [&str; 2] = ["superstar", "jolly"];

/// Regions to read a single draw from. `Container` adds the smallest node
/// carrying both bonus labels before the whole-page fallback.
pub fn draw_regions(doc: &dyn Document, strategy: &Strategy) -> Vec<String> {
    match strategy {
        Strategy::PageText => vec![doc.full_text()],
        Strategy::Container(selectors) => {
            let mut out = selector_texts(doc, selectors);
            if let Some(node) = smallest_with_labels(doc) {
                push_unique(&mut out, doc.text(node));
            }
            push_unique(&mut out, doc.full_text());
            out
        }
    }
}

/// Regions to scan as an archive listing: selector matches, then the page.
pub fn archive_regions(doc: &dyn Document, strategy: &Strategy) -> Vec<String> {
    match strategy {
        Strategy::PageText => vec![doc.full_text()],
        Strategy::Container(selectors) => {
            let mut out = selector_texts(doc, selectors);
            push_unique(&mut out, doc.full_text());
            out
        }
    }
}

/// Regions to look for the jackpot in. Same shape as the archive regions.
pub fn jackpot_regions(doc: &dyn Document, strategy: &Strategy) -> Vec<String> {
    archive_regions(doc, strategy)
}

fn selector_texts(doc: &dyn Document, selectors: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for sel in selectors {
        let hits = doc.find_all(doc.root(), &Query::Selector(sel.clone()));
        if !hits.is_empty() {
            logd!("Specs: selector {sel:?} matched {} node(s)", hits.len());
        }
        for node in hits {
            push_unique(&mut out, doc.text(node));
        }
    }
    out
}

/// Smallest (by text length) node whose text carries every label marker.
fn smallest_with_labels(doc: &dyn Document) -> Option<NodeId> {
    let [first, rest @ ..] = LABEL_MARKERS;
    doc.find_all(doc.root(), &Query::TextContains(s!(first)))
        .into_iter()
        .map(|node| (node, doc.text(node)))
        .filter(|(_, text)| {
            let lc = text.to_lowercase();
            rest.iter().all(|m| lc.contains(m))
        })
        .min_by_key(|(_, text)| text.len())
        .map(|(node, _)| node)
}

fn push_unique(out: &mut Vec<String>, text: String) {
    if !text.is_empty() && !out.contains(&text) {
        out.push(text);
    }
}
