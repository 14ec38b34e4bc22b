// src/core/dom.rs
//! Minimal document capability the extractors are written against.
//!
//! Extraction only ever needs two things from a page: the normalized text of a
//! node, and the nodes under some root that match a query. Anything DOM-like
//! can implement [`Document`]; the crate ships one implementation over
//! `scraper` and one over plain text.

use std::collections::{HashMap, HashSet};
use std::ops::Deref;

use ego_tree::NodeId as TreeId;
use scraper::{ElementRef, Html, Selector};

use super::html::{looks_like_html, strip_tags};
use super::sanitize::normalize_text;

/// Opaque handle to a node of one document. Only meaningful for the document
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// CSS selector, e.g. `"div.latest-draw"`.
    Selector(String),
    /// Elements whose normalized text contains the marker (case-insensitive).
    TextContains(String),
}

pub trait Document {
    fn root(&self) -> NodeId;

    /// Normalized (entity-decoded, whitespace-collapsed) text of `node`.
    fn text(&self, node: NodeId) -> String;

    /// Nodes under `root` matching `query`, in document order.
    fn find_all(&self, root: NodeId, query: &Query) -> Vec<NodeId>;

    fn full_text(&self) -> String {
        self.text(self.root())
    }
}

/// Pick the right implementation for a fetched body.
pub fn parse_document(body: &str) -> Box<dyn Document> {
    if looks_like_html(body) {
        Box::new(HtmlDocument::parse(body))
    } else {
        Box::new(TextDocument::new(body))
    }
}

/* ---------------- HTML (scraper) ---------------- */

/// Node ids are positions in the document-order list of elements; index 0
/// is the `<html>` root. The list is built once at parse time.
pub struct HtmlDocument {
    html: Html,
    order: Vec<TreeId>,
    index: HashMap<TreeId, usize>,
}

impl HtmlDocument {
    pub fn parse(src: &str) -> Self {
        let html = Html::parse_document(src);
        let order: Vec<TreeId> =
            html.root_element().descendants().filter_map(ElementRef::wrap).map(|e| e.deref().id()).collect();
        let index = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        Self { html, order, index }
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        let id = *self.order.get(node.0)?;
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }
}

/// Elements under `scope` (inclusive) whose text contains `marker`, which is
/// already lowercased. A node's text holds all its descendants' text, so
/// subtrees without the marker are not entered.
fn containing(scope: ElementRef<'_>, marker: &str) -> Vec<TreeId> {
    let mut out = Vec::new();
    let mut stack = vec![scope];
    while let Some(el) = stack.pop() {
        if !element_text(el).to_lowercase().contains(marker) {
            continue;
        }
        out.push(el.deref().id());
        let children: Vec<ElementRef<'_>> = el.child_elements().collect();
        stack.extend(children.into_iter().rev());
    }
    out
}

/// Text nodes joined with spaces so sibling cells never fuse; script/style
/// contents are skipped.
fn element_text(el: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else { continue };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style" | "noscript")))
            .unwrap_or(false);
        if !hidden {
            let t: &str = &text.text;
            parts.push(t);
        }
    }
    normalize_text(&parts.join(" "))
}

impl Document for HtmlDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).map(element_text).unwrap_or_default()
    }

    fn find_all(&self, root: NodeId, query: &Query) -> Vec<NodeId> {
        let Some(scope) = self.element(root) else { return Vec::new() };

        let wanted: HashSet<TreeId> = match query {
            Query::Selector(css) => {
                let Ok(sel) = Selector::parse(css) else {
                    logw!("Dom: invalid selector {css:?}");
                    return Vec::new();
                };
                scope.select(&sel).map(|e| e.deref().id()).collect()
            }
            Query::TextContains(marker) => containing(scope, &marker.to_lowercase()).into_iter().collect(),
        };

        let mut hits: Vec<NodeId> = wanted.iter().filter_map(|id| self.index.get(id)).map(|i| NodeId(*i)).collect();
        hits.sort_unstable_by_key(|n| n.0);
        hits
    }
}

/* ---------------- Plain text ---------------- */

/// A flat document: one root node, no structure. Markup, if any, is stripped.
pub struct TextDocument {
    text: String,
}

impl TextDocument {
    pub fn new(raw: &str) -> Self {
        let text = if raw.contains('<') { strip_tags(raw) } else { normalize_text(raw) };
        Self { text }
    }
}

impl Document for TextDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn text(&self, node: NodeId) -> String {
        if node.0 == 0 { self.text.clone() } else { s!() }
    }

    fn find_all(&self, root: NodeId, query: &Query) -> Vec<NodeId> {
        match query {
            Query::TextContains(marker) if root.0 == 0 && self.text.to_lowercase().contains(&marker.to_lowercase()) => {
                vec![NodeId(0)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
        <html><head><title>Results</title><script>var n = 77;</script></head>
        <body>
          <div class="jackpot">Jackpot &euro;130 Million</div>
          <div class="latest">
            <span class="date">Saturday 2 March 2024</span>
            <ul><li>5</li><li>12</li><li>34</li><li>56</li><li>78</li><li>90</li></ul>
            <p>Jolly <b>11</b></p><p>SuperStar <b>22</b></p>
          </div>
        </body></html>"#;

    #[test]
    fn text_joins_cells_and_skips_script() {
        let doc = HtmlDocument::parse(PAGE);
        let full = doc.full_text();
        assert!(full.contains("5 12 34 56 78 90"));
        assert!(!full.contains("77"));
        assert!(full.contains("€130 Million"));
    }

    #[test]
    fn selector_query_finds_container() {
        let doc = HtmlDocument::parse(PAGE);
        let hits = doc.find_all(doc.root(), &Query::Selector(s!("div.latest")));
        assert_eq!(hits.len(), 1);
        let text = doc.text(hits[0]);
        assert!(text.starts_with("Saturday 2 March 2024"));
        assert!(text.ends_with("SuperStar 22"));
    }

    #[test]
    fn marker_query_returns_all_enclosing_nodes() {
        let doc = HtmlDocument::parse(PAGE);
        let hits = doc.find_all(doc.root(), &Query::TextContains(s!("superstar")));
        // body, div.latest, the <p> itself
        assert!(hits.len() >= 3);
        let smallest = hits.iter().map(|n| doc.text(*n)).min_by_key(|t| t.len()).unwrap();
        assert_eq!(smallest, "SuperStar 22");
    }

    #[test]
    fn handles_are_stable_and_in_document_order() {
        let doc = HtmlDocument::parse(PAGE);
        let hits = doc.find_all(doc.root(), &Query::TextContains(s!("jolly")));
        assert!(hits.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(doc.text(*hits.last().unwrap()), "Jolly 11");

        // a scope below the root only sees its own subtree, itself included
        let latest = doc.find_all(doc.root(), &Query::Selector(s!("div.latest")))[0];
        let inner = doc.find_all(latest, &Query::TextContains(s!("march")));
        assert_eq!(inner.first(), Some(&latest));
        assert!(inner.iter().all(|n| n.0 >= latest.0));
        assert!(doc.find_all(latest, &Query::TextContains(s!("jackpot"))).is_empty());
    }

    #[test]
    fn bad_selector_is_empty_not_error() {
        let doc = HtmlDocument::parse(PAGE);
        assert!(doc.find_all(doc.root(), &Query::Selector(s!("div[[["))).is_empty());
    }

    #[test]
    fn text_document_has_single_root() {
        let doc = TextDocument::new("  Jolly   7 ");
        assert_eq!(doc.full_text(), "Jolly 7");
        assert_eq!(doc.find_all(doc.root(), &Query::TextContains(s!("JOLLY"))), vec![NodeId(0)]);
        assert!(doc.find_all(doc.root(), &Query::Selector(s!("div"))).is_empty());
    }
}
