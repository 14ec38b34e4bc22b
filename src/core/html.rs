// src/core/html.rs
// Markup stripping for raw HTML strings (no DOM). Used for text fixtures and as
// the fallback when a page cannot be handed to the DOM layer.

use super::sanitize::{clip, normalize_text};

/// Remove all tags, replacing each with a space so adjacent cells
/// (`<li>5</li><li>12</li>`) never fuse into one number. `<script>` and
/// `<style>` bodies are dropped. Entities are decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let lc = s.to_ascii_lowercase();

    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    while i < s.len() {
        let rest = &s[i..];
        let Some(lt) = rest.find('<') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..lt]);
        let tag_start = i + lt;

        // Skip raw-text elements wholesale.
        if let Some(end) = raw_text_end(&lc, tag_start) {
            out.push(' ');
            i = end;
            continue;
        }

        match s[tag_start..].find('>') {
            Some(gt) => {
                out.push(' ');
                i = tag_start + gt + 1;
            }
            // Dangling '<' : keep it as text.
            None => {
                out.push_str(&s[tag_start..]);
                break;
            }
        }
    }
    normalize_text(&out)
}

fn raw_text_end(lc: &str, at: usize) -> Option<usize> {
    for name in ["script", "style"] {
        let open = join!("<", name);
        if lc[at..].starts_with(&open) {
            let close = join!("</", name, ">");
            return lc[at..].find(&close).map(|rel| at + rel + close.len());
        }
    }
    None
}

/// Heuristic: does this look like markup rather than plain text?
pub fn looks_like_html(s: &str) -> bool {
    let head = clip(s, 512).to_ascii_lowercase();
    head.contains("<html") || head.contains("<!doctype") || head.contains("<body") || head.contains("<div")
}
