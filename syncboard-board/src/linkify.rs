//! Bare-URL link detection for card descriptions.
//!
//! Runs once at explicit save time, never per keystroke. URLs already
//! inside an anchor (either as the href or as the visible text) are
//! left alone, so saving twice never double-wraps.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhttps?://[^\s<>"']+"#).expect("valid URL regex"));

/// Convert bare http(s) URLs in `text` to anchor tags.
pub fn linkify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in URL_RE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        // Trailing punctuation belongs to the sentence, not the URL
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        let tail = &m.as_str()[url.len()..];

        if inside_anchor(&text[..m.start()]) {
            out.push_str(m.as_str());
        } else {
            out.push_str(&format!("<a href=\"{url}\" target=\"_blank\">{url}</a>"));
            out.push_str(tail);
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// True when the match position sits inside an existing anchor tag,
/// either in the attribute list or in the anchor body.
fn inside_anchor(prefix: &str) -> bool {
    let open = prefix.rfind("<a ").or_else(|| prefix.rfind("<a>"));
    let Some(open) = open else {
        return false;
    };
    let after_open = &prefix[open..];
    // Still inside the opening tag's attributes
    if !after_open.contains('>') {
        return true;
    }
    // Inside the anchor body until </a> closes it
    !after_open.contains("</a>")
}
