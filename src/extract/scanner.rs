//! Lightweight `<img src="...">` scanner for article HTML
//!
//! This is a heuristic over raw markup, not an HTML parser. What it sees:
//! - `<img` tags (lowercase, case-sensitive) with a standalone, double-quoted
//!   `src` attribute, e.g. `<img class="a" src="https://x/y.png">`
//! - the first such `src` in each tag
//!
//! What it does not see: single-quoted or unquoted values, `srcset`,
//! `data-src` and other prefixed attributes, `<IMG>` in uppercase, and values
//! containing `>`.
//!
//! Values are entity-decoded (`&amp;` becomes `&`) since they come from
//! markup. A value with an entity that cannot be decoded is kept verbatim.

use std::borrow::Cow;
use std::sync::OnceLock;

use quick_xml::escape::unescape;
use regex::Regex;

const IMG_SRC_PATTERN: &str = r#"<img\b[^>]*?\ssrc="([^">]+)""#;

fn img_src_regex() -> Option<&'static Regex> {
    static IMG_SRC: OnceLock<Option<Regex>> = OnceLock::new();
    IMG_SRC
        .get_or_init(|| Regex::new(IMG_SRC_PATTERN).ok())
        .as_ref()
}

/// Decoded `src` values of embedded images, in document order
pub fn scan_image_sources(html: &str) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    img_src_regex()
        .into_iter()
        .flat_map(move |re| re.captures_iter(html))
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_attribute(m.as_str()))
}

fn decode_attribute(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}
