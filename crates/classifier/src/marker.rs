//! Leading-marker stripping (list numbering, bullets, arrows).

use std::sync::LazyLock;
use regex::Regex;

/// One numbering token (`12.`) or one run of bullet/arrow glyphs, anchored
/// at the start of the line, plus surrounding whitespace.
static LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\.|[\u{2022}\-\u{2013}\u{2014}>\u{2192}\u{21D2}\u{25CF}*]+)\s*")
        .expect("leading marker pattern is valid")
});

/// Remove a leading marker and trim the remainder.
///
/// Only the start of the line is touched, so `"-> apple - fruit"` becomes
/// `"apple - fruit"` and the real separator stays visible.
pub fn strip_leading_marker(line: &str) -> &str {
    match LEADING_MARKER.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}
