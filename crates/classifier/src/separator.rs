//! Separator catalog and first-match-wins splitting.
//!
//! Symmetric and arrow tokens rarely occur in prose, so they match even
//! without surrounding spaces. Dash, colon and equals only count when
//! spaced, which keeps hyphenated words and ratios intact.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    Equality,
    Arrow,
    Dash,
    Colon,
    Equals,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    pub token: &'static str,
    pub kind: SeparatorKind,
}

const fn sep(token: &'static str, kind: SeparatorKind) -> Separator {
    Separator { token, kind }
}

/// Ordered catalog. Tried top to bottom; the first token present anywhere
/// in the line wins, regardless of where another token occurs.
pub const SEPARATORS: &[Separator] = &[
    sep(" == ", SeparatorKind::Equality),
    sep("==", SeparatorKind::Equality),
    sep(" -> ", SeparatorKind::Arrow),
    sep("->", SeparatorKind::Arrow),
    sep(" => ", SeparatorKind::Arrow),
    sep("=>", SeparatorKind::Arrow),
    sep(" \u{21D2} ", SeparatorKind::Arrow), // ⇒
    sep("\u{21D2}", SeparatorKind::Arrow),
    sep(" \u{2192} ", SeparatorKind::Arrow), // →
    sep("\u{2192}", SeparatorKind::Arrow),
    sep(" - ", SeparatorKind::Dash),
    sep(" \u{2013} ", SeparatorKind::Dash), // en dash
    sep(" \u{2014} ", SeparatorKind::Dash), // em dash
    sep(" : ", SeparatorKind::Colon),
    sep(" = ", SeparatorKind::Equals),
    sep("\t", SeparatorKind::Tab),
];

/// A line divided at the first occurrence of one catalog separator.
///
/// Halves are not trimmed; later occurrences of any separator stay in
/// `definition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub separator: &'static Separator,
    pub term: &'a str,
    pub definition: &'a str,
}

/// First catalog entry that occurs in `line`, if any.
pub fn find_separator(line: &str) -> Option<&'static Separator> {
    SEPARATORS.iter().find(|s| line.contains(s.token))
}

/// Split `line` once at the winning separator.
pub fn find_split(line: &str) -> Option<Split<'_>> {
    let separator = find_separator(line)?;
    let (term, definition) = line.split_once(separator.token)?;
    Some(Split { separator, term, definition })
}
