use serde::Serialize;

// ---------------------------------------------------------------------------
// Per-line outcome
// ---------------------------------------------------------------------------

/// Result of running a single raw line through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank, or nothing left after stripping the leading marker. Not counted.
    Skipped,
    Accepted { term: String, definition: String },
    Rejected(RejectReason),
}

// ---------------------------------------------------------------------------
// Rejection taxonomy
// ---------------------------------------------------------------------------

/// Closed set of reasons a non-blank line is not turned into a card.
///
/// Serializes as the tag name (`"NoSeparator"`, ...). `Display` gives the
/// human label used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectReason {
    NoSeparator,
    EmptyTermOrDef,
    GrammarPattern,
    TermTooLong,
    AllCapsHeader,
}

impl RejectReason {
    pub const ALL: [RejectReason; 5] = [
        Self::NoSeparator,
        Self::EmptyTermOrDef,
        Self::GrammarPattern,
        Self::TermTooLong,
        Self::AllCapsHeader,
    ];

    /// Stable machine tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NoSeparator => "NoSeparator",
            Self::EmptyTermOrDef => "EmptyTermOrDef",
            Self::GrammarPattern => "GrammarPattern",
            Self::TermTooLong => "TermTooLong",
            Self::AllCapsHeader => "AllCapsHeader",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSeparator => write!(f, "No Separator"),
            Self::EmptyTermOrDef => write!(f, "Empty Term/Def"),
            Self::GrammarPattern => write!(f, "Grammar Pattern (S+Verb)"),
            Self::TermTooLong => write!(f, "Term too long"),
            Self::AllCapsHeader => write!(f, "All Caps Header"),
        }
    }
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// A line that became a card. `index` is the line's position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedPair {
    pub index: usize,
    pub term: String,
    pub definition: String,
}

/// A non-blank line that was not turned into a card.
///
/// `line` is the trimmed original text, before marker stripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    pub index: usize,
    pub line: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    pub accepted: Vec<AcceptedPair>,
    pub rejected: Vec<RejectedLine>,
    pub stats: ClassificationStats,
}

/// One evaluated line, borrowed from a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Accepted(&'a AcceptedPair),
    Rejected(&'a RejectedLine),
}

impl Entry<'_> {
    pub fn index(&self) -> usize {
        match self {
            Entry::Accepted(p) => p.index,
            Entry::Rejected(r) => r.index,
        }
    }
}

impl Classification {
    /// `(term, definition)` view of the accepted pairs, in input order.
    pub fn accepted_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.accepted
            .iter()
            .map(|p| (p.term.as_str(), p.definition.as_str()))
    }

    /// All evaluated lines, accepted and rejected, back in input order.
    pub fn merged(&self) -> Vec<Entry<'_>> {
        let mut out = Vec::with_capacity(self.accepted.len() + self.rejected.len());
        let mut a = self.accepted.iter().peekable();
        let mut r = self.rejected.iter().peekable();
        loop {
            match (a.peek(), r.peek()) {
                (Some(p), Some(rej)) => {
                    if p.index < rej.index {
                        out.push(Entry::Accepted(p));
                        a.next();
                    } else {
                        out.push(Entry::Rejected(rej));
                        r.next();
                    }
                }
                (Some(p), None) => {
                    out.push(Entry::Accepted(p));
                    a.next();
                }
                (None, Some(rej)) => {
                    out.push(Entry::Rejected(rej));
                    r.next();
                }
                (None, None) => break,
            }
        }
        out
    }

    /// Rejection counts per reason, in taxonomy order. Reasons with no
    /// rejections are omitted.
    pub fn reason_counts(&self) -> Vec<(RejectReason, usize)> {
        RejectReason::ALL
            .iter()
            .filter_map(|reason| {
                let n = self.rejected.iter().filter(|r| r.reason == *reason).count();
                (n > 0).then_some((*reason, n))
            })
            .collect()
    }
}
