//! Pair rejection heuristics.
//!
//! Rules run top to bottom against the trimmed halves; the first one that
//! fires decides the reason. The grammar and all-caps rules assume a
//! cased, English-style script; vocabulary in scripts without case never
//! trips the all-caps rule.

use crate::config::ClassifierConfig;
use crate::model::RejectReason;

pub struct Rule {
    pub reason: RejectReason,
    pub fires: fn(term: &str, definition: &str, config: &ClassifierConfig) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule { reason: RejectReason::EmptyTermOrDef, fires: is_empty_pair },
    Rule { reason: RejectReason::GrammarPattern, fires: is_grammar_pattern },
    Rule { reason: RejectReason::TermTooLong, fires: is_term_too_long },
    Rule { reason: RejectReason::AllCapsHeader, fires: is_all_caps_header },
];

/// First rule that rejects the pair, or `None` if it looks like vocabulary.
pub fn check_pair(term: &str, definition: &str, config: &ClassifierConfig) -> Option<RejectReason> {
    let term = term.trim();
    let definition = definition.trim();
    RULES
        .iter()
        .find(|rule| (rule.fires)(term, definition, config))
        .map(|rule| rule.reason)
}

fn is_empty_pair(term: &str, definition: &str, _: &ClassifierConfig) -> bool {
    term.is_empty() || definition.is_empty()
}

// "S+Verb", "Subject + verb + object" and similar rule annotations.
fn is_grammar_pattern(term: &str, _: &str, _: &ClassifierConfig) -> bool {
    term.contains('+') && term.to_lowercase().contains("verb")
}

fn is_term_too_long(term: &str, _: &str, config: &ClassifierConfig) -> bool {
    term.split_whitespace().count() > config.max_term_words
}

fn is_all_caps_header(term: &str, _: &str, _: &ClassifierConfig) -> bool {
    is_upper(term) && term.split_whitespace().count() > 1
}

/// At least one cased character, and none of them lower-case.
fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
