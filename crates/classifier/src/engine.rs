use log::{debug, info};

use crate::config::ClassifierConfig;
use crate::heuristics::check_pair;
use crate::marker::strip_leading_marker;
use crate::model::{
    AcceptedPair, Classification, ClassificationStats, LineOutcome, RejectReason, RejectedLine,
};
use crate::separator::find_split;

/// Classify lines with the default rule set.
pub fn classify<I, S>(lines: I) -> Classification
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classify_with(lines, &ClassifierConfig::default())
}

/// Classify every line independently and collect the results in input order.
///
/// `index` on each record is the position of the line in `lines`, counting
/// skipped lines, so callers can map records back to the source.
pub fn classify_with<I, S>(lines: I, config: &ClassifierConfig) -> Classification
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let raw = raw.as_ref();
        match classify_line(raw, config) {
            LineOutcome::Skipped => {}
            LineOutcome::Accepted { term, definition } => {
                accepted.push(AcceptedPair { index, term, definition });
            }
            LineOutcome::Rejected(reason) => {
                let line = raw.trim();
                debug!("line {}: rejected ({}): {}", index + 1, reason.tag(), line);
                rejected.push(RejectedLine { index, line: line.to_string(), reason });
            }
        }
    }

    let stats = ClassificationStats {
        total: accepted.len() + rejected.len(),
        accepted: accepted.len(),
        rejected: rejected.len(),
    };
    info!(
        "classified {} line(s): {} accepted, {} rejected",
        stats.total, stats.accepted, stats.rejected
    );

    Classification { accepted, rejected, stats }
}

/// Run one raw line through trim → strip marker → split → validate.
pub fn classify_line(raw: &str, config: &ClassifierConfig) -> LineOutcome {
    let original = raw.trim();
    if original.is_empty() {
        return LineOutcome::Skipped;
    }

    let cleaned = strip_leading_marker(original);
    if cleaned.is_empty() {
        return LineOutcome::Skipped;
    }

    let Some(split) = find_split(cleaned) else {
        return LineOutcome::Rejected(RejectReason::NoSeparator);
    };

    let term = split.term.trim();
    let definition = split.definition.trim();

    match check_pair(term, definition, config) {
        Some(reason) => LineOutcome::Rejected(reason),
        None => LineOutcome::Accepted {
            term: term.to_string(),
            definition: definition.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> LineOutcome {
        classify_line(line, &ClassifierConfig::default())
    }

    fn accepted(term: &str, definition: &str) -> LineOutcome {
        LineOutcome::Accepted { term: term.into(), definition: definition.into() }
    }

    #[test]
    fn numbered_line() {
        assert_eq!(one("1. apple - a fruit"), accepted("apple", "a fruit"));
    }

    #[test]
    fn arrow_bullet_then_colon() {
        assert_eq!(one("-> hello : salut"), accepted("hello", "salut"));
    }

    #[test]
    fn grammar_pattern_rejected() {
        assert_eq!(
            one("S+Verb = subject-verb agreement"),
            LineOutcome::Rejected(RejectReason::GrammarPattern)
        );
    }

    #[test]
    fn all_caps_header_rejected() {
        assert_eq!(
            one("CHAPTER ONE OVERVIEW - intro"),
            LineOutcome::Rejected(RejectReason::AllCapsHeader)
        );
    }

    #[test]
    fn prose_has_no_separator() {
        assert_eq!(
            one("just some prose with no marker"),
            LineOutcome::Rejected(RejectReason::NoSeparator)
        );
    }

    #[test]
    fn blank_and_marker_only_lines_skip() {
        assert_eq!(one(""), LineOutcome::Skipped);
        assert_eq!(one("   \t "), LineOutcome::Skipped);
        assert_eq!(one("\u{2022}"), LineOutcome::Skipped);
        assert_eq!(one("7."), LineOutcome::Skipped);
    }

    #[test]
    fn empty_definition() {
        // Bare arrow split with nothing after it.
        assert_eq!(one("apple ->"), LineOutcome::Rejected(RejectReason::EmptyTermOrDef));
    }

    #[test]
    fn leading_arrow_not_used_as_separator() {
        assert_eq!(one("\u{2192} apple - pomme"), accepted("apple", "pomme"));
    }

    #[test]
    fn second_separator_stays_in_definition() {
        assert_eq!(one("time : le temps : weather"), accepted("time", "le temps : weather"));
    }

    #[test]
    fn run_keeps_original_line_in_rejections() {
        let result = classify(["  1. NO SEPARATOR HERE  ", "2. S+verb : rule"]);
        assert_eq!(result.rejected.len(), 2);
        assert_eq!(result.rejected[0].line, "1. NO SEPARATOR HERE");
        assert_eq!(result.rejected[0].reason, RejectReason::NoSeparator);
        assert_eq!(result.rejected[1].line, "2. S+verb : rule");
        assert_eq!(result.rejected[1].reason, RejectReason::GrammarPattern);
    }

    #[test]
    fn run_counts_only_evaluated_lines() {
        let lines = vec!["", "apple - pomme", "   ", "prose", "->", "dog = chien"];
        let result = classify(&lines);
        assert_eq!(result.stats, ClassificationStats { total: 3, accepted: 2, rejected: 1 });
        assert_eq!(result.accepted[0].index, 1);
        assert_eq!(result.rejected[0].index, 3);
        assert_eq!(result.accepted[1].index, 5);
    }

    #[test]
    fn empty_input() {
        let result = classify(Vec::<String>::new());
        assert_eq!(result.stats, ClassificationStats::default());
        assert!(result.accepted.is_empty());
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn config_threshold_applies() {
        let config = ClassifierConfig::default().with_max_term_words(1);
        let result = classify_with(["red apple - pomme rouge", "apple - pomme"], &config);
        assert_eq!(result.stats.accepted, 1);
        assert_eq!(result.rejected[0].reason, RejectReason::TermTooLong);
    }
}
