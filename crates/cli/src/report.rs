//! Human-readable parsing report and the `--json` run summary.

use std::io::{self, Write};

use serde::Serialize;
use vocabdeck_classifier::{Classification, ClassificationStats, Entry};
use vocabdeck_config::ReportSettings;

use crate::util::{display_width, pad_right, truncate_display};

/// Widest reason label ("Grammar Pattern (S+Verb)").
const REASON_COLUMN: usize = 24;

pub(crate) struct ReportOptions {
    pub max_rejections: usize,
    pub line_width: usize,
    /// List every evaluated line (accepted and rejected) in input order.
    pub all: bool,
}

impl ReportOptions {
    pub fn from_settings(settings: &ReportSettings, all: bool) -> Self {
        Self {
            max_rejections: settings.max_rejections,
            line_width: settings.line_width,
            all,
        }
    }
}

pub(crate) fn write_report(out: &mut dyn Write, result: &Classification, opts: &ReportOptions) -> io::Result<()> {
    let stats = &result.stats;
    writeln!(out, "--- PARSING REPORT ---")?;
    writeln!(out, "Lines evaluated:  {}", stats.total)?;
    writeln!(out, "Cards created:    {}", stats.accepted)?;
    writeln!(out, "Lines rejected:   {}", stats.rejected)?;

    let counts = result.reason_counts();
    if !counts.is_empty() {
        writeln!(out)?;
        for (reason, n) in &counts {
            writeln!(out, "  {} {n}", pad_right(&reason.to_string(), REASON_COLUMN))?;
        }
    }

    if opts.all {
        writeln!(out)?;
        writeln!(out, "--- All lines ---")?;
        for entry in result.merged() {
            let row = match entry {
                Entry::Accepted(p) => format!("  {:>5}  ok    {} = {}", p.index + 1, p.term, p.definition),
                Entry::Rejected(r) => format!(
                    "  {:>5}  skip  [{}] {}",
                    r.index + 1,
                    r.reason,
                    r.line
                ),
            };
            writeln!(out, "{}", truncate_display(&row, opts.line_width))?;
        }
        return Ok(());
    }

    if result.rejected.is_empty() || opts.max_rejections == 0 {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "--- Rejected lines (first {}) ---", opts.max_rejections)?;
    for rejected in result.rejected.iter().take(opts.max_rejections) {
        let prefix = format!(
            "  {:>5}  {}  ",
            rejected.index + 1,
            pad_right(&rejected.reason.to_string(), REASON_COLUMN)
        );
        let room = opts.line_width.saturating_sub(display_width(&prefix));
        writeln!(out, "{prefix}{}", truncate_display(&rejected.line, room))?;
    }
    if result.rejected.len() > opts.max_rejections {
        writeln!(out, "  ... and {} more", result.rejected.len() - opts.max_rejections)?;
    }
    Ok(())
}

/// Single JSON value printed to stdout by `convert --json`.
#[derive(Debug, Serialize)]
pub(crate) struct RunSummary {
    pub input: String,
    /// `None` when nothing was written (zero cards).
    pub output: Option<String>,
    pub target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    pub stats: ClassificationStats,
    pub rejections: serde_json::Map<String, serde_json::Value>,
}

impl RunSummary {
    pub fn new(input: String, target: &'static str, deck: Option<String>, result: &Classification) -> Self {
        let rejections = result
            .reason_counts()
            .into_iter()
            .map(|(reason, n)| (reason.tag().to_string(), serde_json::Value::from(n)))
            .collect();
        Self { input, output: None, target, deck, stats: result.stats, rejections }
    }
}
