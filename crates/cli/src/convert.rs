//! `vdeck convert`: notes in, deck out.

use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use vocabdeck_classifier::{classify_with, ClassifierConfig, Classification};
use vocabdeck_config::Settings;
use vocabdeck_io::apkg::{self, Deck};
use vocabdeck_io::{export, json, text, SourceFormat};

use crate::exit_codes::{deck_exit_code, source_exit_code, EXIT_NO_CARDS, EXIT_USAGE, EXIT_WRITE};
use crate::report::{write_report, ReportOptions, RunSummary};
use crate::CliError;

/// Output file stem when reading from stdin.
const STDIN_STEM: &str = "pasted_text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Text,
    Csv,
    Tsv,
    Docx,
    Xlsx,
}

impl From<InputFormat> for SourceFormat {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Text => SourceFormat::Text,
            InputFormat::Csv => SourceFormat::Csv,
            InputFormat::Tsv => SourceFormat::Tsv,
            InputFormat::Docx => SourceFormat::Docx,
            InputFormat::Xlsx => SourceFormat::Spreadsheet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputTarget {
    #[default]
    Apkg,
    Csv,
    Tsv,
    Json,
}

impl OutputTarget {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apkg => "apkg",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

pub struct ConvertArgs {
    pub input: PathBuf,
    pub deck: Option<String>,
    pub deck_id: Option<i64>,
    pub output: Option<PathBuf>,
    pub to: OutputTarget,
    pub from: Option<InputFormat>,
    pub max_term_words: Option<usize>,
    pub json: bool,
    pub quiet: bool,
}

/// Read the input (`-` is stdin, always plain text) into lines.
pub(crate) fn read_input(input: &Path, from: Option<InputFormat>) -> Result<Vec<String>, CliError> {
    let result = if input == Path::new("-") {
        text::import_reader(io::stdin().lock())
    } else {
        match from {
            Some(f) => vocabdeck_io::read_lines_as(input, f.into()),
            None => vocabdeck_io::read_lines(input),
        }
    };

    result.map_err(|e| {
        let code = source_exit_code(&e);
        let err = CliError { code, message: e.to_string(), hint: None };
        match e {
            vocabdeck_io::SourceError::Unsupported(_) => {
                err.with_hint("supported: .txt .md .csv .tsv .docx .xlsx .xls .ods (or pass --from)")
            }
            _ => err,
        }
    })
}

/// Settings classifier config with the command-line override applied.
pub(crate) fn classifier_config(settings: &Settings, max_term_words: Option<usize>) -> Result<ClassifierConfig, CliError> {
    let mut config = settings.classifier.clone();
    if let Some(n) = max_term_words {
        config = config.with_max_term_words(n);
    }
    config
        .validate()
        .map_err(|e| CliError { code: EXIT_USAGE, message: e.to_string(), hint: None })?;
    Ok(config)
}

/// `<input stem>.<ext>` in the current directory.
fn default_output(input: &Path, target: OutputTarget) -> PathBuf {
    let stem = if input == Path::new("-") {
        STDIN_STEM.to_string()
    } else {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| STDIN_STEM.to_string())
    };
    PathBuf::from(format!("{stem}.{}", target.name()))
}

fn write_output(
    target: OutputTarget,
    deck: &Deck,
    result: &Classification,
    path: &Path,
) -> Result<(), vocabdeck_io::DeckError> {
    match target {
        OutputTarget::Apkg => apkg::write_apkg(deck, &result.accepted, path).map(|_| ()),
        OutputTarget::Csv => export::export_csv(result.accepted_pairs(), path).map(|_| ()),
        OutputTarget::Tsv => export::export_tsv(result.accepted_pairs(), path).map(|_| ()),
        OutputTarget::Json => json::export(result, path),
    }
}

pub fn cmd_convert(args: ConvertArgs, settings: &Settings) -> Result<(), CliError> {
    let config = classifier_config(settings, args.max_term_words)?;
    let lines = read_input(&args.input, args.from)?;
    let result = classify_with(&lines, &config);

    let input_label = args.input.display().to_string();
    let deck_name = args.deck.clone().unwrap_or_else(|| settings.deck.name.clone());
    let deck_label = (args.to == OutputTarget::Apkg).then(|| deck_name.clone());
    let mut summary = RunSummary::new(input_label.clone(), args.to.name(), deck_label, &result);

    if !args.quiet {
        let opts = ReportOptions::from_settings(&settings.report, false);
        write_report(&mut io::stderr().lock(), &result, &opts)
            .map_err(|e| CliError { code: EXIT_WRITE, message: format!("cannot write report: {e}"), hint: None })?;
    }

    if result.accepted.is_empty() {
        if args.json {
            print_summary(&summary)?;
        }
        return Err(CliError {
            code: EXIT_NO_CARDS,
            message: format!("no cards created from {input_label}; nothing written"),
            hint: Some("each line needs a term and a definition joined by a separator such as ' - ', '->', or a tab".into()),
        });
    }

    let output = args.output.unwrap_or_else(|| default_output(&args.input, args.to));
    let deck = match args.deck_id {
        Some(id) => Deck::with_id(deck_name, id),
        None => Deck::new(deck_name),
    };
    debug!("writing {} to {} (deck id {})", args.to.name(), output.display(), deck.id);

    write_output(args.to, &deck, &result, &output).map_err(|e| CliError {
        code: deck_exit_code(&e),
        message: format!("cannot write {}: {e}", output.display()),
        hint: None,
    })?;

    if !args.quiet {
        eprintln!();
        eprintln!("wrote {} card(s) to {}", result.stats.accepted, output.display());
    }

    summary.output = Some(output.display().to_string());
    if args.json {
        print_summary(&summary)?;
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}
