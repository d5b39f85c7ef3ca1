// vdeck - turn loosely formatted vocabulary notes into Anki decks

mod check;
mod config_cmd;
mod convert;
mod exit_codes;
mod report;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::warn;
use tracing_subscriber::EnvFilter;
use vocabdeck_config::Settings;

use check::{cmd_check, CheckArgs};
use config_cmd::{cmd_config, ConfigCommands};
use convert::{cmd_convert, ConvertArgs, InputFormat, OutputTarget};
use exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_SUCCESS};

/// Environment variable holding the log filter (e.g. `VDECK_LOG=debug`).
const LOG_ENV: &str = "VDECK_LOG";

#[derive(Parser)]
#[command(name = "vdeck")]
#[command(about = "Turn vocabulary notes into Anki flashcard decks")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/vocabdeck/settings.toml)
    #[arg(long, global = true, env = "VDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging on stderr (overridden by VDECK_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every line of a document and write the vocabulary as a deck
    #[command(after_help = "\
Examples:
  vdeck convert french.docx
  vdeck convert words.txt --deck \"Spanish::Food\" -o food.apkg
  vdeck convert list.csv -t tsv -o list-clean.tsv
  pbpaste | vdeck convert - --deck Inbox
  vdeck convert notes.md --json -q")]
    Convert {
        /// Input document (.txt .md .csv .tsv .docx .xlsx .xls .ods), or - for stdin
        input: PathBuf,

        /// Deck name (default from settings: "Imported Vocabulary")
        #[arg(long)]
        deck: Option<String>,

        /// Fixed Anki deck id (default: derived from the deck name)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        deck_id: Option<i64>,

        /// Output file (default: <input stem>.<target> in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output kind
        #[arg(long, short = 't', value_enum, default_value_t = OutputTarget::Apkg)]
        to: OutputTarget,

        /// Input reader, overriding the file extension
        #[arg(long, short = 'f', value_enum)]
        from: Option<InputFormat>,

        /// Reject terms with more words than this
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        max_term_words: Option<usize>,

        /// Print a JSON run summary to stdout
        #[arg(long)]
        json: bool,

        /// Suppress the parsing report
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Classify a document and report, without writing a deck
    #[command(after_help = "\
Examples:
  vdeck check french.docx
  vdeck check words.txt --all
  vdeck check list.csv --json | jq '.stats'")]
    Check {
        /// Input document, or - for stdin
        input: PathBuf,

        /// Input reader, overriding the file extension
        #[arg(long, short = 'f', value_enum)]
        from: Option<InputFormat>,

        /// Reject terms with more words than this
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        max_term_words: Option<usize>,

        /// Print the full classification as JSON
        #[arg(long)]
        json: bool,

        /// List every line with its outcome
        #[arg(long)]
        all: bool,
    },

    /// Inspect settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the log -> tracing bridge for the library crates.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Explicit `--config` must load; the default location degrades to defaults.
fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    match explicit {
        Some(path) => Settings::load_from(path).map_err(|e| CliError {
            code: EXIT_INVALID_CONFIG,
            message: e.to_string(),
            hint: Some("fix the file, or drop --config to use defaults".into()),
        }),
        None => Ok(Settings::load().unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            Settings::default()
        })),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert { input, deck, deck_id, output, to, from, max_term_words, json, quiet } => cmd_convert(
            ConvertArgs { input, deck, deck_id, output, to, from, max_term_words, json, quiet },
            &settings,
        ),
        Commands::Check { input, from, max_term_words, json, all } => {
            cmd_check(CheckArgs { input, from, max_term_words, json, all }, &settings)
        }
        Commands::Config(cmd) => cmd_config(cmd, &settings, cli.config.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
