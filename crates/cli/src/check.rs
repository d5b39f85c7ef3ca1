//! `vdeck check`: classify and report, write nothing.

use std::io::{self, Write};
use std::path::PathBuf;

use vocabdeck_classifier::classify_with;
use vocabdeck_config::Settings;

use crate::convert::{classifier_config, read_input, InputFormat};
use crate::exit_codes::EXIT_ERROR;
use crate::report::{write_report, ReportOptions};
use crate::CliError;

pub struct CheckArgs {
    pub input: PathBuf,
    pub from: Option<InputFormat>,
    pub max_term_words: Option<usize>,
    pub json: bool,
    pub all: bool,
}

pub fn cmd_check(args: CheckArgs, settings: &Settings) -> Result<(), CliError> {
    let config = classifier_config(settings, args.max_term_words)?;
    let lines = read_input(&args.input, args.from)?;
    let result = classify_with(&lines, &config);

    let mut stdout = io::stdout().lock();
    let written = if args.json {
        vocabdeck_io::json::write_report(&result, &mut stdout)
            .map_err(|e| e.to_string())
            .and_then(|()| writeln!(stdout).map_err(|e| e.to_string()))
    } else {
        let opts = ReportOptions::from_settings(&settings.report, args.all);
        write_report(&mut stdout, &result, &opts).map_err(|e| e.to_string())
    };
    written.map_err(|e| CliError { code: EXIT_ERROR, message: format!("cannot write report: {e}"), hint: None })
}
