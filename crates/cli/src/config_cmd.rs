//! `vdeck config`: where settings live and what is in effect.

use clap::Subcommand;
use vocabdeck_config::Settings;

use crate::CliError;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the settings file location
    Path,

    /// Print the effective settings as TOML (file values over defaults)
    #[command(after_help = "\
Examples:
  vdeck config show
  vdeck --config ./team.toml config show")]
    Show,
}

pub fn cmd_config(cmd: ConfigCommands, settings: &Settings, explicit: Option<&std::path::Path>) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Path => {
            let path = explicit.map(|p| p.to_path_buf()).unwrap_or_else(Settings::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let text = settings
                .to_toml()
                .map_err(|e| CliError::general(format!("cannot render settings: {e}")))?;
            print!("{text}");
            Ok(())
        }
    }
}
