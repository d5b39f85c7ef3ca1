// Configuration loading

pub mod settings;

pub use settings::{ConfigError, DeckSettings, ReportSettings, Settings};
