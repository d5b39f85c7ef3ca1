use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Default word limit for a term before it is treated as a sentence or header.
pub const DEFAULT_MAX_TERM_WORDS: usize = 10;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tunables for the rejection heuristics.
///
/// The default value reproduces the stock rule set exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// A term with more whitespace-separated words than this is rejected
    /// as `TermTooLong`.
    pub max_term_words: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_term_words: DEFAULT_MAX_TERM_WORDS,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ClassifierConfig {
    pub fn from_toml(input: &str) -> Result<Self, ClassifierError> {
        let config: ClassifierConfig =
            toml::from_str(input).map_err(|e| ClassifierError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.max_term_words == 0 {
            return Err(ClassifierError::ConfigValidation(
                "max_term_words must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Override the term word limit, keeping other settings.
    pub fn with_max_term_words(mut self, max_term_words: usize) -> Self {
        self.max_term_words = max_term_words;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
