//! CLI Exit Code Registry
//!
//! Single source of truth for `vdeck` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad arguments)                          |
//! | 3    | Input could not be found or read                     |
//! | 4    | Input format not supported                           |
//! | 5    | No cards: nothing in the input looked like vocabulary |
//! | 6    | Output could not be written                          |
//! | 7    | Settings file invalid                                |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above

use vocabdeck_io::{DeckError, SourceError};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing, unreadable, or undecodable.
pub const EXIT_SOURCE_READ: u8 = 3;

/// Input extension (or `--from`) has no reader.
pub const EXIT_UNSUPPORTED_FORMAT: u8 = 4;

/// Classification accepted zero pairs; no output was written.
pub const EXIT_NO_CARDS: u8 = 5;

/// Deck or export file could not be written.
pub const EXIT_WRITE: u8 = 6;

/// Settings file unreadable or invalid (only fatal with an explicit `--config`).
pub const EXIT_INVALID_CONFIG: u8 = 7;

/// Map a SourceError to its exit code.
pub fn source_exit_code(err: &SourceError) -> u8 {
    match err {
        SourceError::NotFound(_) | SourceError::Read { .. } => EXIT_SOURCE_READ,
        SourceError::Unsupported(_) => EXIT_UNSUPPORTED_FORMAT,
    }
}

/// Map a DeckError to its exit code.
pub fn deck_exit_code(err: &DeckError) -> u8 {
    match err {
        DeckError::Empty => EXIT_NO_CARDS,
        DeckError::Io(_) | DeckError::Database(_) | DeckError::Archive(_) | DeckError::Encode(_) => EXIT_WRITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_SOURCE_READ,
            EXIT_UNSUPPORTED_FORMAT,
            EXIT_NO_CARDS,
            EXIT_WRITE,
            EXIT_INVALID_CONFIG,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn source_errors_map() {
        assert_eq!(source_exit_code(&SourceError::NotFound(PathBuf::from("x"))), EXIT_SOURCE_READ);
        assert_eq!(source_exit_code(&SourceError::Unsupported(".pdf".into())), EXIT_UNSUPPORTED_FORMAT);
    }

    #[test]
    fn deck_errors_map() {
        assert_eq!(deck_exit_code(&DeckError::Empty), EXIT_NO_CARDS);
        assert_eq!(deck_exit_code(&DeckError::Io("disk full".into())), EXIT_WRITE);
    }
}
