use std::fmt;

/// Errors raised while building a classifier configuration.
///
/// Classification itself never fails: unrecognized lines become
/// [`RejectedLine`](crate::model::RejectedLine) records instead.
#[derive(Debug)]
pub enum ClassifierError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (out-of-range threshold, etc.).
    ConfigValidation(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "classifier config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "classifier config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ClassifierError {}
