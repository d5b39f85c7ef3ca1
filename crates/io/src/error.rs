use std::fmt;
use std::path::PathBuf;

/// Failure to turn a document into lines. Fatal for the whole run.
#[derive(Debug)]
pub enum SourceError {
    /// Input path does not exist.
    NotFound(PathBuf),
    /// Extension (or explicit format name) is not a supported line source.
    Unsupported(String),
    /// File could not be read or decoded (IO, archive, XML, spreadsheet).
    Read { path: String, message: String },
}

impl SourceError {
    pub(crate) fn read(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Read { path: path.into(), message: message.to_string() }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::Unsupported(what) => write!(f, "unsupported file format: {what}"),
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Failure while writing a deck or export artifact.
#[derive(Debug)]
pub enum DeckError {
    /// Nothing to write.
    Empty,
    /// Filesystem error creating or writing the output.
    Io(String),
    /// SQLite error while building the collection database.
    Database(String),
    /// Zip packaging error.
    Archive(String),
    /// Serialization error (JSON / CSV).
    Encode(String),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no cards to write"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Database(msg) => write!(f, "collection database error: {msg}"),
            Self::Archive(msg) => write!(f, "package archive error: {msg}"),
            Self::Encode(msg) => write!(f, "encoding error: {msg}"),
        }
    }
}

impl std::error::Error for DeckError {}

impl From<std::io::Error> for DeckError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<rusqlite::Error> for DeckError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<zip::result::ZipError> for DeckError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e.to_string())
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

impl From<::csv::Error> for DeckError {
    fn from(e: ::csv::Error) -> Self {
        Self::Encode(e.to_string())
    }
}
