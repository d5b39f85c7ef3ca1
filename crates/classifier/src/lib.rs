//! `vocabdeck-classifier`: heuristic vocabulary line classifier.
//!
//! Pure engine crate: receives raw text lines, returns accepted
//! term/definition pairs plus rejected lines with a reason tag.
//! No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod marker;
pub mod model;
pub mod separator;

pub use config::ClassifierConfig;
pub use engine::{classify, classify_line, classify_with};
pub use error::ClassifierError;
pub use model::{
    AcceptedPair, Classification, ClassificationStats, Entry, LineOutcome, RejectReason,
    RejectedLine,
};
