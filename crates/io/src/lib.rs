// Line sources and deck writers
//
// Sources flatten a document (plain text, delimited rows, DOCX paragraphs
// and tables, spreadsheet rows) into text lines for the classifier.
// Writers package accepted pairs as an Anki .apkg, CSV/TSV, or a JSON report.

pub mod apkg;
pub mod csv;
pub mod docx;
pub mod error;
pub mod export;
pub mod json;
pub mod source;
pub mod text;
pub mod xlsx;

pub use error::{DeckError, SourceError};
pub use source::{read_lines, read_lines_as, SourceFormat};

/// Joins the cells of one tabular row into a single classifier line.
pub const ROW_FIELD_SEPARATOR: &str = " - ";
