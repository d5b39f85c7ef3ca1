// Line source dispatch by file extension

use std::path::Path;

use log::info;

use crate::error::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Csv,
    Tsv,
    Docx,
    Spreadsheet,
}

impl SourceFormat {
    /// Pick a reader from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        Self::from_extension(&ext)
            .ok_or_else(|| SourceError::Unsupported(if ext.is_empty() { "(no extension)".into() } else { format!(".{ext}") }))
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" | "text" | "md" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "docx" => Some(Self::Docx),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Docx => "docx",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

/// Read `path` into classifier lines, choosing the reader by extension.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let format = SourceFormat::from_path(path)?;
    read_lines_as(path, format)
}

/// Read `path` with an explicit reader.
pub fn read_lines_as(path: &Path, format: SourceFormat) -> Result<Vec<String>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let lines = match format {
        SourceFormat::Text => crate::text::import(path)?,
        SourceFormat::Csv => crate::csv::import(path)?,
        SourceFormat::Tsv => crate::csv::import_tsv(path)?,
        SourceFormat::Docx => crate::docx::import(path)?,
        SourceFormat::Spreadsheet => crate::xlsx::import(path)?,
    };

    info!("read {} line(s) from {} ({})", lines.len(), path.display(), format.name());
    Ok(lines)
}
