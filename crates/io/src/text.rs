// Plain text line source

use std::io::Read;
use std::path::Path;

use log::warn;

use crate::error::SourceError;

pub fn import(path: &Path) -> Result<Vec<String>, SourceError> {
    let content = read_file_as_utf8(path)?;
    Ok(lines_from_str(&content))
}

/// Read all of stdin as text (pasted vocabulary).
pub fn import_reader<R: Read>(mut reader: R) -> Result<Vec<String>, SourceError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| SourceError::read("<stdin>", e))?;
    Ok(lines_from_str(&decode_bytes(bytes, "<stdin>")))
}

/// Trimmed, non-blank lines.
pub fn lines_from_str(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, SourceError> {
    let display = path.display().to_string();
    let mut file = std::fs::File::open(path).map_err(|e| SourceError::read(&display, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| SourceError::read(&display, e))?;
    Ok(decode_bytes(bytes, &display))
}

fn decode_bytes(bytes: Vec<u8>, origin: &str) -> String {
    // Try UTF-8 first; on failure, recover the buffer from the error
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!("{origin}: not valid UTF-8, decoding as Windows-1252");
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    // Editors on Windows like to prepend a BOM
    match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
