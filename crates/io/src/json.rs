// JSON classification report

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use vocabdeck_classifier::Classification;

use crate::error::DeckError;

/// Write the whole classification (pairs, rejections, stats) as pretty JSON.
pub fn export(classification: &Classification, path: &Path) -> Result<(), DeckError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report(classification, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(classification: &Classification, writer: W) -> Result<(), DeckError> {
    serde_json::to_writer_pretty(writer, classification)?;
    Ok(())
}
