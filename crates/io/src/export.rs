// Delimited export of accepted pairs
//
// One record per pair: term, definition. No header row, so the file can be
// fed straight to Anki's text importer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::DeckError;

/// Export `(term, definition)` pairs, usually `Classification::accepted_pairs()`.
pub fn export_csv<'a, I>(pairs: I, path: &Path) -> Result<usize, DeckError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    export_delimited(pairs, path, b',')
}

pub fn export_tsv<'a, I>(pairs: I, path: &Path) -> Result<usize, DeckError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    export_delimited(pairs, path, b'\t')
}

fn export_delimited<'a, I>(pairs: I, path: &Path, delimiter: u8) -> Result<usize, DeckError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs = pairs.into_iter().peekable();
    if pairs.peek().is_none() {
        return Err(DeckError::Empty);
    }
    let file = File::create(path)?;
    let written = write_delimited(pairs, BufWriter::new(file), delimiter)?;
    info!("exported {written} pair(s) to {}", path.display());
    Ok(written)
}

/// Write pairs to any writer. Fields containing the delimiter or quotes are quoted.
pub fn write_delimited<'a, I, W>(pairs: I, writer: W, delimiter: u8) -> Result<usize, DeckError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    W: Write,
{
    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    let mut written = 0;
    for (term, definition) in pairs {
        wtr.write_record([term, definition])?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}
