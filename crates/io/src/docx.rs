// DOCX line source
//
// Reads word/document.xml straight out of the zip container. Body
// paragraphs come first, then one line per table row with the non-empty
// cells joined by ROW_FIELD_SEPARATOR.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::SourceError;
use crate::ROW_FIELD_SEPARATOR;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn import(path: &Path) -> Result<Vec<String>, SourceError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| SourceError::read(&display, e))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| SourceError::read(&display, format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| SourceError::read(&display, format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| SourceError::read(&display, e))?;

    lines_from_document_xml(&xml).map_err(|e| SourceError::read(&display, e))
}

/// Walk the document body and flatten it into lines.
pub fn lines_from_document_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false); // preserve spaces inside runs
    let mut buf = Vec::new();
    let mut walker = Walker::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => walker.open(e.local_name().as_ref()),
            Ok(Event::Empty(ref e)) => {
                let name = e.local_name();
                walker.open(name.as_ref());
                walker.close(name.as_ref());
            }
            Ok(Event::End(ref e)) => walker.close(e.local_name().as_ref()),
            Ok(Event::Text(ref e)) if walker.in_text => {
                walker.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(ref e)) if walker.in_text => {
                if let Some(c) = resolve_entity(e.as_ref()) {
                    walker.push_char(c);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.error_position()
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    let mut lines = walker.paragraphs;
    lines.extend(walker.rows);
    Ok(lines)
}

#[derive(Default)]
struct Walker {
    paragraphs: Vec<String>,
    rows: Vec<String>,
    table_depth: usize,
    paragraph: Option<String>,
    in_run: bool,
    in_text: bool,
    cell_paragraphs: Vec<String>,
    row_cells: Vec<String>,
}

impl Walker {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"tbl" => self.table_depth += 1,
            b"tr" if self.table_depth == 1 => self.row_cells.clear(),
            b"tc" if self.table_depth == 1 => self.cell_paragraphs.clear(),
            b"p" => self.paragraph = Some(String::new()),
            b"r" => self.in_run = true,
            b"t" if self.in_run => self.in_text = true,
            b"tab" if self.in_run => self.push_char('\t'),
            b"br" | b"cr" if self.in_run => self.push_char('\n'),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"r" => self.in_run = false,
            b"p" => {
                let text = self.paragraph.take().unwrap_or_default();
                match self.table_depth {
                    0 => {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            self.paragraphs.push(trimmed.to_string());
                        }
                    }
                    1 => self.cell_paragraphs.push(text),
                    // Nested tables are not part of the outer cell's text
                    _ => {}
                }
            }
            b"tc" if self.table_depth == 1 => {
                let cell = self.cell_paragraphs.join("\n");
                self.row_cells.push(cell.trim().to_string());
                self.cell_paragraphs.clear();
            }
            b"tr" if self.table_depth == 1 => {
                let cells: Vec<&str> = self
                    .row_cells
                    .iter()
                    .map(String::as_str)
                    .filter(|c| !c.is_empty())
                    .collect();
                if !cells.is_empty() {
                    self.rows.push(cells.join(ROW_FIELD_SEPARATOR));
                }
                self.row_cells.clear();
            }
            b"tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn push_str(&mut self, s: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.push_str(s);
        }
    }

    fn push_char(&mut self, c: char) {
        if let Some(p) = self.paragraph.as_mut() {
            p.push(c);
        }
    }
}

/// Predefined XML entities and numeric character references.
fn resolve_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', b'x' | b'X', hex @ ..] => std::str::from_utf8(hex)
            .ok()
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .and_then(char::from_u32),
        [b'#', dec @ ..] => std::str::from_utf8(dec)
            .ok()
            .and_then(|d| d.parse::<u32>().ok())
            .and_then(char::from_u32),
        _ => None,
    }
}
