// Spreadsheet line source (xlsx, xls, xlsb, ods)
//
// Every sheet in workbook order; each row's non-empty cells joined with
// ROW_FIELD_SEPARATOR.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use log::debug;

use crate::error::SourceError;
use crate::ROW_FIELD_SEPARATOR;

pub fn import(path: &Path) -> Result<Vec<String>, SourceError> {
    let display = path.display().to_string();
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| SourceError::read(&display, format!("failed to open spreadsheet: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(SourceError::read(&display, "spreadsheet contains no sheets"));
    }

    let mut lines = Vec::new();
    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            SourceError::read(&display, format!("failed to read sheet '{sheet_name}': {e}"))
        })?;

        let before = lines.len();
        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(cell_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !cells.is_empty() {
                lines.push(cells.join(ROW_FIELD_SEPARATOR));
            }
        }
        debug!("{display}: sheet '{sheet_name}' gave {} line(s)", lines.len() - before);
    }

    Ok(lines)
}

/// Render one cell the way it reads on screen.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE".into() } else { "FALSE".into() },
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => {
            let n = dt.as_f64();
            if n.fract() == 0.0 { format!("{}", n as i64) } else { format!("{n}") }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
