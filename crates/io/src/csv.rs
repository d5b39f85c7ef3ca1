// CSV/TSV line source
//
// Each row becomes one classifier line: fields trimmed, empty fields
// dropped, the rest joined with ROW_FIELD_SEPARATOR.

use std::path::Path;

use crate::error::SourceError;
use crate::text::read_file_as_utf8;
use crate::ROW_FIELD_SEPARATOR;

pub fn import(path: &Path) -> Result<Vec<String>, SourceError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter, &path.display().to_string())
}

pub fn import_tsv(path: &Path) -> Result<Vec<String>, SourceError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t', &path.display().to_string())
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                ::csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

pub fn import_from_string(content: &str, delimiter: u8, origin: &str) -> Result<Vec<String>, SourceError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut lines = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SourceError::read(origin, e))?;
        let fields: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if !fields.is_empty() {
            lines.push(fields.join(ROW_FIELD_SEPARATOR));
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn sniff_comma() {
        assert_eq!(sniff_delimiter("apple,pomme\ndog,chien\n"), b',');
    }

    #[test]
    fn sniff_semicolon() {
        assert_eq!(sniff_delimiter("apple;pomme, fruit\ndog;chien\n"), b';');
    }

    #[test]
    fn sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("apple - pomme\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn rows_join_non_empty_fields() {
        let lines = import_from_string(" apple , a fruit ,\n,,\ndog,,chien\n", b',', "t").unwrap();
        assert_eq!(lines, vec!["apple - a fruit", "dog - chien"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let lines = import_from_string("\"to run, to sprint\",courir\n", b',', "t").unwrap();
        assert_eq!(lines, vec!["to run, to sprint - courir"]);
    }

    #[test]
    fn single_field_rows_stay_as_is() {
        let lines = import_from_string("HEADER\nkatze,cat\n", b',', "t").unwrap();
        assert_eq!(lines, vec!["HEADER", "katze - cat"]);
    }

    #[test]
    fn import_tsv_file() {
        let mut f = NamedTempFile::with_suffix(".tsv").unwrap();
        f.write_all(b"hund\tdog\nkatze\tcat, feline\n").unwrap();
        let lines = import_tsv(f.path()).unwrap();
        assert_eq!(lines, vec!["hund - dog", "katze - cat, feline"]);
    }
}
