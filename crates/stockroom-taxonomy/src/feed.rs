//! Delimited-text reader for the taxonomy feeds.
//!
//! The feeds are small spreadsheet exports, so this is a single-pass
//! character scanner rather than a general CSV engine. It understands quoted
//! fields (with `""` escapes and embedded newlines), CRLF line endings, and a
//! leading byte-order mark. Lines with no content are skipped.

use std::path::Path;

use crate::error::TaxonomyError;

/// A header row plus data rows, all as raw trimmed-at-access strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeedTable {
    /// Builds a table from already-split cells.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_owned()).collect();
        Self { headers, rows }
    }

    /// Parses delimited text whose first non-blank record is the header row.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::EmptyFeed`] when there is no header row and
    /// [`TaxonomyError::UnterminatedQuote`] when a quoted field never closes.
    pub fn parse(text: &str, delimiter: char) -> Result<Self, TaxonomyError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text, delimiter)?;
        if records.is_empty() {
            return Err(TaxonomyError::EmptyFeed);
        }
        let headers = records.remove(0);
        Ok(Self::new(headers, records))
    }

    /// Reads and parses a feed file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`FeedTable::parse`].
    pub fn from_path(path: &Path, delimiter: char) -> Result<Self, TaxonomyError> {
        let content = std::fs::read_to_string(path).map_err(|e| TaxonomyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, delimiter)
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the trimmed cell at `column`, or `""` for short rows.
    #[must_use]
    pub fn cell(row: &[String], column: usize) -> &str {
        row.get(column).map_or("", |s| s.trim())
    }
}

fn split_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, TaxonomyError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quote_line = line;
            }
            '\r' => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            c if c == delimiter => record.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TaxonomyError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|f| !f.trim().is_empty()) {
        records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = FeedTable::parse("Code,Category,SubCategory\n7,Plants,Succulent\n", ',')
            .expect("parse failed");
        assert_eq!(table.headers(), ["Code", "Category", "SubCategory"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows()[0], ["7", "Plants", "Succulent"]);
    }

    #[test]
    fn quoted_field_keeps_delimiters_and_escaped_quotes() {
        let text = "SubCategory,Synonyms\nRose,\"Roses, Rosebud\"\nTulip,\"6\"\" \"\"Tulip\"\"\"\n";
        let table = FeedTable::parse(text, ',').unwrap();
        assert_eq!(table.rows()[0][1], "Roses, Rosebud");
        assert_eq!(table.rows()[1][1], "6\" \"Tulip\"");
    }

    #[test]
    fn quoted_field_may_span_lines() {
        let text = "A,B\n\"line one\nline two\",x\n";
        let table = FeedTable::parse(text, ',').unwrap();
        assert_eq!(table.rows()[0][0], "line one\nline two");
        assert_eq!(table.rows()[0][1], "x");
    }

    #[test]
    fn crlf_and_bom_are_ignored() {
        let text = "\u{feff}Code,Category\r\n1,Flowers\r\n";
        let table = FeedTable::parse(text, ',').unwrap();
        assert_eq!(table.headers(), ["Code", "Category"]);
        assert_eq!(table.rows()[0], ["1", "Flowers"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\n\nCode,Category\n\n1,Flowers\n,\n2,Plants";
        let table = FeedTable::parse(text, ',').unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1], ["2", "Plants"]);
    }

    #[test]
    fn tab_delimiter() {
        let table = FeedTable::parse("Code\tCategory\n3\tFoliage\n", '\t').unwrap();
        assert_eq!(table.rows()[0], ["3", "Foliage"]);
    }

    #[test]
    fn empty_text_is_empty_feed() {
        assert!(matches!(
            FeedTable::parse("  \n\n", ','),
            Err(TaxonomyError::EmptyFeed)
        ));
    }

    #[test]
    fn unterminated_quote_reports_line() {
        let err = FeedTable::parse("A,B\n1,2\n\"open,3\n", ',').unwrap_err();
        assert!(matches!(err, TaxonomyError::UnterminatedQuote { line: 3 }));
    }

    #[test]
    fn cell_trims_and_tolerates_short_rows() {
        let row = vec!["  Rose ".to_string()];
        assert_eq!(FeedTable::cell(&row, 0), "Rose");
        assert_eq!(FeedTable::cell(&row, 4), "");
    }
}
