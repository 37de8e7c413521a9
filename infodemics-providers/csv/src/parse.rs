//! Record splitting and header lookup for comma-separated tables.
//!
//! Fields may be wrapped in double quotes, in which case they can hold
//! commas, doubled quotes and line breaks.
use std::{io::BufRead, mem};

use crate::errors::CsvProviderError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One row of a table together with the line it started on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    pub(crate) const fn line(&self) -> usize {
        self.line
    }

    /// Returns the trimmed value at `index`, or `None` when it is blank or
    /// the row is short.
    pub(crate) fn value(&self, index: usize) -> Option<&str> {
        self.fields
            .get(index)
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[derive(Default)]
struct Scan {
    fields: Vec<String>,
    field: String,
    quoted: bool,
}

impl Scan {
    fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if self.quoted {
                if ch != '"' {
                    self.field.push(ch);
                } else if chars.peek() == Some(&'"') {
                    chars.next();
                    self.field.push('"');
                } else {
                    self.quoted = false;
                }
                continue;
            }
            match ch {
                '"' => self.quoted = true,
                ',' => self.fields.push(mem::take(&mut self.field)),
                _ => self.field.push(ch),
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.fields.push(self.field);
        self.fields
    }
}

/// Pulls records from a buffered reader, skipping blank lines.
pub(crate) struct RecordReader<'a, R> {
    inner: R,
    file: &'a str,
    line: usize,
    buf: String,
}

impl<'a, R: BufRead> RecordReader<'a, R> {
    pub(crate) fn new(inner: R, file: &'a str) -> Self {
        Self {
            inner,
            file,
            line: 0,
            buf: String::new(),
        }
    }

    fn read_line(&mut self) -> Result<bool, CsvProviderError> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        let trimmed = self.buf.trim_end_matches(['\n', '\r']).len();
        self.buf.truncate(trimmed);
        if self.line == 1 && self.buf.starts_with(BYTE_ORDER_MARK) {
            self.buf.replace_range(..BYTE_ORDER_MARK.len_utf8(), "");
        }
        Ok(true)
    }

    /// Returns the next non-blank record.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::UnterminatedQuote`] when input ends
    /// inside a quoted field, or [`CsvProviderError::Io`] on read failure.
    pub(crate) fn next_record(&mut self) -> Result<Option<Record>, CsvProviderError> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if !self.buf.trim().is_empty() {
                break;
            }
        }
        let line = self.line;
        let mut scan = Scan::default();
        scan.feed(&self.buf);
        while scan.quoted {
            if !self.read_line()? {
                return Err(CsvProviderError::UnterminatedQuote {
                    file: self.file.to_owned(),
                    line,
                });
            }
            scan.field.push('\n');
            scan.feed(&self.buf);
        }
        Ok(Some(Record {
            line,
            fields: scan.finish(),
        }))
    }
}

/// Column positions resolved from a header row.
#[derive(Clone, Debug)]
pub(crate) struct Header {
    columns: Vec<String>,
}

impl Header {
    pub(crate) fn from_record(record: Record) -> Self {
        Self {
            columns: record
                .fields
                .into_iter()
                .map(|column| column.trim().to_owned())
                .collect(),
        }
    }

    /// Returns the index of the first column matching any of `names`, in
    /// the order the names are given.
    pub(crate) fn position(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.columns.iter().position(|column| column == name))
    }

    /// Like [`Self::position`] but reports the column as missing.
    pub(crate) fn require(
        &self,
        file: &str,
        column: &'static str,
        aliases: &[&str],
    ) -> Result<usize, CsvProviderError> {
        self.position(aliases)
            .ok_or_else(|| CsvProviderError::MissingColumn {
                file: file.to_owned(),
                column,
            })
    }
}
