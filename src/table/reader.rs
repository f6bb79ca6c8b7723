//! CSV rule table reader
//!
//! - Header row names the columns; column order is free
//! - Leading and trailing whitespace is insignificant (headers and fields)
//! - A leading UTF-8 byte-order mark is stripped

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::errors::{TableError, TableResult};
use super::row::{RuleRow, REQUIRED_COLUMNS};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Rule rows in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rows: Vec<RuleRow>,
}

impl RuleTable {
    /// Reads a table from a CSV file.
    pub fn from_path(path: &Path) -> TableResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Reads a table from any UTF-8 reader.
    pub fn from_reader<R: Read>(mut reader: R) -> TableResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Parses CSV text.
    pub fn parse(content: &str) -> TableResult<Self> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| TableError::Malformed {
                row: 1,
                reason: e.to_string(),
            })?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(TableError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<RuleRow>().enumerate() {
            let row = record.map_err(|e| TableError::Malformed {
                // 1-based, plus the header row
                row: index + 2,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }

        Ok(Self { rows })
    }

    /// Rows in table order
    pub fn rows(&self) -> &[RuleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
