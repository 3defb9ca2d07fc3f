//! Spreadsheet column mapping
//!
//! Maps the logical fields of a schedule row onto spreadsheet column letters
//! and converts those letters into zero-based indices.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest column a worksheet can address (`XFD`), zero-based
const MAX_COLUMN_INDEX: usize = 16_383;

/// Convert a spreadsheet column letter into a zero-based index.
///
/// Letters are case-insensitive and surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use plx_common::column_index;
///
/// assert_eq!(column_index("A").unwrap(), 0);
/// assert_eq!(column_index("r").unwrap(), 17);
/// assert_eq!(column_index("AA").unwrap(), 26);
/// assert!(column_index("A1").is_err());
/// ```
pub fn column_index(letters: &str) -> Result<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(Error::InvalidInput("Empty column letter".to_string()));
    }

    let mut number: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(Error::InvalidInput(format!(
                "Invalid column letter '{}'",
                letters
            )));
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        number = number
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .filter(|n| *n - 1 <= MAX_COLUMN_INDEX)
            .ok_or_else(|| {
                Error::InvalidInput(format!("Column '{}' is beyond the last column", letters))
            })?;
    }

    Ok(number - 1)
}

/// Logical field of a schedule source row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnField {
    TrackName,
    Version,
    Album,
    Composers,
    Publishers,
}

impl ColumnField {
    /// Configuration key of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnField::TrackName => "track_name",
            ColumnField::Version => "version",
            ColumnField::Album => "album",
            ColumnField::Composers => "composers",
            ColumnField::Publishers => "publishers",
        }
    }
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical field → column letter mapping, as written in the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub track_name: String,
    pub version: String,
    pub album: String,
    pub composers: String,
    pub publishers: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            track_name: "R".to_string(),
            version: "S".to_string(),
            album: "P".to_string(),
            composers: "W".to_string(),
            publishers: "AA".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Column letter configured for a field
    pub fn letter(&self, field: ColumnField) -> &str {
        match field {
            ColumnField::TrackName => &self.track_name,
            ColumnField::Version => &self.version,
            ColumnField::Album => &self.album,
            ColumnField::Composers => &self.composers,
            ColumnField::Publishers => &self.publishers,
        }
    }

    /// Validate every letter and convert the mapping into zero-based indices
    pub fn resolve(&self) -> Result<ResolvedColumns> {
        let index_of = |field: ColumnField| {
            column_index(self.letter(field)).map_err(|e| {
                Error::Config(format!("columns.{}: {}", field, e))
            })
        };

        Ok(ResolvedColumns {
            track_name: index_of(ColumnField::TrackName)?,
            version: index_of(ColumnField::Version)?,
            album: index_of(ColumnField::Album)?,
            composers: index_of(ColumnField::Composers)?,
            publishers: index_of(ColumnField::Publishers)?,
        })
    }
}

/// Column mapping with every letter already converted to an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub track_name: usize,
    pub version: usize,
    pub album: usize,
    pub composers: usize,
    pub publishers: usize,
}

impl ResolvedColumns {
    /// Zero-based index of a field
    pub fn index(&self, field: ColumnField) -> usize {
        match field {
            ColumnField::TrackName => self.track_name,
            ColumnField::Version => self.version,
            ColumnField::Album => self.album,
            ColumnField::Composers => self.composers,
            ColumnField::Publishers => self.publishers,
        }
    }

    /// Smallest row width that can satisfy every field
    pub fn required_width(&self) -> usize {
        [
            self.track_name,
            self.version,
            self.album,
            self.composers,
            self.publishers,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}
