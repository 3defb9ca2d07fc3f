//! Source spreadsheet reading
//!
//! Workbooks are read from their first worksheet with calamine; CSV files are
//! read headerless with the csv crate. Neither reader skips header rows.
//!
//! A worksheet range stops at its last used cell, so a column that is blank
//! on every row is missing from the range entirely. Workbook rows are padded
//! with blank cells up to the caller's minimum width. CSV records are taken
//! as written.

use crate::cell::{CellValue, RawRow, SheetRows};
use crate::error::{ScheduleError, ScheduleResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// Spreadsheet formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Workbook),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// Read every row of a source spreadsheet.
///
/// `min_width` is the number of columns workbook rows are padded to, usually
/// [`ResolvedColumns::required_width`](plx_common::ResolvedColumns::required_width).
pub fn read_sheet(path: &Path, min_width: usize) -> ScheduleResult<SheetRows> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| ScheduleError::UnsupportedFormat(path.to_path_buf()))?;

    let rows = match format {
        SourceFormat::Workbook => read_workbook_rows(path, min_width)?,
        SourceFormat::Csv => read_csv_rows(path)?,
    };

    debug!(path = %path.display(), rows = rows.len(), "Read source rows");
    Ok(SheetRows::new(path.display().to_string(), rows))
}

fn workbook_error(path: &Path, message: impl ToString) -> ScheduleError {
    ScheduleError::Workbook {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn read_workbook_rows(path: &Path, min_width: usize) -> ScheduleResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error(path, "No worksheet found"))?
        .map_err(|e| workbook_error(path, e))?;

    // Ranges start at the first used cell; pad so that index 0 is column A
    let padding = range.start().map_or(0, |(_, column)| column as usize);

    let width = min_width.max(padding + range.width());

    let mut rows = Vec::with_capacity(range.height());
    for row in range.rows() {
        let mut cells = Vec::with_capacity(width);
        cells.resize(padding, CellValue::Empty);
        cells.extend(row.iter().map(cell_from_data));
        cells.resize(width, CellValue::Empty);
        rows.push(cells);
    }

    Ok(rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

fn read_csv_rows(path: &Path) -> ScheduleResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Rows may have different lengths
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows)
}
