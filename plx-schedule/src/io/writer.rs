//! Schedule writing

use crate::error::ScheduleResult;
use crate::schedule::OutputRow;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Worksheet name of an xlsx schedule
pub const SHEET_NAME: &str = "Schedule";

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook with a single worksheet and a bold header row
    #[default]
    Xlsx,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON array of row objects
    Json,
}

impl OutputFormat {
    /// Format implied by an output file extension, xlsx unless `.csv` or `.json`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => OutputFormat::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Xlsx,
        }
    }
}

fn xlsx_bytes(rows: &[OutputRow]) -> ScheduleResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(OutputRow::HEADERS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, record) in (1u32..).zip(rows) {
        for (col, value) in (0u16..).zip(record.values()) {
            worksheet.write_string(row, col, value)?;
        }
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

/// Serialize schedule rows into any writer
pub fn write_rows<W: Write>(
    rows: &[OutputRow],
    mut writer: W,
    format: OutputFormat,
) -> ScheduleResult<()> {
    match format {
        OutputFormat::Xlsx => {
            writer.write_all(&xlsx_bytes(rows)?)?;
            writer.flush()?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Write schedule rows to a file, replacing any existing file
pub fn write_schedule(
    rows: &[OutputRow],
    path: &Path,
    format: OutputFormat,
) -> ScheduleResult<()> {
    let file = File::create(path)?;
    write_rows(rows, BufWriter::new(file), format)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), ?format, "Wrote schedule");
    Ok(())
}
