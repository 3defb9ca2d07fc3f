//! Schedule building
//!
//! Turns the rows of every source file into one ordered list of schedule
//! rows. Each file is processed in isolation (its own full-version index),
//! then all keyed rows are merged with a single stable sort.

use crate::cell::{CellValue, RawRow, SheetRows};
use crate::credits::{parse_composers, parse_publishers};
use crate::error::{ScheduleError, ScheduleResult};
use crate::ordering::{
    compose_track_name, is_track_row, sort_by_key, version_field, FullVersionIndex, Keyed,
    SortKey,
};
use crate::version::VersionRank;
use plx_common::config::LabelConfig;
use plx_common::{ColumnField, ResolvedColumns};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One emitted schedule row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Track Name")]
    pub track_name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "Composer")]
    pub composer: String,
    #[serde(rename = "CAE/IPI")]
    pub cae_ipi: String,
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "PRO")]
    pub pro: String,
}

impl OutputRow {
    /// Output column headers, in column order
    pub const HEADERS: [&'static str; 9] = [
        "Track Name",
        "Version",
        "Artist",
        "Album",
        "Composer",
        "CAE/IPI",
        "Label",
        "Publisher",
        "PRO",
    ];

    /// Field values in [`OutputRow::HEADERS`] order
    pub fn values(&self) -> [&str; 9] {
        [
            self.track_name.as_str(),
            self.version.as_str(),
            self.artist.as_str(),
            self.album.as_str(),
            self.composer.as_str(),
            self.cae_ipi.as_str(),
            self.label.as_str(),
            self.publisher.as_str(),
            self.pro.as_str(),
        ]
    }
}

/// Per-file processing counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    /// 1-based position among the input files
    pub file_order: usize,
    pub rows_read: usize,
    pub rows_emitted: usize,
}

/// Ordered schedule rows plus per-file counts
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub rows: Vec<OutputRow>,
    pub files: Vec<FileSummary>,
}

impl Schedule {
    /// No row survived filtering in any file
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Mapped cells of one row
struct TrackCells<'a> {
    track_name: &'a CellValue,
    version: &'a CellValue,
    album: &'a CellValue,
    composers: &'a CellValue,
    publishers: &'a CellValue,
}

/// A track row that passed the header filter, with its text already extracted
struct TrackRow<'a> {
    position: usize,
    track_name: String,
    version: String,
    album: String,
    rank: VersionRank,
    cells: TrackCells<'a>,
}

fn mapped_cells<'a>(
    source: &SheetRows,
    position: usize,
    row: &'a RawRow,
    columns: &ResolvedColumns,
) -> ScheduleResult<TrackCells<'a>> {
    let cell = move |field: ColumnField| {
        let index = columns.index(field);
        row.get(index).ok_or_else(|| ScheduleError::ColumnOutOfRange {
            source_name: source.name.clone(),
            row: position + 1,
            field,
            index,
            width: row.len(),
        })
    };

    Ok(TrackCells {
        track_name: cell(ColumnField::TrackName)?,
        version: cell(ColumnField::Version)?,
        album: cell(ColumnField::Album)?,
        composers: cell(ColumnField::Composers)?,
        publishers: cell(ColumnField::Publishers)?,
    })
}

/// Extract and filter the track rows of one file, in file order
fn track_rows<'a>(
    source: &'a SheetRows,
    columns: &ResolvedColumns,
) -> ScheduleResult<Vec<TrackRow<'a>>> {
    let mut tracks = Vec::new();

    for (position, row) in source.rows.iter().enumerate() {
        let cells = mapped_cells(source, position, row, columns)?;
        let track_name = cells.track_name.to_text();
        let album = cells.album.to_text();

        if !is_track_row(&track_name, &album) {
            debug!(file = %source.name, row = position + 1, "Skipping header or blank row");
            continue;
        }

        let version = cells.version.to_text().trim().to_string();
        tracks.push(TrackRow {
            position,
            track_name: track_name.trim().to_string(),
            album: album.trim().to_string(),
            rank: VersionRank::classify(&version),
            version,
            cells,
        });
    }

    Ok(tracks)
}

/// Full-version index of one file's track rows
fn full_version_index(tracks: &[TrackRow<'_>]) -> FullVersionIndex {
    let mut index = FullVersionIndex::new();
    for track in tracks.iter().filter(|t| t.rank.is_full()) {
        index.record(&track.track_name, track.position);
    }
    index
}

fn output_row(track: &TrackRow<'_>, labels: &LabelConfig) -> OutputRow {
    let composers = parse_composers(track.cells.composers.as_text());

    OutputRow {
        track_name: compose_track_name(&track.track_name, &track.version, &track.rank),
        version: version_field(&track.rank).to_string(),
        artist: labels.artist.clone(),
        album: track.album.clone(),
        composer: composers.composers,
        cae_ipi: composers.cae_ipis,
        label: labels.label.clone(),
        publisher: parse_publishers(track.cells.publishers.as_text()),
        pro: composers.pros,
    }
}

/// Keyed schedule rows of a single file.
///
/// `file_order` is the 1-based position of the file among all inputs.
pub fn process_file(
    source: &SheetRows,
    file_order: usize,
    columns: &ResolvedColumns,
    labels: &LabelConfig,
) -> ScheduleResult<Vec<Keyed<OutputRow>>> {
    let tracks = track_rows(source, columns)?;
    let index = full_version_index(&tracks);

    debug!(
        file = %source.name,
        tracks = tracks.len(),
        full_versions = index.len(),
        "Built full-version index"
    );
    if index.is_empty() && !tracks.is_empty() {
        debug!(file = %source.name, "No full versions in file, every track sorts last");
    }

    Ok(tracks
        .iter()
        .map(|track| Keyed {
            key: SortKey {
                file_order,
                full_version_order: index.lookup(&track.track_name),
                version_rank: track.rank.clone(),
            },
            item: output_row(track, labels),
        })
        .collect())
}

/// Incremental schedule builder.
///
/// Files are added one at a time in input order; each file is processed to
/// completion (with its own full-version index) before the next one is
/// added. [`ScheduleBuilder::finish`] performs the single merge sort.
pub struct ScheduleBuilder<'a> {
    columns: &'a ResolvedColumns,
    labels: &'a LabelConfig,
    keyed: Vec<Keyed<OutputRow>>,
    files: Vec<FileSummary>,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(columns: &'a ResolvedColumns, labels: &'a LabelConfig) -> Self {
        Self {
            columns,
            labels,
            keyed: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Process the next source file
    pub fn add_file(&mut self, source: &SheetRows) -> ScheduleResult<&FileSummary> {
        let file_order = self.files.len() + 1;
        let rows = process_file(source, file_order, self.columns, self.labels)?;

        if rows.is_empty() {
            warn!(file = %source.name, "No track rows found in file");
        } else {
            info!(
                file = %source.name,
                rows = rows.len(),
                "Processed {} of {} rows",
                rows.len(),
                source.rows.len()
            );
        }

        self.files.push(FileSummary {
            name: source.name.clone(),
            file_order,
            rows_read: source.rows.len(),
            rows_emitted: rows.len(),
        });
        self.keyed.extend(rows);

        Ok(&self.files[self.files.len() - 1])
    }

    /// Sort every row added so far and drop the sort keys
    pub fn finish(self) -> Schedule {
        Schedule {
            rows: sort_by_key(self.keyed),
            files: self.files,
        }
    }
}

/// Build the ordered schedule from every source file, in input order.
///
/// Any file-level failure (a mapped column missing from a row) aborts the
/// whole build. An empty result is not an error; check [`Schedule::is_empty`].
pub fn build_schedule(
    sources: &[SheetRows],
    columns: &ResolvedColumns,
    labels: &LabelConfig,
) -> ScheduleResult<Schedule> {
    let mut builder = ScheduleBuilder::new(columns, labels);
    for source in sources {
        builder.add_file(source)?;
    }
    Ok(builder.finish())
}
