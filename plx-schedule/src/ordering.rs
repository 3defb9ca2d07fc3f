//! Track ordering
//!
//! Rows are ordered by `(file order, full-version position, version rank)`:
//! files stay in the order they were given, each track's versions group
//! behind the row holding its full version, and within a group versions
//! follow their [`VersionRank`].

use crate::version::VersionRank;
use std::collections::HashMap;

/// Track-name marker of a header row embedded in a sheet
pub const TRACK_HEADER_MARKER: &str = "tracktitle";

/// Album marker of a header row embedded in a sheet
pub const ALBUM_HEADER_MARKER: &str = "cdtitle";

/// Whether a row carries track data (as opposed to a header/section row).
///
/// Header markers are matched case-insensitively anywhere in the cell text.
pub fn is_track_row(track_name: &str, album: &str) -> bool {
    if track_name.trim().is_empty() {
        return false;
    }
    if track_name.to_lowercase().contains(TRACK_HEADER_MARKER) {
        return false;
    }
    !album.to_lowercase().contains(ALBUM_HEADER_MARKER)
}

/// Emitted track name: bare for the full version, `"{name} - {version}"` otherwise
pub fn compose_track_name(track_name: &str, version: &str, rank: &VersionRank) -> String {
    if rank.is_full() {
        track_name.to_string()
    } else {
        format!("{} - {}", track_name, version)
    }
}

/// Emitted version column: `"Main"` for the full version, empty otherwise
pub fn version_field(rank: &VersionRank) -> &'static str {
    if rank.is_full() {
        "Main"
    } else {
        ""
    }
}

/// Position of a track's full version within its file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FullVersionOrder {
    /// Row position of the full version
    Anchored(usize),
    /// Track has no full version in this file; sorts after every anchor
    Unanchored,
}

/// Track name → position of its full-version row, for one file only
#[derive(Debug, Clone, Default)]
pub struct FullVersionIndex {
    anchors: HashMap<String, usize>,
}

impl FullVersionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a full-version row; the first position seen for a track wins
    pub fn record(&mut self, track_name: &str, position: usize) {
        self.anchors
            .entry(track_name.to_string())
            .or_insert(position);
    }

    pub fn lookup(&self, track_name: &str) -> FullVersionOrder {
        self.anchors
            .get(track_name)
            .map_or(FullVersionOrder::Unanchored, |p| FullVersionOrder::Anchored(*p))
    }

    /// Number of tracks with a full version
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Complete ordering key of one row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    /// 1-based position of the source file
    pub file_order: usize,
    pub full_version_order: FullVersionOrder,
    pub version_rank: VersionRank,
}

/// An item paired with its sort key; the key never leaves this wrapper
#[derive(Debug, Clone)]
pub struct Keyed<T> {
    pub key: SortKey,
    pub item: T,
}

/// Stable sort by key, then strip the keys
///
/// Items with identical keys keep their relative input order.
pub fn sort_by_key<T>(mut keyed: Vec<Keyed<T>>) -> Vec<T> {
    keyed.sort_by(|a, b| a.key.cmp(&b.key));
    keyed.into_iter().map(|k| k.item).collect()
}
