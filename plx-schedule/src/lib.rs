//! plx-schedule library
//!
//! Builds a royalty/metadata schedule from track spreadsheets:
//! - [`credits`]: composer/publisher credit parsing
//! - [`version`]: version-label ranking
//! - [`ordering`]: header filtering, full-version index and sort keys
//! - [`schedule`]: per-file processing and the merged, ordered output
//! - [`io`]: spreadsheet reading and schedule writing

pub mod cell;
pub mod credits;
pub mod error;
pub mod io;
pub mod ordering;
pub mod schedule;
pub mod version;

pub use crate::cell::{CellValue, RawRow, SheetRows};
pub use crate::credits::{
    parse_composers, parse_credits, parse_publishers, ComposerCredits, PartyCredit,
};
pub use crate::error::{ScheduleError, ScheduleResult};
pub use crate::schedule::{build_schedule, OutputRow, Schedule, ScheduleBuilder};
pub use crate::version::{VersionRank, VersionTier};
