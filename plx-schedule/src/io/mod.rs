//! Reader/writer boundary around the schedule core

pub mod reader;
pub mod writer;

pub use reader::{read_sheet, SourceFormat};
pub use writer::{write_rows, write_schedule, OutputFormat};
