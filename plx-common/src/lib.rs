//! # PLX Common Library
//!
//! Shared code for the PLX schedule tools including:
//! - Error types
//! - Configuration loading and resolution
//! - Spreadsheet column-letter conversion

pub mod columns;
pub mod config;
pub mod error;

pub use columns::{column_index, ColumnField, ColumnMapping, ResolvedColumns};
pub use error::{Error, Result};
