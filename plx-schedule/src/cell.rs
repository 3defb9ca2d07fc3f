//! Untyped spreadsheet cells and the rows read from one source file

use std::fmt;

/// One spreadsheet cell as produced by a reader
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Cell holding a spreadsheet error (`#N/A`, `#DIV/0!`, ...)
    Error(String),
}

impl CellValue {
    /// Text representation used for every comparison on the cell.
    ///
    /// Total over all cell kinds: blanks become `""`, whole floats drop
    /// their fractional part (`30.0` → `"30"`).
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }

    /// Borrow the cell as text, only when it is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// Cells of one row, indexed by zero-based column
pub type RawRow = Vec<CellValue>;

/// All rows read from one source file, in file order
#[derive(Debug, Clone, Default)]
pub struct SheetRows {
    /// Display name of the source (usually its path)
    pub name: String,
    pub rows: Vec<RawRow>,
}

impl SheetRows {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}
