//! Grid models and decode error types.

use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// #region GridModels

/// Typed cell value as decoded from the input workbook.
///
/// Dates are kept distinct from text and carried as Excel serial numbers;
/// downstream column formats decide how they display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumGridValue {
    /// Missing/blank cell.
    #[default]
    None,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date/time value as Excel serial number.
    Date(f64),
}

impl EnumGridValue {
    /// Render the cell as plain text (header names, partition keys).
    pub fn render_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(value) => value.clone(),
            Self::Number(value) | Self::Date(value) => value.to_string(),
        }
    }

    /// Whether the cell holds no value.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Decoded input grid: first row (headers) readable separately from the body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecGrid {
    /// Raw first-row cells, in column order.
    pub cells_header: Vec<EnumGridValue>,
    /// Body rows, positional, aligned with `cells_header`.
    pub rows: Vec<Vec<EnumGridValue>>,
}

impl SpecGrid {
    /// Number of body rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Decode failures for one input buffer.
#[derive(Debug)]
pub enum GridDecodeError {
    /// Workbook container could not be opened/parsed.
    OpenFailed(String),
    /// Workbook contains no worksheet.
    NoWorksheet,
    /// First worksheet range could not be read.
    ReadFailed(String),
}

impl fmt::Display for GridDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed(message) => write!(f, "Failed to open input workbook: {message}"),
            Self::NoWorksheet => write!(f, "Input workbook contains no worksheet."),
            Self::ReadFailed(message) => write!(f, "Failed to read input worksheet: {message}"),
        }
    }
}

impl std::error::Error for GridDecodeError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
