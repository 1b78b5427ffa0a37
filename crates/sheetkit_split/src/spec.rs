//! Split pipeline models and top-level error types.

use std::fmt;

use sheetkit_grid::spec::{EnumGridValue, GridDecodeError};

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for `process_split`.
#[derive(Debug, Clone, Default)]
pub struct SpecSplitOptions {
    /// Bundle the produced documents into one ZIP archive.
    pub if_bundle_archive: bool,
    /// Maximum worker threads for the render stage; `None` renders serially.
    pub num_workers_max: Option<usize>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowAndPartitionModels

/// One input row as an ordered column-name to cell-value mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSplitRow {
    /// `(column name, value)` pairs in column order.
    pub cells: Vec<(String, EnumGridValue)>,
}

impl SpecSplitRow {
    /// Value of the named column, if present.
    pub fn value(&self, name_column: &str) -> Option<&EnumGridValue> {
        self.cells
            .iter()
            .find(|(c_name, _)| c_name == name_column)
            .map(|(_, value)| value)
    }

    /// Remove every listed column from the row. Applied exactly once, at
    /// partition-insertion time.
    pub fn remove_columns(&mut self, columns_excluded: &[&str]) {
        self.cells
            .retain(|(c_name, _)| !columns_excluded.contains(&c_name.as_str()));
    }
}

/// One metadata block entry: display label plus first-row value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMetadataEntry {
    /// Display label, rendered bold.
    pub label: String,
    /// Value taken as-is from the partition's first row (or the caller's
    /// date string for the synthetic entry).
    pub value: EnumGridValue,
}

/// One partition: normalized key, its rows, and the metadata snapshot built
/// from the first row seen for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPartition {
    /// Normalized key value (trimmed; case-folded per profile).
    pub key: String,
    /// Rows in input order, excluded columns already removed.
    pub rows: Vec<SpecSplitRow>,
    /// Label/value snapshot; never mutated after partition creation.
    pub metadata: Vec<SpecMetadataEntry>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputModels

/// One named output document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocumentBlob {
    /// Artifact file name (`<key>.xlsx`, sanitized).
    pub name_file: String,
    /// Encoded workbook bytes.
    pub v_bytes: Vec<u8>,
}

/// Batch output: individual documents or one bundled archive.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumSplitOutput {
    /// One blob per successfully rendered partition.
    Documents(Vec<SpecDocumentBlob>),
    /// Single ZIP archive of all successfully rendered partitions.
    Archive(Vec<u8>),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// One render failure item with partition key + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRenderError {
    /// Key of the partition whose document failed to encode.
    pub key: String,
    /// User-facing error text.
    pub exception: String,
}

/// "Whole batch failed" errors: input validation and final bundling.
///
/// Per-partition render failures are not represented here; they are folded
/// into the batch report and never abort sibling partitions.
#[derive(Debug)]
pub enum SplitBatchError {
    /// Caller-supplied profile name is not one of the built-in profiles.
    InvalidProfileName(String),
    /// Input buffer could not be decoded into a grid.
    GridDecodeFailed(GridDecodeError),
    /// Input grid has no header row.
    EmptyGrid,
    /// A row's key column is missing or trims to empty.
    MissingKeyValue {
        /// 1-based index of the offending data row.
        n_idx_row_1based: usize,
        /// Key column name for the active profile.
        name_column: String,
    },
    /// Staging area for bundling could not be created or written.
    StagingFailed {
        /// Underlying IO error text.
        message: String,
    },
    /// Archive encoding failed after all partitions were processed.
    BundleFailed {
        /// Underlying archive error text.
        message: String,
    },
}

impl fmt::Display for SplitBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProfileName(name_profile) => {
                write!(
                    f,
                    "Invalid profile {name_profile:?}. Possible profiles: (manager) / (category)."
                )
            }
            Self::GridDecodeFailed(err) => write!(f, "{err}"),
            Self::EmptyGrid => write!(f, "Input grid has no header row."),
            Self::MissingKeyValue {
                n_idx_row_1based,
                name_column,
            } => write!(
                f,
                "Data row {n_idx_row_1based} has no value in key column {name_column:?}."
            ),
            Self::StagingFailed { message } => {
                write!(f, "Failed to stage documents for bundling: {message}")
            }
            Self::BundleFailed { message } => {
                write!(f, "Failed to bundle documents into archive: {message}")
            }
        }
    }
}

impl std::error::Error for SplitBatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GridDecodeFailed(err) => Some(err),
            _ => None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
