//! `sheetkit_split` v1:
//! Row-partitioning and report-generation pipeline.
//!
//! - `conf`      : split profiles, theme palette, render policy constants
//! - `spec`      : options/models/errors
//! - `partition` : header derivation and row partitioning
//! - `render`    : per-partition styled workbook rendering
//! - `report`    : batch report model
//! - `bundle`    : archive staging and bundling
//! - `batch`     : end-to-end orchestration
//! - `util`      : shared helper functions
pub mod batch;
pub mod bundle;
pub mod conf;
pub mod partition;
pub mod render;
pub mod report;
pub mod spec;
mod util;

pub use batch::process_split;
pub use conf::{EnumSplitProfile, SpecProfileConfig, derive_theme_fill_color};
pub use report::{ReportSplit, ReportSplitBuilder};
pub use spec::{
    EnumSplitOutput, SpecDocumentBlob, SpecMetadataEntry, SpecPartition, SpecRenderError,
    SpecSplitOptions, SpecSplitRow, SplitBatchError,
};
