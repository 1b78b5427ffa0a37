//! `sheetkit_grid` v1:
//! XLSX input-grid decode kernel.
//!
//! - `spec`   : grid models and decode errors
//! - `decode` : byte buffer to typed grid conversion
pub mod decode;
pub mod spec;

pub use decode::decode_grid_from_bytes;
pub use spec::{EnumGridValue, GridDecodeError, SpecGrid};
