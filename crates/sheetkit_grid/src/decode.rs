//! Byte buffer to typed grid conversion.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::spec::{EnumGridValue, GridDecodeError, SpecGrid};

/// Decode an XLSX byte buffer into a typed grid.
///
/// Only the first worksheet is read. The first used row becomes
/// `cells_header`; every following used row becomes one body row, aligned
/// positionally with the header. Rows with no non-empty cell are dropped.
pub fn decode_grid_from_bytes(v_input: &[u8]) -> Result<SpecGrid, GridDecodeError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(v_input))
        .map_err(|e| GridDecodeError::OpenFailed(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(GridDecodeError::NoWorksheet)?
        .map_err(|e| GridDecodeError::ReadFailed(e.to_string()))?;

    let mut iter_rows = range.rows();
    let Some(l_cells_first) = iter_rows.next() else {
        return Ok(SpecGrid::default());
    };

    let cells_header = l_cells_first.iter().map(convert_data_value).collect();
    let rows = iter_rows
        .map(|l_cells| l_cells.iter().map(convert_data_value).collect::<Vec<_>>())
        .filter(|l_values: &Vec<EnumGridValue>| l_values.iter().any(|v| !v.is_none()))
        .collect();

    Ok(SpecGrid { cells_header, rows })
}

fn convert_data_value(data: &Data) -> EnumGridValue {
    match data {
        Data::Empty => EnumGridValue::None,
        Data::String(value) => EnumGridValue::Text(value.clone()),
        Data::Float(value) => EnumGridValue::Number(*value),
        Data::Int(value) => EnumGridValue::Number(*value as f64),
        Data::Bool(value) => EnumGridValue::Text(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => EnumGridValue::Date(value.as_f64()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => {
            EnumGridValue::Text(value.clone())
        }
        Data::Error(value) => EnumGridValue::Text(format!("#{value:?}")),
    }
}
