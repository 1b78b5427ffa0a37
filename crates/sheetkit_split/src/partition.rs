//! Header derivation and row partitioning.

use std::collections::HashMap;

use sheetkit_grid::spec::{EnumGridValue, SpecGrid};

use crate::conf::{C_LABEL_DATE_ENTRY, C_PREFIX_COLUMN_UNKNOWN, EnumSplitProfile};
use crate::spec::{SpecMetadataEntry, SpecPartition, SpecSplitRow, SplitBatchError};

/// Derive the full column-name list from the raw header cells.
///
/// A cell with no textual content gets the positional placeholder
/// `UNKNOWN <column index>` rather than being dropped.
pub fn derive_column_names(cells_header: &[EnumGridValue]) -> Vec<String> {
    cells_header
        .iter()
        .enumerate()
        .map(|(n_idx_col, cell)| {
            let c_name = cell.render_text();
            if c_name.is_empty() {
                format!("{C_PREFIX_COLUMN_UNKNOWN}{n_idx_col}")
            } else {
                c_name
            }
        })
        .collect()
}

/// Derive the output column list: header names minus the profile's excluded
/// columns, first-row order preserved. Pure function of its inputs.
pub fn derive_output_columns(
    cells_header: &[EnumGridValue],
    columns_excluded: &[&str],
) -> Vec<String> {
    derive_column_names(cells_header)
        .into_iter()
        .filter(|c_name| !columns_excluded.contains(&c_name.as_str()))
        .collect()
}

/// Group the grid's body rows into partitions keyed by the profile's key
/// column, preserving input order within each partition and first-seen order
/// across partitions.
///
/// The metadata snapshot is taken from the partition's first row *before*
/// excluded columns are removed, since a column can be both a metadata
/// source and excluded from the data table. A row whose key column is
/// missing or trims to empty aborts the whole batch.
pub fn partition_rows(
    grid: &SpecGrid,
    profile: EnumSplitProfile,
    label_date: &str,
) -> Result<Vec<SpecPartition>, SplitBatchError> {
    let cfg_profile = profile.config();
    let l_names_column = derive_column_names(&grid.cells_header);

    let mut l_partitions: Vec<SpecPartition> = Vec::new();
    let mut dict_idx_by_key: HashMap<String, usize> = HashMap::new();

    for (n_idx_row, l_cells_row) in grid.rows.iter().enumerate() {
        let mut row = SpecSplitRow {
            cells: l_names_column
                .iter()
                .cloned()
                .zip(l_cells_row.iter().cloned())
                .collect(),
        };

        let c_key_raw = row
            .value(cfg_profile.name_column_key)
            .map(EnumGridValue::render_text)
            .unwrap_or_default();
        let c_key_trimmed = c_key_raw.trim();
        if c_key_trimmed.is_empty() {
            return Err(SplitBatchError::MissingKeyValue {
                n_idx_row_1based: n_idx_row + 1,
                name_column: cfg_profile.name_column_key.to_string(),
            });
        }

        let c_key = if cfg_profile.if_fold_key_case {
            c_key_trimmed.to_lowercase()
        } else {
            c_key_trimmed.to_string()
        };

        match dict_idx_by_key.get(&c_key) {
            Some(n_idx_partition) => {
                row.remove_columns(cfg_profile.columns_excluded);
                l_partitions[*n_idx_partition].rows.push(row);
            }
            None => {
                let metadata = derive_metadata_snapshot(&row, profile, label_date);
                row.remove_columns(cfg_profile.columns_excluded);

                dict_idx_by_key.insert(c_key.clone(), l_partitions.len());
                l_partitions.push(SpecPartition {
                    key: c_key,
                    rows: vec![row],
                    metadata,
                });
            }
        }
    }

    Ok(l_partitions)
}

/// Build the metadata snapshot for a new partition from its first row, plus
/// the synthetic date entry appended unconditionally.
fn derive_metadata_snapshot(
    row: &SpecSplitRow,
    profile: EnumSplitProfile,
    label_date: &str,
) -> Vec<SpecMetadataEntry> {
    let cfg_profile = profile.config();

    let mut l_entries: Vec<SpecMetadataEntry> = cfg_profile
        .fields_metadata
        .iter()
        .map(|(c_source, c_label)| SpecMetadataEntry {
            label: (*c_label).to_string(),
            value: row.value(c_source).cloned().unwrap_or_default(),
        })
        .collect();

    l_entries.push(SpecMetadataEntry {
        label: C_LABEL_DATE_ENTRY.to_string(),
        value: EnumGridValue::Text(label_date.to_string()),
    });

    l_entries
}
