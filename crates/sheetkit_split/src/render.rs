//! Per-partition styled workbook rendering.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use sheetkit_grid::spec::EnumGridValue;

use crate::conf::{
    C_COLOR_FONT_TITLE, C_FMT_NUM_DATE, EnumSplitProfile, N_HEIGHT_ROW_TITLE,
    N_ROW_TABLE_ANCHOR_1BASED, N_SIZE_FONT_TITLE, N_WIDTH_COLUMN_DATA,
};
use crate::spec::SpecPartition;
use crate::util::{cast_col_num, cast_row_num, derive_xlsx_error_text, sanitize_sheet_name};

/// Render one partition into a styled workbook byte buffer.
///
/// Layout, top to bottom: merged title banner, metadata label/value rows,
/// then the data table (header + body) anchored at a fixed row, with
/// per-column width and date formatting applied per profile.
pub fn render_partition_document(
    partition: &SpecPartition,
    l_columns_output: &[String],
    profile: EnumSplitProfile,
    color_fill_banner: &str,
) -> Result<Vec<u8>, String> {
    let cfg_profile = profile.config();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sanitize_sheet_name(&partition.key, "_"))
        .map_err(derive_xlsx_error_text)?;
    worksheet.set_screen_gridlines(false);

    write_title_banner(worksheet, cfg_profile.title, cfg_profile.n_span_title_merge, color_fill_banner)?;
    write_metadata_block(worksheet, partition)?;
    write_data_table(worksheet, partition, l_columns_output, cfg_profile.cols_idx_date_1based)?;

    workbook.save_to_buffer().map_err(derive_xlsx_error_text)
}

fn write_title_banner(
    worksheet: &mut Worksheet,
    title: &str,
    n_span_title_merge: u16,
    color_fill_banner: &str,
) -> Result<(), String> {
    let fmt_title = Format::new()
        .set_bold()
        .set_font_size(N_SIZE_FONT_TITLE)
        .set_font_color(C_COLOR_FONT_TITLE)
        .set_background_color(color_fill_banner)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    worksheet
        .merge_range(0, 0, 0, n_span_title_merge - 1, title, &fmt_title)
        .map_err(derive_xlsx_error_text)?;
    worksheet
        .set_row_height(0, N_HEIGHT_ROW_TITLE)
        .map_err(derive_xlsx_error_text)?;

    Ok(())
}

fn write_metadata_block(
    worksheet: &mut Worksheet,
    partition: &SpecPartition,
) -> Result<(), String> {
    let fmt_label = Format::new().set_bold();
    let fmt_date = Format::new().set_num_format(C_FMT_NUM_DATE);

    for (n_idx_entry, entry) in partition.metadata.iter().enumerate() {
        let n_row = cast_row_num(1 + n_idx_entry)?;
        worksheet
            .write_string_with_format(n_row, 0, &entry.label, &fmt_label)
            .map_err(derive_xlsx_error_text)?;

        match &entry.value {
            EnumGridValue::None => {}
            EnumGridValue::Text(value) => {
                worksheet
                    .write_string(n_row, 1, value)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumGridValue::Number(value) => {
                worksheet
                    .write_number(n_row, 1, *value)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumGridValue::Date(value) => {
                worksheet
                    .write_number_with_format(n_row, 1, *value, &fmt_date)
                    .map_err(derive_xlsx_error_text)?;
            }
        }
    }

    Ok(())
}

fn write_data_table(
    worksheet: &mut Worksheet,
    partition: &SpecPartition,
    l_columns_output: &[String],
    cols_idx_date_1based: &[u16],
) -> Result<(), String> {
    let n_row_header = N_ROW_TABLE_ANCHOR_1BASED - 1;
    let fmt_header = Format::new().set_bold();
    let l_fmt_by_col = plan_column_formats(l_columns_output.len(), cols_idx_date_1based)?;

    for (n_idx_col, (c_name, fmt_col)) in
        l_columns_output.iter().zip(l_fmt_by_col.iter()).enumerate()
    {
        let n_col = cast_col_num(n_idx_col)?;
        worksheet
            .set_column_width(n_col, N_WIDTH_COLUMN_DATA)
            .map_err(derive_xlsx_error_text)?;
        worksheet
            .set_column_format(n_col, fmt_col)
            .map_err(derive_xlsx_error_text)?;
        worksheet
            .write_string_with_format(n_row_header, n_col, c_name, &fmt_header)
            .map_err(derive_xlsx_error_text)?;
    }

    for (n_idx_row, row) in partition.rows.iter().enumerate() {
        let n_row = n_row_header + 1 + cast_row_num(n_idx_row)?;
        for (n_idx_col, c_name) in l_columns_output.iter().enumerate() {
            let n_col = cast_col_num(n_idx_col)?;
            let fmt_col = &l_fmt_by_col[n_idx_col];

            match row.value(c_name) {
                None | Some(EnumGridValue::None) => {
                    worksheet
                        .write_blank(n_row, n_col, fmt_col)
                        .map_err(derive_xlsx_error_text)?;
                }
                Some(EnumGridValue::Text(value)) => {
                    worksheet
                        .write_string_with_format(n_row, n_col, value, fmt_col)
                        .map_err(derive_xlsx_error_text)?;
                }
                Some(EnumGridValue::Number(value) | EnumGridValue::Date(value)) => {
                    worksheet
                        .write_number_with_format(n_row, n_col, *value, fmt_col)
                        .map_err(derive_xlsx_error_text)?;
                }
            }
        }
    }

    Ok(())
}

/// Build per-column formats: date-designated positions get the date number
/// format, every column is left-aligned.
fn plan_column_formats(
    n_columns: usize,
    cols_idx_date_1based: &[u16],
) -> Result<Vec<Format>, String> {
    let mut l_fmt_by_col = Vec::with_capacity(n_columns);
    for n_idx_col in 0..n_columns {
        let n_idx_col_1based = cast_col_num(n_idx_col)? + 1;
        let fmt_col = if cols_idx_date_1based.contains(&n_idx_col_1based) {
            Format::new()
                .set_num_format(C_FMT_NUM_DATE)
                .set_align(FormatAlign::Left)
        } else {
            Format::new().set_align(FormatAlign::Left)
        };
        l_fmt_by_col.push(fmt_col);
    }
    Ok(l_fmt_by_col)
}
