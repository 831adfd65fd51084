use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::totals::OutputTable;

/// Sheet name used for the totals worksheet.
pub const TOTALS_SHEET: &str = "Totals";

/// Writes the totals table to `path` as an `.xlsx` workbook.
///
/// Returns `false` without touching the filesystem when the table is empty.
pub fn write_totals(path: &Path, table: &OutputTable) -> Result<bool> {
    if table.is_empty() {
        return Ok(false);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TOTALS_SHEET)?;

    let header = Format::new().set_font_name("Calibri").set_bold();
    for (col_idx, group) in table.groups().iter().enumerate() {
        let col = (col_idx + 1) as u16;
        worksheet.write_string_with_format(0, col, group, &header)?;
        worksheet.set_column_width(col, group_column_width(group))?;
    }

    let name_width = table
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);
    worksheet.set_column_width(0, name_width as f64)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        worksheet.write_string(excel_row, 0, &row.name)?;
        for (col_idx, count) in row.counts.iter().enumerate() {
            if let Some(count) = count {
                worksheet.write_number(excel_row, (col_idx + 1) as u16, f64::from(*count))?;
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    fs::write(path, buffer)?;
    Ok(true)
}

fn group_column_width(group: &str) -> f64 {
    group.chars().count().saturating_add(1).max(3) as f64
}
