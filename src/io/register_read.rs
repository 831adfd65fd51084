use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{AttendanceError, Result};
use crate::model::RegisterTable;

/// Reads the first worksheet of `path` as the register for `group`.
///
/// Any format calamine recognises by extension is accepted (`.ods`, `.xlsx`,
/// `.xlsm`, `.xls`).
pub fn read_register(path: &Path, group: &str) -> Result<RegisterTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AttendanceError::MissingSheet(path.to_path_buf()))??;

    let table = decode_range(&range, group);
    debug!(
        path = %path.display(),
        group,
        periods = table.periods.len(),
        people = table.rows.len(),
        "register decoded"
    );
    Ok(table)
}

/// Turns a sheet range into a register.
///
/// Positions are absolute: row 1 holds the period labels from column B, and
/// the body runs from row 2 down to the first completely empty row.
pub fn decode_range(range: &Range<DataType>, group: &str) -> RegisterTable {
    let Some((last_row, last_col)) = range.end() else {
        return RegisterTable::new(group, Vec::new());
    };

    let periods = (1..=last_col)
        .map(|col| cell_to_string(range.get_value((0, col))))
        .collect();
    let mut table = RegisterTable::new(group, periods);

    for row in 1..=last_row {
        let cells: Vec<String> = (0..=last_col)
            .map(|col| cell_to_string(range.get_value((row, col))))
            .collect();
        if cells.iter().all(String::is_empty) {
            break;
        }

        let mut cells = cells.into_iter();
        let name = cells.next().unwrap_or_default();
        let marks = cells.map(|cell| (!cell.is_empty()).then_some(cell)).collect();
        table.push_row(name, marks);
    }

    table
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
