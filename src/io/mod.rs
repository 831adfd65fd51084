//! Spreadsheet adapters around the attendance engine.

pub mod register_read;
pub mod totals_write;
