use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationError;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, AttendanceError>;

/// Error type covering the different failure cases that can occur when the
/// tool collects, checks, totals, or writes attendance registers.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a batch manifest cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("spreadsheet read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// A register broke one of the structural rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Raised when two registers in one batch share a group name.
    #[error("there is already a group named '{0}', please choose a different name")]
    DuplicateGroupName(String),

    /// Raised when the same file is supplied twice in one batch.
    #[error("file {0} has already been chosen")]
    DuplicateFile(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a register file is not a spreadsheet the reader understands.
    #[error("unsupported register format for {0}: expected .ods, .xlsx, .xlsm or .xls")]
    UnsupportedFormat(PathBuf),

    /// Raised when a workbook contains no worksheet to read the register from.
    #[error("workbook {0} contains no worksheets")]
    MissingSheet(PathBuf),

    /// Raised when a `GROUP=PATH` argument cannot be split.
    #[error("invalid register argument '{0}': expected GROUP=PATH")]
    InvalidRegisterArg(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
