use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::aggregate::aggregate;
use crate::batch::RegisterBatch;
use crate::error::Result;
use crate::io::register_read;
use crate::io::totals_write;
use crate::model::{AttendanceMapping, RegisterTable};
use crate::totals::{OutputTable, build_totals};
use crate::validate::validate_batch;

/// Default file name for the totals workbook.
pub const DEFAULT_OUTPUT: &str = "Total Attendance.xlsx";

/// What a totals run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The totals workbook was written.
    Written { path: PathBuf, people: usize, groups: usize },
    /// No registers, or registers without people: nothing was written.
    NothingToWrite,
}

/// Decodes every register in the batch, in supply order.
#[instrument(level = "debug", skip_all, fields(registers = batch.len()))]
pub fn load_registers(batch: &RegisterBatch) -> Result<Vec<RegisterTable>> {
    batch
        .sources()
        .iter()
        .map(|source| register_read::read_register(&source.path, &source.group))
        .collect()
}

/// Validates, aggregates, and lays out already decoded registers.
///
/// Every register is validated before any counting starts, so a malformed
/// register leaves no partial totals behind.
pub fn totals_for(tables: &[RegisterTable]) -> Result<OutputTable> {
    let valid = validate_batch(tables)?;
    debug!(registers = valid.len(), "registers validated");

    let (mapping, order) = aggregate(AttendanceMapping::new(), valid);
    info!(people = mapping.len(), groups = order.len(), "attendance aggregated");

    Ok(build_totals(&mapping, &order))
}

/// Reads and validates every register without writing anything.
#[instrument(level = "info", skip_all, fields(registers = batch.len()))]
pub fn check_batch(batch: &RegisterBatch) -> Result<()> {
    let tables = load_registers(batch)?;
    validate_batch(&tables)?;
    info!("all registers are well formed");
    Ok(())
}

/// Totals the batch and writes the result to `output`.
///
/// An empty batch, or one whose registers list nobody, writes nothing. A
/// validation failure leaves any existing `output` untouched.
#[instrument(
    level = "info",
    skip_all,
    fields(registers = batch.len(), output = %output.display())
)]
pub fn total_attendance(batch: &RegisterBatch, output: &Path) -> Result<RunOutcome> {
    if batch.is_empty() {
        info!("no registers supplied");
        return Ok(RunOutcome::NothingToWrite);
    }

    let tables = load_registers(batch)?;
    let table = totals_for(&tables)?;

    if !totals_write::write_totals(output, &table)? {
        info!("registers list nobody, nothing written");
        return Ok(RunOutcome::NothingToWrite);
    }

    info!(people = table.rows.len(), "totals workbook written");
    Ok(RunOutcome::Written {
        path: output.to_path_buf(),
        people: table.rows.len(),
        groups: table.groups().len(),
    })
}
