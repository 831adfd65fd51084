//! Structural checks a register must pass before its marks are counted.
//!
//! Rules run in reading order (header, names, body) and the first violation
//! is reported. A register that passes is wrapped in [`ValidRegister`], the
//! only input the aggregator accepts.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::model::{GroupName, PRESENCE_MARKER, RegisterTable};

/// Day/month label such as `3/09` or `12/25`.
static PERIOD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}/[0-9]{2}$").expect("period label pattern compiles"));

/// Exactly a first and a last name made of ASCII letters and hyphens.
static PERSON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z\-]+ [A-Za-z\-]+$").expect("person name pattern compiles")
});

/// Which structural rule a register broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationKind {
    /// A header label is not a `d/mm` or `dd/mm` date, or there are no labels.
    BadDateHeader,
    /// A column A entry is not a two-token name.
    BadName,
    /// A body cell holds something other than the presence marker.
    BadMark,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::BadDateHeader => write!(f, "row 1 must be dates only"),
            ValidationKind::BadName => write!(f, "column 1 must be names only"),
            ValidationKind::BadMark => write!(
                f,
                "data must consist of '{PRESENCE_MARKER}'s and empty cells only"
            ),
        }
    }
}

/// First rule violation found in a register.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("incorrect spreadsheet format for '{group}': {kind} (found {value:?})")]
pub struct ValidationError {
    pub kind: ValidationKind,
    /// Register the violation was found in.
    pub group: GroupName,
    /// Offending cell text.
    pub value: String,
}

impl ValidationError {
    fn new(kind: ValidationKind, group: &str, value: impl Into<String>) -> Self {
        Self {
            kind,
            group: group.to_string(),
            value: value.into(),
        }
    }
}

/// A register that has passed every structural rule.
#[derive(Debug, Clone, Copy)]
pub struct ValidRegister<'a> {
    table: &'a RegisterTable,
}

impl<'a> ValidRegister<'a> {
    pub fn table(&self) -> &'a RegisterTable {
        self.table
    }
}

/// Checks one register, returning the first violation in reading order.
pub fn validate(table: &RegisterTable) -> Result<ValidRegister<'_>, ValidationError> {
    check_periods(table)?;
    check_names(table)?;
    check_marks(table)?;
    Ok(ValidRegister { table })
}

/// Checks every register in supply order, stopping at the first failure.
pub fn validate_batch(
    tables: &[RegisterTable],
) -> Result<Vec<ValidRegister<'_>>, ValidationError> {
    tables.iter().map(validate).collect()
}

pub fn is_period_label(label: &str) -> bool {
    PERIOD_LABEL.is_match(label)
}

pub fn is_person_name(name: &str) -> bool {
    PERSON_NAME.is_match(name)
}

fn check_periods(table: &RegisterTable) -> Result<(), ValidationError> {
    if table.periods.is_empty() {
        return Err(ValidationError::new(
            ValidationKind::BadDateHeader,
            &table.group,
            "",
        ));
    }
    if let Some(label) = table.periods.iter().find(|label| !is_period_label(label)) {
        return Err(ValidationError::new(
            ValidationKind::BadDateHeader,
            &table.group,
            label.as_str(),
        ));
    }
    // A mark past the last label sits under a blank header cell.
    let unlabelled = table.rows.iter().any(|row| {
        row.marks
            .iter()
            .skip(table.periods.len())
            .flatten()
            .any(|mark| !mark.is_empty())
    });
    if unlabelled {
        return Err(ValidationError::new(
            ValidationKind::BadDateHeader,
            &table.group,
            "",
        ));
    }
    Ok(())
}

fn check_names(table: &RegisterTable) -> Result<(), ValidationError> {
    match table.rows.iter().find(|row| !is_person_name(&row.name)) {
        Some(row) => Err(ValidationError::new(
            ValidationKind::BadName,
            &table.group,
            row.name.as_str(),
        )),
        None => Ok(()),
    }
}

fn check_marks(table: &RegisterTable) -> Result<(), ValidationError> {
    let stray = table
        .rows
        .iter()
        .flat_map(|row| row.filled_marks())
        .find(|mark| mark.as_str() != PRESENCE_MARKER);
    match stray {
        Some(mark) => Err(ValidationError::new(
            ValidationKind::BadMark,
            &table.group,
            mark.as_str(),
        )),
        None => Ok(()),
    }
}
