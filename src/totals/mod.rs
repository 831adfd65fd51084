use serde::Serialize;
use tracing::warn;

use crate::model::{AttendanceMapping, GroupName, GroupOrder, PersonName};

/// Logical label of the first column. Writers render it as a blank header.
pub const NAME_COLUMN: &str = "Name";

/// One person's totals, one cell per group column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsRow {
    pub name: PersonName,
    /// `None` where the person never appeared in that group's register.
    pub counts: Vec<Option<u32>>,
}

/// The consolidated table that will be materialised as the totals sheet.
///
/// An empty table has no columns at all and means there is nothing to write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<TotalsRow>,
}

impl OutputTable {
    /// The "nothing to write" table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Group column labels, without the leading name column.
    pub fn groups(&self) -> &[GroupName] {
        self.columns.get(1..).unwrap_or_default()
    }

    /// Looks up a row by person name.
    pub fn row(&self, name: &str) -> Option<&TotalsRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Cell for `name` under `group`; outer `None` when either is unknown.
    pub fn cell(&self, name: &str, group: &str) -> Option<Option<u32>> {
        let index = self.groups().iter().position(|column| column == group)?;
        self.row(name).map(|row| row.counts[index])
    }
}

/// Lays the mapping out as a table: people sorted by name, one column per
/// group in `order`.
pub fn build_totals(mapping: &AttendanceMapping, order: &GroupOrder) -> OutputTable {
    if mapping.is_empty() {
        return OutputTable::empty();
    }

    let mut columns = Vec::with_capacity(order.len() + 1);
    columns.push(NAME_COLUMN.to_string());
    columns.extend(order.iter().cloned());

    // BTreeMap iteration already yields names in byte-wise order.
    let rows = mapping
        .iter()
        .map(|(name, groups)| {
            for group in groups.keys().filter(|group| !order.contains(group)) {
                warn!(person = %name, group = %group, "group has no output column, count dropped");
            }
            TotalsRow {
                name: name.clone(),
                counts: order.iter().map(|group| groups.get(group).copied()).collect(),
            }
        })
        .collect();

    OutputTable { columns, rows }
}
