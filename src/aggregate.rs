use tracing::debug;

use crate::model::{AttendanceMapping, GroupOrder, PRESENCE_MARKER};
use crate::validate::ValidRegister;

/// Folds validated registers into `mapping` in supply order.
///
/// Every person listed in a register is enrolled in its group, then each
/// presence marker on their row adds one to that count. Returns the updated
/// mapping together with the group names in the order the registers arrived.
pub fn aggregate<'a, I>(
    mut mapping: AttendanceMapping,
    registers: I,
) -> (AttendanceMapping, GroupOrder)
where
    I: IntoIterator<Item = ValidRegister<'a>>,
{
    let mut order = GroupOrder::new();

    for register in registers {
        let table = register.table();
        order.push(&table.group);

        let mut marked = 0usize;
        for row in &table.rows {
            mapping.enrol(&row.name, &table.group);
            for mark in row.filled_marks() {
                assert!(
                    mark == PRESENCE_MARKER,
                    "register '{}' passed validation with mark {mark:?}",
                    table.group
                );
                mapping.record_presence(&row.name, &table.group);
                marked += 1;
            }
        }

        debug!(
            group = %table.group,
            people = table.rows.len(),
            marks = marked,
            "register aggregated"
        );
    }

    (mapping, order)
}
