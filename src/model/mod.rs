use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The only cell value that counts as attendance.
pub const PRESENCE_MARKER: &str = "Y";

/// Name of a person as written in column A of a register.
pub type PersonName = String;

/// Name the caller gave to a register. Unique within a batch.
pub type GroupName = String;

/// One person's line in a register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRow {
    /// Person name from column A.
    pub name: PersonName,
    /// One entry per period, plus any cells past the last period label.
    /// `None` is a blank cell; anything else is kept as written so the
    /// validator can reject it.
    pub marks: Vec<Option<String>>,
}

impl RegisterRow {
    /// Creates a row from a name and raw marks.
    pub fn new(name: impl Into<PersonName>, marks: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            marks,
        }
    }

    /// Non-blank cells in period order. `None` and empty strings are blank.
    pub fn filled_marks(&self) -> impl Iterator<Item = &String> {
        self.marks.iter().flatten().filter(|mark| !mark.is_empty())
    }
}

/// Decoded view of one attendance register: period labels across the top,
/// person names down the side, presence marks in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterTable {
    /// Group the register belongs to.
    pub group: GroupName,
    /// Header labels from column B onward.
    pub periods: Vec<String>,
    /// Body rows in document order.
    pub rows: Vec<RegisterRow>,
}

impl RegisterTable {
    /// Creates a register with the given header and no rows.
    pub fn new(group: impl Into<GroupName>, periods: Vec<String>) -> Self {
        Self {
            group: group.into(),
            periods,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Empty strings become blanks and a short row is padded
    /// with blanks; a row longer than the header is kept as is so the
    /// validator can reject marks that have no period label.
    pub fn push_row(&mut self, name: impl Into<PersonName>, marks: Vec<Option<String>>) {
        let mut marks: Vec<Option<String>> = marks
            .into_iter()
            .map(|mark| mark.filter(|mark| !mark.is_empty()))
            .collect();
        if marks.len() < self.periods.len() {
            marks.resize(self.periods.len(), None);
        }
        self.rows.push(RegisterRow::new(name, marks));
    }

    /// Builder-style variant of [`RegisterTable::push_row`] taking string
    /// slices, where `""` is a blank cell.
    pub fn with_row(mut self, name: &str, marks: &[&str]) -> Self {
        let marks = marks
            .iter()
            .map(|mark| (!mark.is_empty()).then(|| (*mark).to_string()))
            .collect();
        self.push_row(name, marks);
        self
    }
}

/// Per-person, per-group attendance counts.
///
/// A person has an entry for a group exactly when they appear in that group's
/// register, even if they were never marked present. Membership is recorded
/// with [`AttendanceMapping::enrol`] and counts only move through
/// [`AttendanceMapping::record_presence`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMapping {
    people: BTreeMap<PersonName, BTreeMap<GroupName, u32>>,
}

impl AttendanceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `person` belongs to `group`, starting their count at zero
    /// if this is the first time. Existing counts are left untouched.
    pub fn enrol(&mut self, person: &str, group: &str) {
        self.people
            .entry(person.to_string())
            .or_default()
            .entry(group.to_string())
            .or_insert(0);
    }

    /// Adds one attendance for `person` in `group`, enrolling them first if
    /// needed. Returns the new count.
    pub fn record_presence(&mut self, person: &str, group: &str) -> u32 {
        let count = self
            .people
            .entry(person.to_string())
            .or_default()
            .entry(group.to_string())
            .or_insert(0);
        *count += 1;
        *count
    }

    /// Count for `person` in `group`, or `None` when they are not a member.
    pub fn count(&self, person: &str, group: &str) -> Option<u32> {
        self.people.get(person)?.get(group).copied()
    }

    /// Group → count entries for one person.
    pub fn groups_of(&self, person: &str) -> Option<&BTreeMap<GroupName, u32>> {
        self.people.get(person)
    }

    pub fn contains_person(&self, person: &str) -> bool {
        self.people.contains_key(person)
    }

    /// People in ascending byte-wise name order with their group counts.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonName, &BTreeMap<GroupName, u32>)> {
        self.people.iter()
    }

    /// Number of distinct people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// Group names in the order their registers were supplied. Each name appears
/// once, at the position it was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOrder(Vec<GroupName>);

impl GroupOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `group` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, group: &str) -> bool {
        if self.contains(group) {
            return false;
        }
        self.0.push(group.to_string());
        true
    }

    pub fn contains(&self, group: &str) -> bool {
        self.0.iter().any(|existing| existing == group)
    }

    /// Zero-based position of `group`, if present.
    pub fn position(&self, group: &str) -> Option<usize> {
        self.0.iter().position(|existing| existing == group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[GroupName] {
        &self.0
    }
}

impl<S: Into<GroupName>> FromIterator<S> for GroupOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut order = GroupOrder::new();
        for group in iter {
            let group = group.into();
            order.push(&group);
        }
        order
    }
}
