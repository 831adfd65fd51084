//! Collecting the registers that make up one run.
//!
//! A batch pairs each register file with the group name it is reported
//! under. Composition mistakes (a reused group name, the same file twice, a
//! missing or unreadable file type) are rejected here, before any register is
//! opened.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AttendanceError, Result};
use crate::model::{GroupName, GroupOrder};

/// File extensions the register reader can open.
pub const REGISTER_EXTENSIONS: [&str; 4] = ["ods", "xlsx", "xlsm", "xls"];

/// One register file and the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSource {
    pub group: GroupName,
    pub path: PathBuf,
}

/// Registers to process, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterBatch {
    sources: Vec<RegisterSource>,
}

impl RegisterBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a register to the end of the batch.
    pub fn add(&mut self, group: impl Into<GroupName>, path: impl Into<PathBuf>) -> Result<()> {
        let group = group.into();
        let path = path.into();

        if !path.is_file() {
            return Err(AttendanceError::MissingInput(path));
        }
        if !has_register_extension(&path) {
            return Err(AttendanceError::UnsupportedFormat(path));
        }
        let identity = file_identity(&path);
        if self
            .sources
            .iter()
            .any(|source| file_identity(&source.path) == identity)
        {
            return Err(AttendanceError::DuplicateFile(path));
        }
        if self.sources.iter().any(|source| source.group == group) {
            return Err(AttendanceError::DuplicateGroupName(group));
        }

        debug!(group = %group, path = %path.display(), "register added to batch");
        self.sources.push(RegisterSource { group, path });
        Ok(())
    }

    /// Adds every entry of a manifest, resolving relative paths against
    /// `base_dir`.
    pub fn extend_from_manifest(&mut self, manifest: BatchManifest, base_dir: &Path) -> Result<()> {
        for entry in manifest.registers {
            let path = if entry.path.is_relative() {
                base_dir.join(&entry.path)
            } else {
                entry.path
            };
            self.add(entry.group, path)?;
        }
        Ok(())
    }

    /// Adds a register from a `GROUP=PATH` argument.
    pub fn add_spec(&mut self, spec: &str) -> Result<()> {
        let (group, path) = parse_register_spec(spec)?;
        self.add(group, path)
    }

    pub fn sources(&self) -> &[RegisterSource] {
        &self.sources
    }

    /// Group names in supply order.
    pub fn group_order(&self) -> GroupOrder {
        self.sources.iter().map(|source| source.group.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// JSON description of a batch:
///
/// ```json
/// { "registers": [ { "group": "Youth", "path": "youth.ods" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub registers: Vec<RegisterSource>,
}

impl BatchManifest {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AttendanceError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

/// Splits `GROUP=PATH` at the first `=`. The group may be empty; the path may not.
pub fn parse_register_spec(spec: &str) -> Result<(String, PathBuf)> {
    match spec.split_once('=') {
        Some((group, path)) if !path.is_empty() => Ok((group.to_string(), PathBuf::from(path))),
        _ => Err(AttendanceError::InvalidRegisterArg(spec.to_string())),
    }
}

fn has_register_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            REGISTER_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn file_identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
