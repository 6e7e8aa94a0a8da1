//! Edge table: one row per (source, target) relation.
//!
//! `source` and `target` are required and typed; every other column is an
//! opaque attribute carried through in header order.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use rotinet_common::{Result, RotinetError};
use serde::Serialize;
use tracing::info;

use crate::tsv;

pub const SOURCE_COLUMN: &str = "source";
pub const TARGET_COLUMN: &str = "target";
pub const CLASS_COLUMN: &str = "class";
pub const DESCRIPTION_COLUMN: &str = "description";

const REQUIRED_COLUMNS: [&str; 2] = [SOURCE_COLUMN, TARGET_COLUMN];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    /// Every cell of the row, aligned with [`DataTable::columns`].
    cells: Vec<String>,
}

/// A `{column, value}` pair, serialized for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field<'a> {
    pub column: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone)]
pub struct DataTable {
    path: PathBuf,
    columns: Vec<String>,
    class_index: Option<usize>,
    rows: Vec<EdgeRecord>,
}

impl DataTable {
    /// Load the edge table from a TSV file with a header row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tsv::open(path)?;
        let table = Self::from_reader(path, file)?;
        info!(
            "Loaded edge table {}: {} rows, {} columns",
            path.display(),
            table.rows.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Parse TSV content. `path` only labels errors.
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self> {
        let raw = tsv::read(reader, false)?;

        let index_of = |name: &str| raw.headers.iter().position(|h| h == name);
        let (Some(source_idx), Some(target_idx)) = (index_of(SOURCE_COLUMN), index_of(TARGET_COLUMN)) else {
            return Err(RotinetError::Schema {
                path: path.to_path_buf(),
                required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                missing: tsv::missing_columns(&raw.headers, &REQUIRED_COLUMNS),
            });
        };
        let class_index = index_of(CLASS_COLUMN);

        let rows = raw
            .rows
            .into_iter()
            .map(|cells| EdgeRecord {
                source: cells[source_idx].clone(),
                target: cells[target_idx].clone(),
                cells,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            columns: raw.headers,
            class_index,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[EdgeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn has_class_column(&self) -> bool {
        self.class_index.is_some()
    }

    /// Every `(column, value)` of `record`, in table column order.
    pub fn fields<'a>(&'a self, record: &'a EdgeRecord) -> impl Iterator<Item = Field<'a>> + 'a {
        self.columns
            .iter()
            .zip(record.cells.iter())
            .map(|(column, value)| Field { column, value })
    }

    /// Value of `column` for `record`; empty cells read as absent.
    pub fn value<'a>(&'a self, record: &'a EdgeRecord, column: &str) -> Option<&'a str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        record.cells.get(idx).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn class_of<'a>(&self, record: &'a EdgeRecord) -> Option<&'a str> {
        let idx = self.class_index?;
        record.cells.get(idx).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Non-empty target column values in table order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.target.as_str()).filter(|t| !t.is_empty())
    }

    /// Distinct `source` values, sorted (selection widgets).
    pub fn sources(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.source.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty `class` values, sorted. Empty without a class column.
    pub fn classes(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|r| self.class_of(r))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First row whose `source` equals `source`.
    pub fn find(&self, source: &str) -> Option<&EdgeRecord> {
        self.rows.iter().find(|r| r.source == source)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.find(source).is_some()
    }
}
