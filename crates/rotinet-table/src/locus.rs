//! Gene table join: locus tag → `"{accession}:{begin}-{end}"`.
//!
//! An unresolved lookup is a normal "no locus" state, never an error.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use rotinet_common::{Result, RotinetError};
use serde::Serialize;
use tracing::{info, warn};

use crate::tsv;

pub const ACCESSION_COLUMN: &str = "Accession";
pub const BEGIN_COLUMN: &str = "Begin";
pub const END_COLUMN: &str = "End";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneRecord {
    pub locus_tag: String,
    pub accession: String,
    pub begin: i64,
    pub end: i64,
    /// Every cell of the row, aligned with [`GeneTable::columns`].
    pub cells: Vec<String>,
}

impl GeneRecord {
    pub fn locus(&self) -> String {
        format!("{}:{}-{}", self.accession, self.begin, self.end)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneTable {
    columns: Vec<String>,
    rows: Vec<GeneRecord>,
}

impl GeneTable {
    /// Load a gene table. Header names are whitespace-trimmed.
    pub fn load(path: impl AsRef<Path>, locus_tag_column: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = tsv::open(path)?;
        let table = Self::from_reader(path, file, locus_tag_column)?;
        info!("Loaded gene table {}: {} loci", path.display(), table.rows.len());
        Ok(table)
    }

    /// Like [`GeneTable::load`], but a missing file yields an empty table.
    pub fn load_or_empty(path: impl AsRef<Path>, locus_tag_column: &str) -> Result<Self> {
        match Self::load(path, locus_tag_column) {
            Err(RotinetError::MissingResource { path }) => {
                warn!("Gene table {} not found; genome browser has no gene list", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_reader<R: Read>(path: &Path, reader: R, locus_tag_column: &str) -> Result<Self> {
        let raw = tsv::read(reader, true)?;
        let required = [locus_tag_column, ACCESSION_COLUMN, BEGIN_COLUMN, END_COLUMN];

        let index_of = |name: &str| raw.headers.iter().position(|h| h == name);
        let (Some(tag_idx), Some(acc_idx), Some(begin_idx), Some(end_idx)) = (
            index_of(locus_tag_column),
            index_of(ACCESSION_COLUMN),
            index_of(BEGIN_COLUMN),
            index_of(END_COLUMN),
        ) else {
            return Err(RotinetError::Schema {
                path: path.to_path_buf(),
                required: required.iter().map(|c| c.to_string()).collect(),
                missing: tsv::missing_columns(&raw.headers, &required),
            });
        };

        let mut rows = Vec::with_capacity(raw.rows.len());
        for (line, cells) in raw.rows.into_iter().enumerate() {
            let locus_tag = cells[tag_idx].trim();
            if locus_tag.is_empty() {
                continue;
            }
            let (Some(begin), Some(end)) = (
                parse_coordinate(&cells[begin_idx]),
                parse_coordinate(&cells[end_idx]),
            ) else {
                warn!(
                    "Skipping gene row {} ({}): Begin/End are not integers",
                    line + 2,
                    locus_tag
                );
                continue;
            };
            rows.push(GeneRecord {
                locus_tag: locus_tag.to_string(),
                accession: cells[acc_idx].trim().to_string(),
                begin,
                end,
                cells,
            });
        }

        Ok(Self { columns: raw.headers, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct locus tags, sorted (dropdown options).
    pub fn gene_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.locus_tag.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains(&self, locus_tag: &str) -> bool {
        self.rows.iter().any(|r| r.locus_tag == locus_tag)
    }

    /// All rows for `locus_tag`, in table order.
    pub fn rows_for<'a>(&'a self, locus_tag: &'a str) -> impl Iterator<Item = &'a GeneRecord> + 'a {
        self.rows.iter().filter(move |r| r.locus_tag == locus_tag)
    }

    /// Locus string of the first row matching `locus_tag`.
    pub fn resolve(&self, locus_tag: &str) -> Option<String> {
        self.rows_for(locus_tag).next().map(GeneRecord::locus)
    }
}

/// Integer coordinate; tolerates a float rendering such as `20000.0`.
fn parse_coordinate(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

/// Where the displayed locus came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "locus", rename_all = "snake_case")]
pub enum LocusState {
    NoLocus,
    FromAuto(String),
    FromDropdown(String),
    FromManual(String),
}

impl LocusState {
    pub fn locus(&self) -> Option<&str> {
        match self {
            Self::NoLocus => None,
            Self::FromAuto(l) | Self::FromDropdown(l) | Self::FromManual(l) => Some(l),
        }
    }
}

/// Candidate loci of the genome-browser view.
/// Priority: auto-resolved, then dropdown-picked, then manual free text.
#[derive(Debug, Clone, Default)]
pub struct LocusSources {
    pub auto: Option<String>,
    pub dropdown: Option<String>,
    pub manual: Option<String>,
}

impl LocusSources {
    pub fn state(&self) -> LocusState {
        let non_empty = |v: &Option<String>| {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
        };
        if let Some(l) = non_empty(&self.auto) {
            LocusState::FromAuto(l)
        } else if let Some(l) = non_empty(&self.dropdown) {
            LocusState::FromDropdown(l)
        } else if let Some(l) = non_empty(&self.manual) {
            LocusState::FromManual(l)
        } else {
            LocusState::NoLocus
        }
    }
}
