//! Shared tab-separated reader.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use rotinet_common::{Result, RotinetError};

pub(crate) struct RawTable {
    pub headers: Vec<String>,
    /// Every row padded (or truncated) to `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RotinetError::MissingResource { path: path.to_path_buf() },
        _ => RotinetError::Io(e),
    })
}

pub(crate) fn read<R: Read>(reader: R, trim_headers: bool) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| if trim_headers { h.trim() } else { h }.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(RawTable { headers, rows })
}

pub(crate) fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| name.to_string())
        .collect()
}
