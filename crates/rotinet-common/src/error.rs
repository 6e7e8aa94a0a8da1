use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotinetError {
    /// The backing file does not exist.
    #[error("Local file `{}` not found.", path.display())]
    MissingResource { path: PathBuf },

    /// Required columns are absent from the header row.
    #[error(
        "File `{}` must contain {} columns (missing: {}).",
        path.display(),
        required.iter().map(|c| format!("'{c}'")).collect::<Vec<_>>().join(" and "),
        missing.join(", ")
    )]
    Schema {
        path: PathBuf,
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Node '{0}' not found in data.")]
    UnknownNode(String),

    #[error("No {0} specified.")]
    NoQueryParameter(&'static str),

    #[error("Edge table has no rows, so there is no hub node.")]
    EmptyTable,

    #[error("Table parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RotinetError {
    /// True for errors caused by the request rather than the server's data.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownNode(_) | Self::NoQueryParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, RotinetError>;
