use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool retrieves, reconciles, or persists participant data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the run report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Transport-level failures from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when a remote source answers with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a column the cleaning step relies on is absent. Only
    /// reachable if reconciliation was bypassed.
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// Either source could not be downloaded or decoded.
    #[error("failed to load {location}: {source}")]
    Retrieval {
        location: String,
        #[source]
        source: Box<ToolError>,
    },

    /// The combined workbook could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: Box<ToolError>,
    },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn retrieval(location: impl Into<String>, source: ToolError) -> Self {
        ToolError::Retrieval {
            location: location.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: ToolError) -> Self {
        ToolError::Persistence {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// True for failures raised while loading either input.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, ToolError::Retrieval { .. })
    }

    /// True for failures raised while saving the combined workbook.
    pub fn is_persistence(&self) -> bool {
        matches!(self, ToolError::Persistence { .. })
    }
}
