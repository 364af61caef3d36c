use std::path::PathBuf;

/// Errors raised by the pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum LeadgenError {
    /// No WebDriver session could be opened.
    #[error("WebDriver session unavailable: {0}")]
    Session(String),

    /// The browser failed to load a page after a session was open.
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Loading a page took longer than the configured timeout.
    #[error("timed out after {secs}s loading {url}")]
    Timeout { url: String, secs: u64 },

    /// The search provider failed outright (empty results are not an error).
    #[error("search failed: {0}")]
    Search(String),

    /// A structured extractor could not process page content.
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("config error: {0}")]
    Config(String),

    /// Request rejected before any pipeline work started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeadgenError>;

impl LeadgenError {
    /// Fetch failures that still leave us with something to report on.
    ///
    /// The researcher turns these into an inline error marker instead of
    /// failing the lead.
    pub fn is_degradable(&self) -> bool {
        matches!(self, Self::Navigation { .. } | Self::Timeout { .. })
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
