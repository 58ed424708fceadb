use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the acquisition backend.
/// Every module returns `Result<T, RemapError>`.
#[derive(Debug, Error)]
pub enum RemapError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("Archive from {url} is missing required files for {dir:?}")]
    IncompleteArchive { url: String, dir: PathBuf },

    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── Resolution ──────────────────────────────────────
    #[error("No mappings found for specifier: {0}")]
    MappingNotFound(String),

    #[error("Mapping directory is missing fields.csv or methods.csv: {0:?}")]
    InvalidMappingDir(PathBuf),

    #[error("Unknown library: {0}")]
    LibraryNotFound(String),

    #[error("Invalid Maven coordinate: {0}")]
    InvalidCoordinate(String),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type RemapResult<T> = Result<T, RemapError>;

impl From<std::io::Error> for RemapError {
    fn from(source: std::io::Error) -> Self {
        RemapError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
