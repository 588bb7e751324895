use thiserror::Error;

/// Failure taxonomy for a single report generation.
///
/// Everything here is fail-fast: the caller gets the error, no partial
/// table is ever produced. Row-level parse problems during loading are
/// not errors — the loader skips and counts them instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unsupported file type: {0} (only .csv exports are accepted)")]
    UnsupportedFileType(String),

    #[error("malformed call start timestamp: {0:?} (expected a YYYY/MM/DD prefix)")]
    MalformedTimestamp(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
