//! Error types for holocron

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog operations
///
/// None of these are retried; they surface unchanged to the caller of the
/// top-level operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream answered with a non-success status
    #[error("upstream request to {url} failed with status {status}")]
    Upstream {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Network or protocol failure talking to the upstream
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream payload did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup behind a reference field failed
    #[error("failed to resolve {field}: {source}")]
    Resolution {
        /// Reference field being resolved
        field: &'static str,
        /// Failure of the underlying lookup
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a failed sub-lookup of reference field `field`
    pub fn resolution(field: &'static str, source: Error) -> Self {
        Error::Resolution {
            field,
            source: Box::new(source),
        }
    }
}
