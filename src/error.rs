// Error types for postcache.
// Covers remote source failures, record store failures, and export failures.

use thiserror::Error;

/// Coarse classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RemoteUnavailable,
    StoreError,
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Remote returned HTTP {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Record already stored: {collection}/{key}")]
    Duplicate { collection: &'static str, key: u64 },

    #[error("Malformed record file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::NotFound(_) => ErrorKind::NotFound,
            CacheError::Remote(_) | CacheError::RemoteStatus { .. } => {
                ErrorKind::RemoteUnavailable
            }
            CacheError::Duplicate { .. }
            | CacheError::Json(_)
            | CacheError::Io(_)
            | CacheError::Export(_) => ErrorKind::StoreError,
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            CacheError::NotFound("/users/11".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CacheError::RemoteStatus {
                status: 503,
                body: String::new()
            }
            .kind(),
            ErrorKind::RemoteUnavailable
        );
        assert_eq!(
            CacheError::Duplicate {
                collection: "users",
                key: 1
            }
            .kind(),
            ErrorKind::StoreError
        );

        let io = std::io::Error::other("disk gone");
        assert_eq!(CacheError::from(io).kind(), ErrorKind::StoreError);
    }
}
