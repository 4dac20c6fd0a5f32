use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

/// Failure of a call to the catalog service. The UI collapses every variant
/// into a single "remote call failed" banner; the detail is only logged.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog rejected request with status {status}: {source}")]
    Rejected {
        status: u16,
        #[source]
        source: ApiException,
    },
    #[error("catalog returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("catalog returned an unreadable response: {0}")]
    InvalidResponse(String),
    /// The request never left the client, e.g. the worker that issues it
    /// has stopped.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn rejected(status: u16, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            source: ApiException::new(code, message),
        }
    }

    /// Error code reported by the service, when it sent one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rejected { source, .. } => Some(source.code),
            _ => None,
        }
    }
}
