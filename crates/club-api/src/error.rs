use club_core::ValidationError;
use thiserror::Error;

/// Errors from the event API client.
///
/// The `Display` output is what hooks record as their `error` message, so
/// backend messages are rendered verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL is not usable for building endpoint URLs.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// A mutating call was made without a bearer token.
    #[error("a bearer token is required to {operation} events")]
    MissingToken { operation: &'static str },
    /// Input rejected before it was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No response was received.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status for backend errors.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
