use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const CONNECTION_ERROR: &str = "Error connecting to server.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, DNS).
    #[error("Error connecting to server.")]
    Transport(String),

    /// 401 on a call that carried a bearer token.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    /// Non-2xx response. `message` is the body's `error` field when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Please login first.")]
    NotAuthenticated,
}

impl ApiError {
    /// True when the error means the held session is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotAuthenticated)
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}
