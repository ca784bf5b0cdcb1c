use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API error {status} ({tag}): {message}")]
    ApiError {
        status: u16,
        tag: String,
        message: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SdkError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::ApiError { status: 404, .. })
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
