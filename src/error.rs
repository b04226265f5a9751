use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid run request: {0}")]
    InvalidRequest(String),

    #[error("Failed to set signal handler: {0}")]
    SignalHandler(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl DashError {
    /// True for failures where the server answered but the body or status was unusable.
    pub fn is_response_error(&self) -> bool {
        matches!(self, DashError::Api { .. } | DashError::Json(_))
            || matches!(self, DashError::Http(e) if e.is_decode())
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
