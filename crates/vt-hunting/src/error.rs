use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuntingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error object returned by the API (`{"error": {"code", "message"}}`).
    #[error("{code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to parse response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Client error: {0}")]
    Client(String),
}

impl HuntingError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HuntingError::Api { status, .. } => Some(*status),
            HuntingError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
