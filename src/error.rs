use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Mastodon API error ({status}): {message}")]
    MastodonApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Streaming error: {0}")]
    Stream(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Returns true when retrying with the same credentials cannot succeed.
    pub fn is_fatal(&self) -> bool {
        match self {
            BotError::Config(_) | BotError::EnvVar(_) | BotError::InvalidUrl(_) => true,
            BotError::MastodonApi { status, .. } => {
                matches!(*status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            }
            BotError::Reqwest(_) | BotError::Stream(_) | BotError::Json(_) => false,
        }
    }

    /// Returns true for transport-level failures that end a streaming session.
    pub fn is_network(&self) -> bool {
        matches!(self, BotError::Reqwest(_) | BotError::Stream(_))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_fatal() {
        let err = BotError::MastodonApi {
            status: StatusCode::UNAUTHORIZED,
            message: "The access token is invalid".to_string(),
        };
        assert!(err.is_fatal());
        assert!(!err.is_network());
    }

    #[test]
    fn server_errors_are_retried() {
        let err = BotError::MastodonApi {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn stream_failures_are_retried() {
        let err = BotError::Stream("connection reset".to_string());
        assert!(err.is_network());
        assert!(!err.is_fatal());
        assert!(BotError::Config("missing".to_string()).is_fatal());
    }
}
