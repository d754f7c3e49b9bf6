use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Status {
        code: ErrorCode,
        status: u16,
        message: String,
    },
    #[error("invalid `{name}` response header: {value:?}")]
    InvalidHeader { name: &'static str, value: String },
    #[error("invalid client configuration: {0}")]
    Config(String),
}
