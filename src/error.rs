use crate::api::error::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    #[error("invalid page descriptor: {0}")]
    InvalidPage(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("{0}")]
    Other(String),
}

impl NewsdeskError {
    /// HTTP status of a backend rejection, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            NewsdeskError::Api(api) => Some(api.status),
            NewsdeskError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the backend answered 409 Conflict
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

pub type Result<T> = std::result::Result<T, NewsdeskError>;
