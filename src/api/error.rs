//! Backend rejection errors.
//!
//! The backend answers failed requests with a non-2xx status and, usually, an
//! error envelope `{"errors": [{"code": ..., "message": ...}]}`. The envelope is
//! best-effort: if it is missing or malformed the error still carries the
//! status with no details.

use std::fmt;

use serde::Deserialize;

/// Error codes the backend uses for validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    PublisherNotFound,
    UrlTooLong,
    UrlInvalid,
    Other(String),
}

impl ErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "CODE_PUBLISHER_NOT_FOUND" => ErrorCode::PublisherNotFound,
            "CODE_URL_TOO_LONG" => ErrorCode::UrlTooLong,
            "CODE_URL_INVALID" => ErrorCode::UrlInvalid,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::PublisherNotFound => "CODE_PUBLISHER_NOT_FOUND",
            ErrorCode::UrlTooLong => "CODE_URL_TOO_LONG",
            ErrorCode::UrlInvalid => "CODE_URL_INVALID",
            ErrorCode::Other(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ErrorCode::Other(_))
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ErrorCode::parse(&raw))
    }
}

/// One entry of the error envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

/// Non-2xx answer from the news backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Structured details from the error envelope, possibly empty
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            errors: Vec::new(),
        }
    }

    pub fn with_detail(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
        self.errors.push(ErrorDetail {
            code: Some(code),
            message: message.into(),
        });
        self
    }

    /// Build from a status and raw response body. A body that is not a valid
    /// error envelope is ignored.
    pub fn from_body(status: u16, body: &str) -> Self {
        let errors = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope.errors,
            Err(e) => {
                if !body.trim().is_empty() {
                    tracing::debug!("unparseable error body for HTTP {status}: {e}");
                }
                Vec::new()
            }
        };
        Self { status, errors }
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// First recognized validation code, if any
    pub fn code(&self) -> Option<&ErrorCode> {
        self.errors
            .iter()
            .filter_map(|e| e.code.as_ref())
            .find(|c| c.is_recognized())
    }

    pub fn has_code(&self, code: &ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code.as_ref() == Some(code))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend returned HTTP {}", self.status)?;
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| match &e.code {
                Some(code) if e.message.is_empty() => code.as_str().to_string(),
                Some(code) => format!("{} ({})", e.message, code.as_str()),
                None => e.message.clone(),
            })
            .filter(|m| !m.is_empty())
            .collect();
        if !messages.is_empty() {
            write!(f, ": {}", messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
