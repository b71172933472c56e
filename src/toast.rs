//! User-facing notifications produced by the screens.
//!
//! Screens never print; they hand a [`Toast`] back to whoever drives them.

use std::fmt;
use std::time::Instant;

use owo_colors::OwoColorize;

use crate::api::ErrorCode;
use crate::error::NewsdeskError;

/// A notification message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// The user action a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateNews,
    DeleteNews,
    CreatePublisher,
    LoadNews,
    LoadPublishers,
    Search,
}

impl Action {
    fn generic_failure(&self) -> &'static str {
        match self {
            Action::CreateNews => "Could not add the article",
            Action::DeleteNews => "Could not delete the article",
            Action::CreatePublisher => "Could not add the publisher",
            Action::LoadNews => "Could not load news",
            Action::LoadPublishers => "Could not load publishers",
            Action::Search => "Search failed",
        }
    }
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    /// Turn a failed action into the message shown to the user.
    ///
    /// Conflicts and the recognized validation codes get a specific message;
    /// everything else, including transport failures and unreadable error
    /// bodies, gets the generic one for the action.
    pub fn for_failure(action: Action, err: &NewsdeskError) -> Self {
        if let NewsdeskError::Validation(msg) = err {
            return Self::error(format!("{}: {msg}", action.generic_failure()));
        }

        if err.is_conflict() {
            let message = match action {
                Action::CreateNews => "This article has already been added",
                Action::CreatePublisher => "A publisher with this domain already exists",
                Action::DeleteNews => {
                    "The article cannot be deleted right now because it is still in use"
                }
                _ => action.generic_failure(),
            };
            return Self::error(message);
        }

        if let NewsdeskError::Api(api) = err
            && let Some(code) = api.code()
        {
            let message = match code {
                ErrorCode::PublisherNotFound => {
                    "No publisher is registered for this article's domain"
                }
                ErrorCode::UrlTooLong => "The article URL is too long",
                ErrorCode::UrlInvalid => "The article URL is not valid",
                ErrorCode::Other(_) => action.generic_failure(),
            };
            return Self::error(message);
        }

        Self::error(format!("{}. Please try again.", action.generic_failure()))
    }

    /// Message for a listing that could not be loaded; `reason` is the
    /// failure recorded by the pager
    pub fn for_load_failure(action: Action, reason: &str) -> Self {
        Self::error(format!("{}: {reason}", action.generic_failure()))
    }

    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            ToastLevel::Info => write!(f, "{}", self.message.cyan()),
            ToastLevel::Success => write!(f, "{}", self.message.green()),
            ToastLevel::Warning => write!(f, "{}", self.message.yellow()),
            ToastLevel::Error => write!(f, "{}", self.message.red()),
        }
    }
}
