mod config;
mod news;
mod publishers;
mod search;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use news::{NewsLsOptions, cmd_news_add, cmd_news_ls, cmd_news_rm, cmd_news_show};
pub use publishers::{cmd_publishers_add, cmd_publishers_ls};
pub use search::{cmd_search, cmd_suggest};

use std::sync::Arc;

use serde_json::Value;

use crate::api::HttpBackend;
use crate::config::Config;
use crate::error::{NewsdeskError, Result};
use crate::sync::FetchOutcome;
use crate::toast::Toast;

/// Output of a command in both renderings; `--json` picks which is printed
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, as_json: bool) -> Result<()> {
        if as_json {
            return print_json(&self.json);
        }
        if let Some(text) = self.text {
            println!("{text}");
        }
        Ok(())
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load configuration and build the HTTP backend from it
fn connect() -> Result<(Arc<HttpBackend>, Config)> {
    let config = Config::load()?;
    let backend = HttpBackend::from_config(&config)?;
    tracing::debug!("using backend at {}", backend.base_url());
    Ok((Arc::new(backend), config))
}

/// Turn a failed page load into an error carrying the screen's toast
fn ensure_loaded(
    outcome: FetchOutcome,
    load_error: impl FnOnce() -> Option<Toast>,
) -> Result<()> {
    match outcome {
        FetchOutcome::Failed { .. } => Err(toast_error(
            load_error().unwrap_or_else(|| Toast::error("request failed")),
        )),
        _ => Ok(()),
    }
}

fn toast_error(toast: Toast) -> NewsdeskError {
    NewsdeskError::Other(toast.message)
}
