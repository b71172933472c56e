//! Request-side query types: keyword tokens, page descriptors and list filters.

use jiff::Timestamp;

use crate::error::{NewsdeskError, Result};
use crate::types::ItemStatus;

/// Free-text query split into keyword tokens.
///
/// Tokens are the non-empty whitespace-separated pieces of the input, in
/// input order. They are sent as repeated `keywords` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    tokens: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `keywords=<token>` pairs, order preserved
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        self.tokens
            .iter()
            .map(|t| ("keywords", t.clone()))
            .collect()
    }
}

/// 1-based page number plus a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    page: u32,
    size: u32,
}

impl PageDescriptor {
    pub fn new(page: u32, size: u32) -> Result<Self> {
        if page == 0 {
            return Err(NewsdeskError::InvalidPage("page is 1-based".to_string()));
        }
        if size == 0 {
            return Err(NewsdeskError::InvalidPage(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self { page, size })
    }

    /// First page of the given size; a zero size is bumped to 1
    pub fn first(size: u32) -> Self {
        Self {
            page: 1,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Same size, different page; a zero page is bumped to 1
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            size: self.size,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}

/// Filter for `GET /news`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsFilter {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub status: Option<ItemStatus>,
}

impl NewsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_range(mut self, from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_wire().to_string()));
        }
        params
    }
}

/// Parse an RFC 3339 timestamp given on the command line
pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    s.trim()
        .parse::<Timestamp>()
        .map_err(|_| NewsdeskError::InvalidTimestamp(s.to_string()))
}
