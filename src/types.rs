use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::error::NewsdeskError;
use crate::sync::result_set::Keyed;

/// Opaque identifier for a news item or publisher.
///
/// The backend sends either a JSON number or a string; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ItemId(n.to_string()),
            RawId::Text(s) => ItemId(s),
        })
    }
}

/// Processing status of a news item on the backend.
///
/// `Pending` is what the backend calls "added": the article was accepted but
/// not yet scraped. The other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemStatus {
    #[default]
    Pending,
    Synced,
    Failed,
}

impl ItemStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "added",
            ItemStatus::Synced => "synced",
            ItemStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ItemStatus::Pending)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ItemStatus {
    type Err = NewsdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(ItemStatus::Pending),
            "synced" => Ok(ItemStatus::Synced),
            "failed" => Ok(ItemStatus::Failed),
            _ => Err(NewsdeskError::InvalidStatus(s.to_string())),
        }
    }
}

impl Serialize for ItemStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub const VALID_STATUSES: &[&str] = &["added", "synced", "failed"];

/// News category accepted by `POST /news`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Business,
    Technology,
    Science,
    Health,
    Sports,
    Entertainment,
    World,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Politics => "politics",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Health => "health",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::World => "world",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = NewsdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "politics" => Ok(Category::Politics),
            "business" => Ok(Category::Business),
            "technology" | "tech" => Ok(Category::Technology),
            "science" => Ok(Category::Science),
            "health" => Ok(Category::Health),
            "sports" => Ok(Category::Sports),
            "entertainment" => Ok(Category::Entertainment),
            "world" => Ok(Category::World),
            _ => Err(NewsdeskError::InvalidCategory(s.to_string())),
        }
    }
}

pub const VALID_CATEGORIES: &[&str] = &[
    "politics",
    "business",
    "technology",
    "science",
    "health",
    "sports",
    "entertainment",
    "world",
];

/// A news article as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: ItemId,

    /// Empty until the backend has scraped the article
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub status: ItemStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl NewsItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: None,
            status,
            published_at: None,
            author: None,
            content: None,
            url: None,
            publisher: None,
        }
    }

    /// Apply a fresher copy of this item, keeping existing values for any
    /// field the update leaves empty. Status always comes from the update.
    pub fn merge_from(&mut self, update: NewsItem) {
        if !update.title.is_empty() {
            self.title = update.title;
        }
        self.status = update.status;
        if update.thumbnail.is_some() {
            self.thumbnail = update.thumbnail;
        }
        if update.published_at.is_some() {
            self.published_at = update.published_at;
        }
        if update.author.is_some() {
            self.author = update.author;
        }
        if update.content.is_some() {
            self.content = update.content;
        }
        if update.url.is_some() {
            self.url = update.url;
        }
        if update.publisher.is_some() {
            self.publisher = update.publisher;
        }
    }
}

impl Keyed for NewsItem {
    type Key = ItemId;

    fn key(&self) -> &ItemId {
        &self.id
    }
}

/// A news source registered with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: ItemId,
    pub name: String,
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Keyed for Publisher {
    type Key = ItemId;

    fn key(&self) -> &ItemId {
        &self.id
    }
}

/// Pagination block attached to listing responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of results with optional pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Body of `POST /news`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNews {
    pub url: String,
    pub category: Category,
}

/// Body of `POST /publishers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePublisher {
    pub name: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
