pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod paths;
pub mod query;
pub mod screens;
pub mod sync;
pub mod toast;
pub mod types;
pub mod validate;

#[cfg(test)]
mod test_guards;

pub use api::{ApiError, ErrorCode, HttpBackend, NewsBackend};
pub use config::Config;
pub use error::{NewsdeskError, Result};
pub use query::{NewsFilter, PageDescriptor, Query};
pub use screens::{NewsFeed, PublisherList, SearchOverlay};
pub use toast::{Action, Toast, ToastLevel};
pub use types::{
    Category, CreateNews, CreatePublisher, ItemId, ItemStatus, NewsItem, Page, Pagination,
    Publisher,
};
