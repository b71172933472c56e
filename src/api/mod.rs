//! News backend access.
//!
//! The [`NewsBackend`] trait is the only surface the sync engine and the
//! screens depend on. [`HttpBackend`] talks to the real REST service; tests
//! plug in scripted implementations.

pub mod client;
pub mod error;

use std::future::Future;

use serde::Deserialize;

use crate::error::Result;
use crate::query::{NewsFilter, PageDescriptor, Query};
use crate::types::{CreateNews, CreatePublisher, ItemId, NewsItem, Page, Pagination, Publisher};

pub use client::HttpBackend;
pub use error::{ApiError, ErrorCode, ErrorDetail};

/// Success envelope shared by every endpoint: `{"data": ..., "pagination": ...}`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<Vec<T>> {
    /// A missing `data` field reads as an empty page
    pub fn into_page(self) -> Page<T> {
        Page {
            items: self.data.unwrap_or_default(),
            pagination: self.pagination,
        }
    }
}

/// Operations the news backend offers
pub trait NewsBackend: Send + Sync + 'static {
    /// `GET /news/search/suggestions`
    fn suggestions(&self, query: &Query) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// `GET /news/search`
    fn search_news(
        &self,
        query: &Query,
        page: PageDescriptor,
    ) -> impl Future<Output = Result<Page<NewsItem>>> + Send;

    /// `GET /news`
    fn list_news(
        &self,
        filter: &NewsFilter,
        page: PageDescriptor,
    ) -> impl Future<Output = Result<Page<NewsItem>>> + Send;

    /// `GET /news/{id}`
    fn get_news(&self, id: &ItemId) -> impl Future<Output = Result<NewsItem>> + Send;

    /// `POST /news`
    fn create_news(&self, request: &CreateNews) -> impl Future<Output = Result<NewsItem>> + Send;

    /// `DELETE /news/{id}`
    fn delete_news(&self, id: &ItemId) -> impl Future<Output = Result<()>> + Send;

    /// `GET /publishers`
    fn list_publishers(
        &self,
        page: PageDescriptor,
    ) -> impl Future<Output = Result<Page<Publisher>>> + Send;

    /// `POST /publishers`
    fn create_publisher(
        &self,
        request: &CreatePublisher,
    ) -> impl Future<Output = Result<Publisher>> + Send;
}
