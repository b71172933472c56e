use std::sync::Arc;

use crate::api::NewsBackend;
use crate::config::Config;
use crate::sync::{FetchOutcome, Pager, PagerSnapshot, ScrollMetrics, ScrollTrigger};
use crate::toast::{Action, Toast};
use crate::types::Publisher;
use crate::validate::publisher_request;

use super::ActionResult;

/// Paginated publisher listing with creation
pub struct PublisherList<B: NewsBackend> {
    backend: Arc<B>,
    pager: Pager<Publisher>,
    trigger: ScrollTrigger,
}

impl<B: NewsBackend> PublisherList<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self::with_settings(
            backend,
            config.page_size,
            ScrollTrigger::new(config.scroll.default_threshold),
        )
    }

    pub fn with_settings(backend: Arc<B>, page_size: u32, trigger: ScrollTrigger) -> Self {
        Self {
            backend,
            pager: Pager::new(page_size),
            trigger,
        }
    }

    pub async fn load(&self) -> FetchOutcome {
        self.fetch(false).await
    }

    pub async fn load_more(&self) -> FetchOutcome {
        self.fetch(true).await
    }

    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Option<FetchOutcome> {
        if !self.trigger.should_fire(&metrics, &self.pager.snapshot()) {
            return None;
        }
        Some(self.load_more().await)
    }

    async fn fetch(&self, append: bool) -> FetchOutcome {
        let backend = Arc::clone(&self.backend);
        self.pager
            .fetch(append, move |page| async move {
                backend.list_publishers(page).await
            })
            .await
    }

    /// Register a publisher; it is shown first in the listing
    pub async fn create(
        &self,
        name: &str,
        domain: &str,
        description: Option<&str>,
    ) -> ActionResult<Publisher> {
        let request = publisher_request(name, domain, description)
            .map_err(|e| Toast::for_failure(Action::CreatePublisher, &e))?;

        let publisher = self
            .backend
            .create_publisher(&request)
            .await
            .map_err(|e| {
                tracing::warn!("failed to create publisher {}: {e}", request.domain);
                Toast::for_failure(Action::CreatePublisher, &e)
            })?;

        self.pager.with_results(|set| set.prepend(publisher.clone()));
        Ok((publisher, Toast::success("Publisher added")))
    }

    /// Toast for the most recent failed page load, if any
    pub fn load_error(&self) -> Option<Toast> {
        self.pager
            .last_error()
            .map(|reason| Toast::for_load_failure(Action::LoadPublishers, &reason))
    }

    pub fn items(&self) -> Vec<Publisher> {
        self.pager.items()
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        self.pager.snapshot()
    }

    pub fn pager(&self) -> &Pager<Publisher> {
        &self.pager
    }
}
