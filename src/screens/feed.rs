use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::NewsBackend;
use crate::config::Config;
use crate::query::NewsFilter;
use crate::sync::{
    FetchOutcome, Pager, PagerSnapshot, PollOutcome, PollPolicy, PollState, Poller,
    ScrollMetrics, ScrollTrigger,
};
use crate::toast::{Action, Toast};
use crate::types::{Category, ItemId, NewsItem};
use crate::validate::news_request;

use super::ActionResult;

/// The main news listing: filtered pages, create with status polling, delete
pub struct NewsFeed<B: NewsBackend> {
    backend: Arc<B>,
    filter: Mutex<NewsFilter>,
    pager: Arc<Pager<NewsItem>>,
    trigger: ScrollTrigger,
    poller: Poller,
}

impl<B: NewsBackend> NewsFeed<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self::with_settings(
            backend,
            config.page_size,
            ScrollTrigger::new(config.scroll.feed_threshold),
            config.poll_policy(),
        )
    }

    pub fn with_settings(
        backend: Arc<B>,
        page_size: u32,
        trigger: ScrollTrigger,
        policy: PollPolicy,
    ) -> Self {
        Self {
            backend,
            filter: Mutex::new(NewsFilter::default()),
            pager: Arc::new(Pager::new(page_size)),
            trigger,
            poller: Poller::new(policy),
        }
    }

    /// Load the first page for the current filter, replacing the listing
    pub async fn load(&self) -> FetchOutcome {
        self.fetch(false).await
    }

    /// Replace the filter and reload from page 1
    pub async fn set_filter(&self, filter: NewsFilter) -> FetchOutcome {
        *self.filter.lock() = filter;
        self.fetch(false).await
    }

    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(false).await
    }

    /// Request the page after the last one loaded
    pub async fn load_more(&self) -> FetchOutcome {
        self.fetch(true).await
    }

    /// Load the next page if the scroll position calls for it
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Option<FetchOutcome> {
        if !self.trigger.should_fire(&metrics, &self.pager.snapshot()) {
            return None;
        }
        Some(self.load_more().await)
    }

    async fn fetch(&self, append: bool) -> FetchOutcome {
        let backend = Arc::clone(&self.backend);
        let filter = self.filter.lock().clone();
        self.pager
            .fetch(append, move |page| async move {
                backend.list_news(&filter, page).await
            })
            .await
    }

    /// Submit a new article.
    ///
    /// On success the item goes to the top of the listing and any earlier
    /// poll session ends. A new session starts while the item is pending.
    pub async fn create(&self, url: &str, category: Category) -> ActionResult<NewsItem> {
        let request =
            news_request(url, category).map_err(|e| Toast::for_failure(Action::CreateNews, &e))?;

        let item = self
            .backend
            .create_news(&request)
            .await
            .map_err(|e| {
                tracing::warn!("failed to create news item for {}: {e}", request.url);
                Toast::for_failure(Action::CreateNews, &e)
            })?;

        self.pager.with_results(|set| set.prepend(item.clone()));

        if item.status == self.poller.policy().pending {
            self.poller.start(
                Arc::clone(&self.backend),
                item.id.clone(),
                Arc::clone(&self.pager),
            );
        } else {
            // Already processed; any earlier session still ends
            self.poller.cancel();
        }

        Ok((item, Toast::success("Article added")))
    }

    /// Delete an article and drop it from the listing
    pub async fn delete(&self, id: &ItemId) -> ActionResult<()> {
        self.backend.delete_news(id).await.map_err(|e| {
            tracing::warn!("failed to delete news item {id}: {e}");
            Toast::for_failure(Action::DeleteNews, &e)
        })?;

        self.pager.with_results(|set| set.remove(id));
        Ok(((), Toast::success("Article deleted")))
    }

    pub fn filter(&self) -> NewsFilter {
        self.filter.lock().clone()
    }

    /// Toast for the most recent failed page load, if any
    pub fn load_error(&self) -> Option<Toast> {
        self.pager
            .last_error()
            .map(|reason| Toast::for_load_failure(Action::LoadNews, &reason))
    }

    pub fn items(&self) -> Vec<NewsItem> {
        self.pager.items()
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        self.pager.snapshot()
    }

    pub fn pager(&self) -> &Pager<NewsItem> {
        &self.pager
    }

    pub fn poll_state(&self) -> PollState {
        self.poller.state()
    }

    /// Wait for the current poll session to end
    pub async fn wait_for_poll(&self) -> Option<PollOutcome> {
        self.poller.wait().await
    }
}
