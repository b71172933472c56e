use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::NewsBackend;
use crate::config::Config;
use crate::query::Query;
use crate::sync::{
    DebounceOutcome, Debouncer, FetchOutcome, Pager, PagerSnapshot, ScrollMetrics, ScrollTrigger,
    SuggestionFetcher,
};
use crate::toast::{Action, Toast};
use crate::types::NewsItem;

#[derive(Debug, Default)]
struct OverlayState {
    open: bool,
    input: String,
    committed: Query,
}

/// Command-palette search: live suggestions while typing, paginated results
/// once a query is committed.
pub struct SearchOverlay<B: NewsBackend> {
    backend: Arc<B>,
    state: Mutex<OverlayState>,
    debouncer: Debouncer,
    suggestions: Arc<SuggestionFetcher>,
    pager: Pager<NewsItem>,
    trigger: ScrollTrigger,
}

impl<B: NewsBackend> SearchOverlay<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self::with_settings(
            backend,
            config.page_size,
            Debouncer::new(config.debounce_delay()),
            ScrollTrigger::new(config.scroll.default_threshold),
        )
    }

    pub fn with_settings(
        backend: Arc<B>,
        page_size: u32,
        debouncer: Debouncer,
        trigger: ScrollTrigger,
    ) -> Self {
        Self {
            backend,
            state: Mutex::new(OverlayState::default()),
            debouncer,
            suggestions: Arc::new(SuggestionFetcher::new()),
            pager: Pager::new(page_size),
            trigger,
        }
    }

    pub fn open(&self) {
        self.state.lock().open = true;
    }

    /// Close the overlay: cancel the pending lookup and forget everything
    pub fn close(&self) {
        self.debouncer.cancel();
        self.suggestions.clear();
        self.pager.reset();
        *self.state.lock() = OverlayState::default();
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// React to the input text changing.
    ///
    /// Non-empty text schedules a suggestion lookup after the debounce delay.
    /// Empty text clears suggestions and results right away.
    pub fn on_input(&self, text: &str) -> DebounceOutcome {
        self.state.lock().input = text.to_string();

        let backend = Arc::clone(&self.backend);
        let fetcher = Arc::clone(&self.suggestions);
        let outcome = self.debouncer.notify(text, move |text| async move {
            fetcher.fetch(backend.as_ref(), &text).await;
        });

        if outcome == DebounceOutcome::Cleared {
            self.suggestions.clear();
            self.pager.reset();
            self.state.lock().committed = Query::default();
        }
        outcome
    }

    /// Run a fresh search for `text` (enter pressed or suggestion picked)
    pub async fn commit(&self, text: &str) -> FetchOutcome {
        self.debouncer.cancel();
        self.suggestions.clear();

        let query = Query::parse(text);
        {
            let mut state = self.state.lock();
            state.input = text.to_string();
            state.committed = query;
        }
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
        let query = self.state.lock().committed.clone();
        self.pager
            .fetch(append, move |page| async move {
                backend.search_news(&query, page).await
            })
            .await
    }

    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    pub fn query(&self) -> Query {
        self.state.lock().committed.clone()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.suggestions.current()
    }

    pub fn suggestion_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Toast for the most recent failed page load, if any
    pub fn load_error(&self) -> Option<Toast> {
        self.pager
            .last_error()
            .map(|reason| Toast::for_load_failure(Action::Search, &reason))
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
}
