use parking_lot::Mutex;

use crate::api::NewsBackend;
use crate::query::Query;

use super::sequence::RequestSequence;

/// Fetches autocomplete suggestions and keeps the latest list.
///
/// Each fetch takes a sequence ticket; a response is applied only if no
/// newer fetch (or `clear`) happened while it was in flight.
#[derive(Default)]
pub struct SuggestionFetcher {
    sequence: RequestSequence,
    current: Mutex<Vec<String>>,
}

impl SuggestionFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch suggestions for `text`.
    ///
    /// Returns the list that was applied, or `None` if the response arrived
    /// after a newer request and was discarded. Failures are logged and
    /// yield an empty list.
    pub async fn fetch<B: NewsBackend>(&self, backend: &B, text: &str) -> Option<Vec<String>> {
        let ticket = self.sequence.issue();
        let query = Query::parse(text);

        let suggestions = if query.is_empty() {
            Vec::new()
        } else {
            match backend.suggestions(&query).await {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!("failed to fetch suggestions for '{text}': {e}");
                    Vec::new()
                }
            }
        };

        let mut current = self.current.lock();
        if !self.sequence.is_current(ticket) {
            tracing::debug!("dropping stale suggestions (request #{})", ticket.value());
            return None;
        }
        *current = suggestions.clone();
        Some(suggestions)
    }

    pub fn current(&self) -> Vec<String> {
        self.current.lock().clone()
    }

    /// Empty the list and make any in-flight response stale
    pub fn clear(&self) {
        let mut current = self.current.lock();
        self.sequence.invalidate();
        current.clear();
    }
}
