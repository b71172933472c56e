//! Paginated result fetching.
//!
//! A fetch is split into `begin` (state reset, page choice, sequence ticket)
//! and `complete` (apply or discard the response). [`Pager::fetch`] runs both
//! around one awaited request. The state lock is never held across the await,
//! so a fresh query can start while an older request is still in flight; the
//! older completion is then recognized as stale and dropped.

use std::future::Future;

use parking_lot::Mutex;

use crate::error::Result;
use crate::query::PageDescriptor;
use crate::types::{Page, Pagination};

use super::result_set::{Keyed, ResultSet};
use super::sequence::{RequestSequence, Ticket};

/// What a completed (or refused) fetch did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fresh fetch applied; the result set now holds `count` items
    Replaced { count: usize },
    /// Continuation applied; `duplicates` items were already present
    Appended { added: usize, duplicates: usize },
    /// The request failed. A fresh fetch cleared the results; a
    /// continuation left them untouched.
    Failed { append: bool },
    /// A newer request was issued while this one was in flight
    Stale,
    /// A continuation was refused because a primary load is running
    Skipped,
}

/// Releases the busy flag of a fetch whose future is dropped mid-request
struct InFlight<'a, T: Keyed> {
    pager: &'a Pager<T>,
    ticket: Option<FetchTicket>,
}

impl<T: Keyed> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.pager.abandon(ticket);
        }
    }
}

/// An issued page request
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    ticket: Ticket,
    page: PageDescriptor,
    append: bool,
}

impl FetchTicket {
    pub fn page(&self) -> PageDescriptor {
        self.page
    }

    pub fn is_append(&self) -> bool {
        self.append
    }
}

/// Busy and availability flags, copied out for the scroll trigger and views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagerSnapshot {
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub len: usize,
    pub current_page: u32,
}

struct PagerState<T: Keyed> {
    results: ResultSet<T>,
    pagination: Option<Pagination>,
    has_more: bool,
    loading: bool,
    loading_more: bool,
    /// Last successfully applied page; 0 before the first success
    current_page: u32,
    last_error: Option<String>,
}

pub struct Pager<T: Keyed> {
    state: Mutex<PagerState<T>>,
    sequence: RequestSequence,
    page_size: u32,
}

impl<T: Keyed> Pager<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: Mutex::new(PagerState {
                results: ResultSet::new(),
                pagination: None,
                has_more: true,
                loading: false,
                loading_more: false,
                current_page: 0,
                last_error: None,
            }),
            sequence: RequestSequence::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Start a fetch.
    ///
    /// A fresh fetch (`append == false`) always starts: it clears results and
    /// pagination, sets `has_more` and the primary busy flag, and requests
    /// page 1. A continuation requests the page after the last successful one
    /// and is refused while any load is running.
    pub fn begin(&self, append: bool) -> Option<FetchTicket> {
        let mut state = self.state.lock();

        let page = if append {
            if state.loading || state.loading_more {
                return None;
            }
            state.loading_more = true;
            PageDescriptor::first(self.page_size).with_page(state.current_page + 1)
        } else {
            state.results.clear();
            state.pagination = None;
            state.has_more = true;
            state.loading = true;
            state.loading_more = false;
            state.current_page = 0;
            PageDescriptor::first(self.page_size)
        };

        state.last_error = None;
        let ticket = self.sequence.issue();
        tracing::debug!(
            "page request #{} (page {}, append: {append})",
            ticket.value(),
            page.page()
        );

        Some(FetchTicket {
            ticket,
            page,
            append,
        })
    }

    /// Apply the response for `ticket`, unless a newer fetch has been issued
    pub fn complete(&self, ticket: FetchTicket, result: Result<Page<T>>) -> FetchOutcome {
        let mut state = self.state.lock();

        if !self.sequence.is_current(ticket.ticket) {
            tracing::debug!(
                "discarding stale page {} response (request #{})",
                ticket.page.page(),
                ticket.ticket.value()
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                state.has_more = !page.items.is_empty()
                    && page.pagination.is_none_or(|p| p.has_next());
                if page.pagination.is_some() {
                    state.pagination = page.pagination;
                }

                let outcome = if ticket.append {
                    let received = page.items.len();
                    let added = state.results.append_unique(page.items);
                    FetchOutcome::Appended {
                        added,
                        duplicates: received - added,
                    }
                } else {
                    state.results.replace(page.items);
                    FetchOutcome::Replaced {
                        count: state.results.len(),
                    }
                };

                state.current_page = ticket.page.page();
                state.loading = false;
                state.loading_more = false;
                outcome
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                if ticket.append {
                    tracing::warn!("failed to load page {}: {e}", ticket.page.page());
                    state.loading_more = false;
                } else {
                    tracing::warn!("failed to load results: {e}");
                    state.results.clear();
                    state.pagination = None;
                    state.has_more = false;
                    state.loading = false;
                }
                FetchOutcome::Failed {
                    append: ticket.append,
                }
            }
        }
    }

    /// Run one fetch: `begin`, await `fetch` for the chosen page, `complete`
    pub async fn fetch<F, Fut>(&self, append: bool, fetch: F) -> FetchOutcome
    where
        F: FnOnce(PageDescriptor) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let Some(ticket) = self.begin(append) else {
            return FetchOutcome::Skipped;
        };
        let mut guard = InFlight {
            pager: self,
            ticket: Some(ticket),
        };
        let result = fetch(ticket.page).await;
        guard.ticket = None;
        self.complete(ticket, result)
    }

    /// Give up on `ticket` without a response.
    ///
    /// If it is still the latest request its busy flag is cleared and the
    /// sequence invalidated, so the next continuation can start.
    pub fn abandon(&self, ticket: FetchTicket) {
        let mut state = self.state.lock();
        if !self.sequence.is_current(ticket.ticket) {
            return;
        }
        self.sequence.invalidate();
        tracing::debug!(
            "page {} request #{} abandoned",
            ticket.page.page(),
            ticket.ticket.value()
        );
        if ticket.append {
            state.loading_more = false;
        } else {
            state.loading = false;
        }
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        let state = self.state.lock();
        PagerSnapshot {
            has_more: state.has_more,
            loading: state.loading,
            loading_more: state.loading_more,
            len: state.results.len(),
            current_page: state.current_page,
        }
    }

    /// Message of the most recent failed fetch, cleared when a fetch begins
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.lock().pagination
    }

    /// Run `f` with exclusive access to the result set
    pub fn with_results<R>(&self, f: impl FnOnce(&mut ResultSet<T>) -> R) -> R {
        f(&mut self.state.lock().results)
    }

    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.state.lock().results.to_vec()
    }

    /// Drop results and flags, invalidating any request in flight
    pub fn reset(&self) {
        let mut state = self.state.lock();
        self.sequence.invalidate();
        state.results.clear();
        state.pagination = None;
        state.has_more = true;
        state.loading = false;
        state.loading_more = false;
        state.current_page = 0;
        state.last_error = None;
    }
}
