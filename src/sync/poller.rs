//! Bounded status polling for freshly created news items.
//!
//! The backend accepts an article in the pending ("added") state and scrapes
//! it asynchronously. A poll session checks the item on a fixed interval and
//! patches the local copy once a terminal status shows up. The session gives
//! up after a fixed number of attempts and leaves the item pending.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::api::NewsBackend;
use crate::types::{ItemId, ItemStatus, NewsItem};

use super::pager::Pager;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_ATTEMPTS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Status that means "keep polling"
    pub pending: ItemStatus,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_POLL_ATTEMPTS,
            pending: ItemStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The backend reported a non-pending status
    Settled(ItemStatus),
    /// The budget ran out while the item was still pending
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Idle,
    /// `attempt` ticks have fired so far
    Polling { attempt: u32 },
    Terminated(PollOutcome),
}

impl PollState {
    pub fn is_active(&self) -> bool {
        matches!(self, PollState::Polling { .. })
    }
}

struct Session {
    id: ItemId,
    handle: JoinHandle<()>,
    state: watch::Receiver<PollState>,
}

/// Owns at most one live poll session
pub struct Poller {
    policy: PollPolicy,
    session: Mutex<Option<Session>>,
}

impl Poller {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            session: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Start polling `id`, patching it inside `results` when it settles.
    ///
    /// Any live session is aborted first; its remaining attempts are dropped
    /// silently. Must be called from within a tokio runtime.
    pub fn start<B: NewsBackend>(&self, backend: Arc<B>, id: ItemId, results: Arc<Pager<NewsItem>>) {
        let mut session = self.session.lock();
        if let Some(previous) = session.take() {
            tracing::debug!("superseding poll session for news item {}", previous.id);
            previous.handle.abort();
        }

        let (tx, rx) = watch::channel(PollState::Polling { attempt: 0 });
        let policy = self.policy;
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            let outcome = run_session(policy, backend.as_ref(), &task_id, &results, &tx).await;
            tx.send_replace(PollState::Terminated(outcome));
        });

        *session = Some(Session {
            id,
            handle,
            state: rx,
        });
    }

    pub fn state(&self) -> PollState {
        self.session
            .lock()
            .as_ref()
            .map_or(PollState::Idle, |s| *s.state.borrow())
    }

    /// Wait for the current session to finish.
    ///
    /// Returns `None` when there is no session or it was aborted before
    /// reaching a terminal state.
    pub async fn wait(&self) -> Option<PollOutcome> {
        let mut rx = self.session.lock().as_ref()?.state.clone();
        let state = rx
            .wait_for(|s| matches!(s, PollState::Terminated(_)))
            .await
            .ok()?;
        match *state {
            PollState::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Abort the live session, if any, and return to `Idle`
    pub fn cancel(&self) {
        if let Some(session) = self.session.lock().take() {
            session.handle.abort();
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(PollPolicy::default())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.handle.abort();
        }
    }
}

async fn run_session<B: NewsBackend>(
    policy: PollPolicy,
    backend: &B,
    id: &ItemId,
    results: &Pager<NewsItem>,
    state: &watch::Sender<PollState>,
) -> PollOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let mut ticker = tokio::time::interval_at(Instant::now() + policy.interval, policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempt = 0;
    loop {
        ticker.tick().await;
        attempt += 1;
        state.send_replace(PollState::Polling { attempt });

        match backend.get_news(id).await {
            Ok(update) if update.status != policy.pending => {
                let status = update.status;
                let patched =
                    results.with_results(|set| set.patch(id, |item| item.merge_from(update)));
                if !patched {
                    tracing::debug!("news item {id} is no longer listed; nothing to patch");
                }
                tracing::info!("news item {id} is {status} after {attempt} check(s)");
                return PollOutcome::Settled(status);
            }
            Ok(_) => tracing::debug!("news item {id} still pending (check {attempt})"),
            Err(e) => tracing::warn!("status check {attempt} for news item {id} failed: {e}"),
        }

        if attempt >= max_attempts {
            tracing::info!(
                "news item {id} still pending after {attempt} checks; giving up until refreshed"
            );
            return PollOutcome::Exhausted { attempts: attempt };
        }
    }
}
