use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Quiet period between the last keystroke and the suggestion request
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// A timer is armed for the new text
    Scheduled,
    /// The text was empty: any pending timer was cancelled and nothing was
    /// scheduled. The caller should clear its suggestions.
    Cleared,
}

/// Coalesces rapid input changes into one delayed callback.
///
/// Every `notify` aborts the previous timer. Only the delay is abortable:
/// once it elapses the callback runs as its own task, so a later keystroke
/// cannot interrupt a request that is already under way.
pub struct Debouncer {
    delay: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new input. Must be called from within a tokio runtime.
    pub fn notify<F, Fut>(&self, text: &str, callback: F) -> DebounceOutcome
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut timer = self.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        if text.trim().is_empty() {
            return DebounceOutcome::Cleared;
        }

        let delay = self.delay;
        let text = text.to_string();
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(callback(text));
        }));
        DebounceOutcome::Scheduled
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }
    }

    /// True while a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}
