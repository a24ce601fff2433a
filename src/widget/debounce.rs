//! Generation counter and cancellable debounce timer.
//!
//! The timer only owns the quiet period. Once it elapses the work is spawned
//! as its own task, so re-arming never aborts a lookup already on the wire;
//! stale results are instead rejected by comparing generation tags.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Monotonic version marker for asynchronous work
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Advance the generation, invalidating every outstanding tag.
    /// Returns the new tag.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether work tagged with `tag` may still apply its result
    pub fn is_current(&self, tag: u64) -> bool {
        self.current() == tag
    }
}

/// A single pending delayed action; arming again replaces it
#[derive(Debug, Default)]
pub struct DebounceTimer {
    handle: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `work` to run after `delay`, cancelling any pending schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so a later cancel() cannot abort work already started
            tokio::spawn(work);
        }));
    }

    /// Clear the pending schedule, if any. Work already fired is unaffected.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a schedule is still waiting out its delay
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
