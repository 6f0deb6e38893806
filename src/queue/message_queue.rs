use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam::queue::SegQueue;
use tokio::sync::Notify;
use tokio::time::Instant;

use super::error::QueueError;

/// Longest wait, in seconds, that `dequeue_with_timeout` will honor.
pub const MAX_WAIT_SECS: u64 = 30;

pub struct MessageQueue {
    name: String,
    items: SegQueue<String>,
    stats: QueueStats,
    notify: Notify,
}

/// Monotonic counters kept per queue for diagnostics.
#[derive(Debug, Default)]
pub struct QueueStats {
    enqueued_total: AtomicU64,
    dequeued_total: AtomicU64,
    wait_timeouts: AtomicU64,
}

impl QueueStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total.load(Ordering::SeqCst)
    }

    pub fn dequeued_total(&self) -> u64 {
        self.dequeued_total.load(Ordering::SeqCst)
    }

    /// Number of timed waits that reached their deadline without a value.
    pub fn wait_timeouts(&self) -> u64 {
        self.wait_timeouts.load(Ordering::SeqCst)
    }

    fn record_enqueue(&self) {
        self.enqueued_total.fetch_add(1, Ordering::SeqCst);
    }

    fn record_dequeue(&self) {
        self.dequeued_total.fetch_add(1, Ordering::SeqCst);
    }

    fn record_wait_timeout(&self) {
        self.wait_timeouts.fetch_add(1, Ordering::SeqCst);
    }
}

impl MessageQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: SegQueue::new(),
            stats: QueueStats::new(),
            notify: Notify::new(),
        }
    }

    /// Appends `value` to the tail and wakes one waiting consumer, if any.
    pub fn enqueue(&self, value: impl Into<String>) {
        self.items.push(value.into());
        self.stats.record_enqueue();
        self.notify.notify_one();
    }

    /// Removes the head value without waiting.
    pub fn dequeue(&self) -> Option<String> {
        let value = self.items.pop()?;
        self.stats.record_dequeue();
        Some(value)
    }

    /// Removes the head value, waiting up to `max_wait_secs` for one to arrive.
    ///
    /// The deadline is fixed when the call starts. Reaching it with the queue
    /// still empty yields `Ok(None)` and leaves the queue untouched. Requests
    /// above [`MAX_WAIT_SECS`] are rejected before any state is read.
    ///
    /// Dropping the returned future abandons the wait; a wake-up it had
    /// already received is handed on to another waiter by `Notify`.
    pub async fn dequeue_with_timeout(
        &self,
        max_wait_secs: u64,
    ) -> Result<Option<String>, QueueError> {
        if max_wait_secs > MAX_WAIT_SECS {
            return Err(QueueError::TimeoutLimitExceeded {
                requested: max_wait_secs,
                limit: MAX_WAIT_SECS,
            });
        }

        let deadline = Instant::now() + Duration::from_secs(max_wait_secs);

        if let Some(value) = self.dequeue() {
            return Ok(Some(value));
        }

        if max_wait_secs == 0 {
            return Ok(None);
        }

        match tokio::time::timeout_at(deadline, self.wait_for_value()).await {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                // A value may have landed between the last wake and the deadline.
                let value = self.dequeue();
                if value.is_none() {
                    self.stats.record_wait_timeout();
                    tracing::debug!(
                        queue = %self.name,
                        max_wait_secs,
                        "wait expired with queue empty"
                    );
                }
                Ok(value)
            }
        }
    }

    async fn wait_for_value(&self) -> String {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking, so an enqueue that lands
            // between the check and the await is not missed.
            notified.as_mut().enable();

            if let Some(value) = self.dequeue() {
                return value;
            }

            notified.await;
            // Woken, but another consumer may have taken the value first.
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl std::fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageQueue")
            .field("name", &self.name)
            .field("len", &self.items.len())
            .field("stats", &self.stats)
            .finish()
    }
}
