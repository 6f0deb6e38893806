use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::message_queue::MessageQueue;

/// Maps queue names to their single shared [`MessageQueue`].
///
/// Queues are created on first resolution and never removed, so the map
/// grows with the number of distinct names seen over the process lifetime.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: DashMap<String, Arc<MessageQueue>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_queues: usize,
    pub queues: HashMap<String, QueueStatsInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStatsInfo {
    pub size: usize,
    pub enqueued_total: u64,
    pub dequeued_total: u64,
    pub wait_timeouts: u64,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queue registered under `name`, creating it if needed.
    ///
    /// Every caller resolving the same name gets the same instance, including
    /// callers racing on a name that does not exist yet.
    pub fn resolve_queue(&self, name: &str) -> Arc<MessageQueue> {
        let existing = self.queues.get(name).map(|entry| Arc::clone(entry.value()));
        if let Some(queue) = existing {
            return queue;
        }

        // The entry holds the shard write lock across the lookup and the insert;
        // it is released at the end of this statement.
        let (queue, created) = match self.queues.entry(name.to_string()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => {
                let queue = Arc::new(MessageQueue::new(name));
                entry.insert(Arc::clone(&queue));
                (queue, true)
            }
        };

        if created {
            tracing::info!(queue = %name, "created queue");
        }
        queue
    }

    /// Looks up a queue without creating it.
    pub fn get_queue(&self, name: &str) -> Option<Arc<MessageQueue>> {
        self.queues.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn list_queues(&self) -> Vec<String> {
        self.queues.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn stats_summary(&self) -> StatsSummary {
        let queues: HashMap<String, QueueStatsInfo> = self
            .queues
            .iter()
            .map(|entry| {
                let queue = entry.value();
                let stats = queue.stats();
                let info = QueueStatsInfo {
                    size: queue.len(),
                    enqueued_total: stats.enqueued_total(),
                    dequeued_total: stats.dequeued_total(),
                    wait_timeouts: stats.wait_timeouts(),
                };
                (entry.key().clone(), info)
            })
            .collect();

        StatsSummary {
            total_queues: queues.len(),
            queues,
        }
    }
}
