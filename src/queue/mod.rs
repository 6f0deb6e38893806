// Queue module exports

pub mod error;
pub mod message_queue;
pub mod registry;

pub use error::QueueError;
pub use message_queue::{MessageQueue, QueueStats, MAX_WAIT_SECS};
pub use registry::{QueueRegistry, QueueStatsInfo, StatsSummary};
