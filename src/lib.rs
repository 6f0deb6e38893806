// namedq - In-memory named FIFO queues served over HTTP
//
// This library provides the queue store and its HTTP surface.
// Binary entry point is in src/main.rs

pub mod http;
pub mod queue;

pub use http::{router, HttpConfig, HttpServer};
pub use queue::{MessageQueue, QueueError, QueueRegistry, QueueStats, StatsSummary, MAX_WAIT_SECS};
