use std::sync::Arc;

use namedq::{HttpConfig, HttpServer, QueueRegistry};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("namedq=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = HttpConfig::from_env();

    // One registry for the whole process, shared with every request handler
    let registry = Arc::new(QueueRegistry::new());

    let server = HttpServer::new(config, registry.clone());
    server.run().await?;

    let summary = registry.stats_summary();
    tracing::info!(total_queues = summary.total_queues, "final queue stats");
    for (name, info) in &summary.queues {
        tracing::info!(
            queue = %name,
            size = info.size,
            enqueued = info.enqueued_total,
            dequeued = info.dequeued_total,
            wait_timeouts = info.wait_timeouts,
            "queue stats"
        );
    }

    Ok(())
}
