use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::response::{ApiError, ValueResponse};
use super::utils::{extract_timeout, extract_value, first_param, validate_queue_name};
use crate::queue::QueueRegistry;

/// Raw query pairs in request order; repeated keys are kept.
type QueryPairs = Vec<(String, String)>;

/// Builds the queue routes over a shared registry.
pub fn routes() -> Router<Arc<QueueRegistry>> {
    Router::new().route("/{queue}", get(get_action).put(put_action))
}

/// GET /{queue}[?timeout=N] - Pop the head value, optionally waiting up to N seconds
async fn get_action(
    State(registry): State<Arc<QueueRegistry>>,
    Path(queue_name): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<ValueResponse>, ApiError> {
    let queue_name = validate_queue_name(&queue_name)?;
    let timeout = extract_timeout(first_param(&params, "timeout"))?;

    let queue = registry.resolve_queue(queue_name);

    let value = match timeout {
        Some(max_wait_secs) => {
            tracing::debug!(queue = %queue_name, max_wait_secs, "dequeue with timeout");
            queue.dequeue_with_timeout(max_wait_secs).await?
        }
        None => queue.dequeue(),
    };

    value
        .map(|value| Json(ValueResponse { value }))
        .ok_or(ApiError::NotFound)
}

/// PUT /{queue}?v=value - Push a value onto the tail
async fn put_action(
    State(registry): State<Arc<QueueRegistry>>,
    Path(queue_name): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<&'static str>, ApiError> {
    let queue_name = validate_queue_name(&queue_name)?;
    let value = extract_value(first_param(&params, "v").map(str::to_string))?;

    registry.resolve_queue(queue_name).enqueue(value);

    Ok(Json("OK"))
}
