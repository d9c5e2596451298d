//! Axum adapter for the filter.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::filter::WebFilter;

/// Bridge the filter into an axum middleware stack.
///
/// Axum's `Next` is the chain-continuation capability: request types the
/// configuration does not own continue into the inner router untouched.
pub async fn filter_middleware(
    State(filter): State<Arc<WebFilter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    filter
        .handle(
            req,
            Box::new(move |req| Box::pin(async move { next.run(req).await })),
        )
        .await
}
