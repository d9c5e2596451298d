//! HTTP glue subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → request_id.rs (stamp x-request-id)
//!     → middleware.rs (bridge into WebFilter::handle)
//!     → owned type: dispatcher response
//!     → foreign type: axum Next → upstream.rs (forward untouched)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request_id;
pub mod upstream;

pub use middleware::filter_middleware;
pub use request_id::{RequestIdLayer, X_REQUEST_ID};
pub use upstream::UpstreamClient;
