//! Request-interception filter for a lightweight MVC dispatcher.
//!
//! Sits in front of an HTTP server and decides, per request, whether to
//! answer through the internal dispatcher or hand the request unchanged
//! to the next stage of the processing chain. Owns the one-time startup
//! sequence: logging bootstrap, configuration resolution and validation,
//! dispatcher construction.
//!
//! ```text
//! container ──▶ WebFilter::handle ──▶ classify
//!                     │                  │ owned type
//!                     │                  ▼
//!                     │            Dispatcher ──▶ response
//!                     │ foreign type
//!                     ▼
//!               passthrough (chain continuation, untouched)
//! ```

pub mod config;
pub mod container;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod http;
pub mod observability;

pub use config::{ConfigSource, WebConfig};
pub use error::{DispatchError, InitError};
pub use filter::WebFilter;
