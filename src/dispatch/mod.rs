//! Dispatcher boundary.
//!
//! The engine that turns an owned request into a response lives behind
//! these traits; its routing and template internals are the
//! collaborator's concern, not the filter's. The filter constructs it
//! exactly once from the validated configuration and keeps it for the
//! process lifetime.

use axum::body::Body;
use axum::http::{Request, Response};

use crate::config::WebConfig;
use crate::error::DispatchError;
use crate::filter::context::RequestContext;

/// The internal engine processing recognized requests.
pub trait Dispatcher: Send + Sync {
    /// One-time startup after construction. Failure fails filter init.
    fn init(&mut self) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Produce the response for an owned, classified request.
    fn process(
        &self,
        ctx: &RequestContext<'_>,
        req: Request<Body>,
    ) -> Result<Response<Body>, DispatchError>;
}

/// Constructs the dispatcher from a validated configuration.
pub trait DispatcherFactory: Send + Sync {
    /// Build the engine. Called once, after validation succeeds.
    fn build(&self, config: &WebConfig) -> Result<Box<dyn Dispatcher>, DispatchError>;
}
