//! The filter entry point.
//!
//! # Data Flow
//! ```text
//! Container startup
//!     → WebFilter::init
//!         logging bootstrap → config resolve + validate → dispatcher build
//!     → Ready handle | InitError (terminal; nothing is served)
//!
//! Per request (Ready):
//!     → negotiate charset → RequestContext → classify
//!     → owned type:   dispatcher.process (errors become 500, logged)
//!     → foreign type: passthrough(request), untouched
//!     → finalize (charset applied once) → container
//! ```
//!
//! # Design Decisions
//! - Initialization produces an immutable handle; no mutable dispatcher
//!   slot shared across requests
//! - Request-time failures never escape `handle`; init-time failures
//!   always propagate
//! - Failed is terminal: every request answers 500 and nothing is
//!   dispatched or passed through

pub mod classify;
pub mod context;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;
use futures_util::future::BoxFuture;

use crate::config::{validate_config, ConfigSource, WebConfig};
use crate::container::InitContext;
use crate::dispatch::{Dispatcher, DispatcherFactory};
use crate::error::InitError;
use crate::filter::context::{finalize, Charset, RequestContext};
use crate::observability::bootstrap_logging;

/// Continuation to the next stage of the processing chain, invoked for
/// request types the configuration does not own.
pub type Passthrough = Box<dyn FnOnce(Request<Body>) -> BoxFuture<'static, Response<Body>> + Send>;

/// Everything a ready filter shares across requests. Read-only after
/// initialization, so concurrent requests need no locking.
struct ReadyState {
    config: WebConfig,
    dispatcher: Box<dyn Dispatcher>,
}

enum FilterState {
    Ready(Arc<ReadyState>),
    Failed,
}

/// Request-interception filter arbitrating between the internal
/// dispatcher and the passthrough chain.
pub struct WebFilter {
    state: FilterState,
}

impl std::fmt::Debug for WebFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebFilter").finish_non_exhaustive()
    }
}

impl WebFilter {
    /// Run the one-time startup sequence and produce a ready filter.
    ///
    /// Ordering is fixed: logging bootstrap first so later failures are
    /// observable, then configuration resolution and validation, then
    /// dispatcher construction and its own startup. Any failure is fatal;
    /// there is no partial ready state. Known [`InitError`] conditions
    /// propagate as-is, anything else is wrapped as
    /// [`InitError::Startup`] with its cause.
    pub fn init(
        source: ConfigSource,
        ctx: &dyn InitContext,
        factory: &dyn DispatcherFactory,
    ) -> Result<Self, InitError> {
        match Self::startup(source, ctx, factory) {
            Ok(state) => {
                tracing::info!(
                    resource_root = %state.config.resource_root,
                    template_root = %state.config.template_root,
                    request_types = state.config.request_types.len(),
                    "Filter initialized"
                );
                Ok(Self {
                    state: FilterState::Ready(Arc::new(state)),
                })
            }
            Err(err) => {
                tracing::error!(error = ?err, "Filter startup failed");
                Err(err)
            }
        }
    }

    fn startup(
        source: ConfigSource,
        ctx: &dyn InitContext,
        factory: &dyn DispatcherFactory,
    ) -> Result<ReadyState, InitError> {
        // Bootstrap runs before config parsing, so the standalone flag is
        // only known when an explicit config was supplied.
        let standalone = source.standalone().unwrap_or(false);
        bootstrap_logging(ctx, standalone)?;

        let mut config = source.resolve(ctx)?;
        validate_config(&mut config, ctx.locator())?;

        let mut dispatcher = factory
            .build(&config)
            .map_err(|e| InitError::Startup(Box::new(e)))?;
        dispatcher
            .init()
            .map_err(|e| InitError::Startup(Box::new(e)))?;

        Ok(ReadyState { config, dispatcher })
    }

    /// A terminally failed filter: every request answers with a server
    /// error. Containers that keep serving after a failed init use this
    /// as the permanent handle.
    pub fn failed() -> Self {
        Self {
            state: FilterState::Failed,
        }
    }

    /// Whether initialization reached the ready state.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, FilterState::Ready(_))
    }

    /// The frozen configuration, when ready.
    pub fn config(&self) -> Option<&WebConfig> {
        match &self.state {
            FilterState::Ready(state) => Some(&state.config),
            FilterState::Failed => None,
        }
    }

    /// Handle one request.
    ///
    /// Never fails: every request-time error is contained here and
    /// converted to a server-error response plus a log entry, so a single
    /// bad request cannot affect the container or later requests.
    pub async fn handle(&self, req: Request<Body>, passthrough: Passthrough) -> Response<Body> {
        let state = match &self.state {
            FilterState::Ready(state) => state,
            FilterState::Failed => {
                let charset = Charset::negotiate(&req);
                return finalize(StatusCode::INTERNAL_SERVER_ERROR.into_response(), &charset);
            }
        };

        let ctx = RequestContext::new(&state.config, &req);
        let charset = ctx.charset().clone();

        if !ctx.is_owned() {
            tracing::debug!(
                request_type = %ctx.request_type(),
                path = %req.uri().path(),
                "Passing request through"
            );
            drop(ctx);
            let response = passthrough(req).await;
            return finalize(response, &charset);
        }

        tracing::debug!(
            request_type = %ctx.request_type(),
            path = %req.uri().path(),
            "Dispatching request"
        );
        let response = match state.dispatcher.process(&ctx, req) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = ?err, "Dispatcher failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
        finalize(response, &charset)
    }

    /// Teardown is a no-op by contract; the dispatcher lives for the
    /// process lifetime.
    pub fn destroy(&self) {}
}
