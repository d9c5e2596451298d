//! Error taxonomy for filter startup and request dispatch.

use thiserror::Error;

/// Fatal errors raised while the filter initializes.
///
/// Every variant aborts startup. The container receives them from
/// [`WebFilter::init`](crate::filter::WebFilter::init) and must not route
/// requests into a filter that returned one.
#[derive(Debug, Error)]
pub enum InitError {
    /// The logical config path could not be resolved by the container.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// The resource root or template root did not resolve.
    #[error("invalid resource path: {path}")]
    InvalidResourcePath { path: String },

    /// The resolved config file could not be read.
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file was read but did not parse.
    #[error("failed to parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The logging bootstrap step itself failed.
    #[error("logging bootstrap failed")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Any other startup failure, carrying the original cause so callers
    /// can still reach it without string inspection.
    #[error("filter startup failed")]
    Startup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised on the per-request dispatch path.
///
/// These never escape the filter: `handle` converts them into a server
/// error response plus a log entry.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A recognized request arrived but the engine is not available.
    #[error("dispatcher not available")]
    Unavailable,

    /// The dispatcher failed while starting up or processing a request.
    #[error("dispatch failed: {0}")]
    Failed(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    /// Wrap an arbitrary error as a dispatch failure.
    pub fn failed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DispatchError::Failed(Box::new(err))
    }
}
