//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Container init parameters + resource lookup
//!     → logging.rs (resolve log-config path, read EnvFilter directives)
//!     → global tracing subscriber
//!
//! All subsystems produce structured log events through `tracing`.
//! ```
//!
//! # Design Decisions
//! - Log configuration is best-effort: a missing resource never blocks
//!   startup
//! - Bootstrap runs before any other init step so later failures are
//!   observable

pub mod logging;

pub use logging::{bootstrap_logging, DEFAULT_LOG_CONFIG_PATH, LOG_CONFIG_PARAM};
