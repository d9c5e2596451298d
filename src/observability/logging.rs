//! Bootstrap logging initialization.
//!
//! A log-config resource is a file of `EnvFilter` directives, one per
//! line. Activating it installs a fmt subscriber with that filter.

use std::fs;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::container::InitContext;
use crate::error::InitError;

/// Init parameter naming the log-config resource.
pub const LOG_CONFIG_PARAM: &str = "log-config-file";

/// Default log-config path, consulted only outside standalone mode.
pub const DEFAULT_LOG_CONFIG_PATH: &str = "conf/log-filter.env";

/// Activate the log configuration before any other startup step runs.
///
/// Path precedence: the `log-config-file` init parameter, else (when not
/// standalone) the default path, else none. A path that does not resolve
/// is skipped so startup continues; a resolved config that cannot be read
/// or parsed fails with [`InitError::Logging`]. An already installed
/// global subscriber is not an error.
pub fn bootstrap_logging(ctx: &dyn InitContext, standalone: bool) -> Result<(), InitError> {
    let path = ctx
        .init_parameter(LOG_CONFIG_PARAM)
        .filter(|p| !p.is_empty())
        .or_else(|| (!standalone).then(|| DEFAULT_LOG_CONFIG_PATH.to_string()));

    let Some(path) = path else {
        return Ok(());
    };
    let Some(resolved) = ctx.locator().resolve(&path) else {
        return Ok(());
    };

    let directives = fs::read_to_string(&resolved).map_err(|e| InitError::Logging(Box::new(e)))?;
    let directives = directives
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::try_new(directives).map_err(|e| InitError::Logging(Box::new(e)))?;

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    Ok(())
}
