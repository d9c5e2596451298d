//! Configuration validation.
//!
//! # Responsibilities
//! - Resolve the resource and template roots through the container
//! - Soft-fail the optional tool config (warn and clear)
//! - Rewrite path fields from logical to resolved form
//!
//! # Design Decisions
//! - Validation runs once, regardless of how the config was obtained
//! - Missing roots are fatal; a missing tool config is not

use crate::config::schema::WebConfig;
use crate::container::ResourceLocator;
use crate::error::InitError;

/// Validate a configuration and rewrite its path fields in place.
///
/// This is the only point in the configuration lifecycle where mutation
/// is permitted; afterwards the value is frozen for the life of the
/// filter.
pub fn validate_config(config: &mut WebConfig, locator: &dyn ResourceLocator) -> Result<(), InitError> {
    let resources = locator
        .resolve(&config.resource_root)
        .ok_or_else(|| InitError::InvalidResourcePath {
            path: config.resource_root.clone(),
        })?;
    config.resource_root = resources.display().to_string();

    let templates = locator
        .resolve(&config.template_root)
        .ok_or_else(|| InitError::InvalidResourcePath {
            path: config.template_root.clone(),
        })?;
    config.template_root = templates.display().to_string();

    if let Some(tool_config) = config.tool_config.take() {
        if !tool_config.is_empty() {
            match locator.resolve(&tool_config) {
                Some(resolved) => config.tool_config = Some(resolved.display().to_string()),
                None => {
                    tracing::warn!(path = %tool_config, "Invalid tool config path, ignoring");
                }
            }
        }
    }

    Ok(())
}
