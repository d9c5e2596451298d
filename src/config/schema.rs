//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Root configuration for the MVC filter.
///
/// The two root paths are logical until [`validate_config`] rewrites them
/// to their resolved locations; after that the value is frozen for the
/// life of the filter.
///
/// [`validate_config`]: crate::config::validate_config
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Logical path to static resources.
    pub resource_root: String,

    /// Logical path to templates.
    pub template_root: String,

    /// Optional secondary tool configuration. Cleared during validation
    /// when it does not resolve.
    pub tool_config: Option<String>,

    /// Standalone deployments skip the default log-config lookup.
    pub standalone: bool,

    /// Request-type tokens this filter owns. Anything else is passed
    /// through to the next stage of the chain.
    pub request_types: HashSet<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            resource_root: "resources".to_string(),
            template_root: "templates".to_string(),
            tool_config: None,
            standalone: false,
            request_types: HashSet::new(),
        }
    }
}

impl WebConfig {
    /// Whether the filter owns the given request-type token.
    pub fn contains_type(&self, token: &str) -> bool {
        self.request_types.contains(token)
    }
}
