//! Capabilities supplied by the surrounding runtime.
//!
//! # Data Flow
//! ```text
//! Container (embedding server, demo binary, test harness)
//!     → InitContext (init parameters + resource lookup)
//!     → filter::WebFilter::init
//!
//! Logical path ("conf/web-filter.toml")
//!     → ResourceLocator::resolve
//!     → concrete filesystem location | absent
//! ```
//!
//! # Design Decisions
//! - Lookup is a trait so embedders can resolve from overlays or test
//!   fixtures instead of a plain directory
//! - `None` from resolve means "absent"; callers decide severity

use std::collections::HashMap;
use std::path::PathBuf;

/// Resolves logical paths to concrete filesystem locations.
pub trait ResourceLocator: Send + Sync {
    /// Resolve a logical path. `None` means the resource does not exist.
    fn resolve(&self, logical: &str) -> Option<PathBuf>;
}

/// Initialization context handed to the filter by the container.
pub trait InitContext: Send + Sync {
    /// Look up a named init parameter.
    fn init_parameter(&self, name: &str) -> Option<String>;

    /// The container's resource lookup.
    fn locator(&self) -> &dyn ResourceLocator;
}

/// Resource locator rooted at a web-root directory on disk.
pub struct FsResourceLocator {
    root: PathBuf,
}

impl FsResourceLocator {
    /// Create a locator resolving against the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLocator for FsResourceLocator {
    fn resolve(&self, logical: &str) -> Option<PathBuf> {
        let candidate = self.root.join(logical.trim_start_matches('/'));
        if candidate.exists() {
            Some(candidate)
        } else {
            None
        }
    }
}

/// Init context backed by a parameter map. Used by the binary and tests.
pub struct MapInitContext<L> {
    params: HashMap<String, String>,
    locator: L,
}

impl<L: ResourceLocator> MapInitContext<L> {
    /// Create a context with no parameters set.
    pub fn new(locator: L) -> Self {
        Self {
            params: HashMap::new(),
            locator,
        }
    }

    /// Set an init parameter.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }
}

impl<L: ResourceLocator> InitContext for MapInitContext<L> {
    fn init_parameter(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }

    fn locator(&self) -> &dyn ResourceLocator {
        &self.locator
    }
}
