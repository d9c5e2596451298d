//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigSource (explicit value | explicit path | init parameter | default)
//!     → loader.rs (precedence chain, TOML parse through the container)
//!     → validation.rs (resolve roots, rewrite paths in place)
//!     → WebConfig (validated, frozen)
//!     → shared by reference with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated; the validation pass is the only
//!   mutation point in its lifecycle
//! - All fields have defaults to allow minimal configs
//! - Parsing is syntactic (serde); validation is semantic and runs
//!   regardless of how the config was obtained

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigSource, CONFIG_FILE_PARAM, DEFAULT_CONFIG_PATH};
pub use schema::WebConfig;
pub use validation::validate_config;
