//! Configuration loading.
//!
//! The config is named by a precedence chain rather than nested
//! conditionals: an explicit value, an explicit path, the container's
//! `config-file` init parameter, then the fixed default path. The first
//! provider that yields a value wins.

use std::fs;

use crate::config::schema::WebConfig;
use crate::container::{InitContext, ResourceLocator};
use crate::error::InitError;

/// Init parameter naming the config file.
pub const CONFIG_FILE_PARAM: &str = "config-file";

/// Fallback logical path when nothing else names a config file.
pub const DEFAULT_CONFIG_PATH: &str = "conf/web-filter.toml";

/// Where the filter's configuration comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    explicit: Option<WebConfig>,
    path: Option<String>,
}

impl ConfigSource {
    /// Use an already constructed configuration; no file is parsed. The
    /// value is still subject to the validation pass.
    pub fn from_config(config: WebConfig) -> Self {
        Self {
            explicit: Some(config),
            path: None,
        }
    }

    /// Parse the configuration from an explicit logical path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            explicit: None,
            path: Some(path.into()),
        }
    }

    /// Fall back to the container's `config-file` parameter, then the
    /// default path.
    pub fn from_container() -> Self {
        Self::default()
    }

    /// The standalone flag, known only when an explicit config was
    /// supplied. Logging bootstrap runs before any parsing, so a
    /// file-sourced config cannot contribute it.
    pub(crate) fn standalone(&self) -> Option<bool> {
        self.explicit.as_ref().map(|c| c.standalone)
    }

    /// Run the precedence chain and produce a configuration.
    pub fn resolve(self, ctx: &dyn InitContext) -> Result<WebConfig, InitError> {
        if let Some(config) = self.explicit {
            return Ok(config);
        }
        let path = self
            .path
            .into_iter()
            .chain(ctx.init_parameter(CONFIG_FILE_PARAM))
            .find(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        load_config(&path, ctx.locator())
    }
}

/// Load and parse a configuration file resolved through the container.
pub fn load_config(path: &str, locator: &dyn ResourceLocator) -> Result<WebConfig, InitError> {
    let resolved = locator.resolve(path).ok_or_else(|| InitError::ConfigNotFound {
        path: path.to_string(),
    })?;
    let content = fs::read_to_string(&resolved).map_err(|source| InitError::Io {
        path: path.to_string(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| InitError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{FsResourceLocator, MapInitContext};

    fn webroot_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_explicit_config_skips_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));

        let mut config = WebConfig::default();
        config.request_types.insert("action".to_string());

        let resolved = ConfigSource::from_config(config).resolve(&ctx).unwrap();
        assert!(resolved.contains_type("action"));
    }

    #[test]
    fn test_explicit_path_beats_init_parameter() {
        let dir = webroot_with(&[
            ("conf/a.toml", r#"resource_root = "from-a""#),
            ("conf/b.toml", r#"resource_root = "from-b""#),
        ]);
        let mut ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));
        ctx.set_parameter(CONFIG_FILE_PARAM, "conf/b.toml");

        let config = ConfigSource::from_path("conf/a.toml").resolve(&ctx).unwrap();
        assert_eq!(config.resource_root, "from-a");
    }

    #[test]
    fn test_init_parameter_beats_default() {
        let dir = webroot_with(&[
            ("conf/b.toml", r#"resource_root = "from-b""#),
            (DEFAULT_CONFIG_PATH, r#"resource_root = "from-default""#),
        ]);
        let mut ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));
        ctx.set_parameter(CONFIG_FILE_PARAM, "conf/b.toml");

        let config = ConfigSource::from_container().resolve(&ctx).unwrap();
        assert_eq!(config.resource_root, "from-b");
    }

    #[test]
    fn test_empty_init_parameter_falls_back_to_default() {
        let dir = webroot_with(&[(DEFAULT_CONFIG_PATH, r#"resource_root = "from-default""#)]);
        let mut ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));
        ctx.set_parameter(CONFIG_FILE_PARAM, "");

        let config = ConfigSource::from_container().resolve(&ctx).unwrap();
        assert_eq!(config.resource_root, "from-default");
    }

    #[test]
    fn test_unresolvable_path_reports_attempted_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));

        let err = ConfigSource::from_path("conf/missing.toml")
            .resolve(&ctx)
            .unwrap_err();
        match err {
            InitError::ConfigNotFound { path } => assert_eq!(path, "conf/missing.toml"),
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_failure_propagates() {
        let dir = webroot_with(&[("conf/bad.toml", "not valid toml =")]);
        let ctx = MapInitContext::new(FsResourceLocator::new(dir.path()));

        let err = ConfigSource::from_path("conf/bad.toml").resolve(&ctx).unwrap_err();
        assert!(matches!(err, InitError::Parse { .. }));
    }
}
