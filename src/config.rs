//! Cache configuration.
//!
//! Settings are read from a JSON file (by default
//! `<config dir>/modelcache/config.json`) and can be overridden by
//! environment variables:
//!
//! - `MODELCACHE_ASSET_ROOT` - directory holding all asset directories
//! - `MODELCACHE_PARALLEL_EXPORT` - `0`/`false` to encode assets sequentially

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::util::{Error, Result};

/// Environment variable overriding [`CacheConfig::asset_root`].
pub const ENV_ASSET_ROOT: &str = "MODELCACHE_ASSET_ROOT";

/// Environment variable overriding [`CacheConfig::parallel_export`].
pub const ENV_PARALLEL_EXPORT: &str = "MODELCACHE_PARALLEL_EXPORT";

/// Settings for [`crate::cache::ModelCache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root for asset directories. `None` places each asset directory next
    /// to its source model.
    pub asset_root: Option<PathBuf>,
    /// Encode meshes and textures on the rayon pool.
    pub parallel_export: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            asset_root: None,
            parallel_export: true,
        }
    }
}

impl CacheConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("modelcache");
            p.push("config.json");
            p
        })
    }

    /// Read a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the default location, then apply environment overrides.
    ///
    /// A missing or unreadable file gives the defaults.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                if !matches!(e, Error::NotFound(_)) {
                    tracing::warn!("ignoring config: {}", e);
                }
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Apply `MODELCACHE_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var_os(ENV_ASSET_ROOT).map(PathBuf::from),
            std::env::var(ENV_PARALLEL_EXPORT).ok().as_deref(),
        );
    }

    fn apply_overrides(&mut self, asset_root: Option<PathBuf>, parallel: Option<&str>) {
        if let Some(root) = asset_root.filter(|p| !p.as_os_str().is_empty()) {
            self.asset_root = Some(root);
        }
        match parallel.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("0" | "false" | "no" | "off") => self.parallel_export = false,
            Some("1" | "true" | "yes" | "on") => self.parallel_export = true,
            Some(other) => tracing::warn!("ignoring {}={}", ENV_PARALLEL_EXPORT, other),
            None => {}
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
        assert!(config.parallel_export);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CacheConfig {
            asset_root: Some(PathBuf::from("/tmp/assets")),
            parallel_export: false,
        };
        config.save(&path).unwrap();
        assert_eq!(CacheConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"parallel_export\": \"sometimes\"}").unwrap();
        assert!(matches!(CacheConfig::from_file(&path), Err(Error::Config(_))));
        assert!(matches!(
            CacheConfig::from_file(dir.path().join("none.json")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = CacheConfig::default();
        config.apply_overrides(Some(PathBuf::from("cache")), Some("off"));
        assert_eq!(config.asset_root, Some(PathBuf::from("cache")));
        assert!(!config.parallel_export);

        config.apply_overrides(Some(PathBuf::new()), Some("maybe"));
        assert_eq!(config.asset_root, Some(PathBuf::from("cache")));
        assert!(!config.parallel_export);

        config.apply_overrides(None, Some("TRUE"));
        assert!(config.parallel_export);
    }
}
