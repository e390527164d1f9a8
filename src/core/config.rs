//! Configuration loading
//!
//! Values are layered, lowest priority first:
//! built-in defaults, the user config file, the file named by `CRM_CONFIG`,
//! then `CRM_DATABASE` / `CRM_PAGE_SIZE`. CLI flags are applied by the caller.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ConfigError, Result};

/// Name of the database file when no path is configured
pub const DEFAULT_DATABASE_FILE: &str = "crm.sqlite3";

/// Default number of rows per list page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Explicit database path, if configured
    pub database: Option<PathBuf>,

    /// Rows per list page
    pub page_size: u32,
}

/// One configuration layer as written on disk; absent keys leave lower layers alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    database: Option<PathBuf>,
    page_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from all layers
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                config.merge_file(&path)?;
            }
        }

        if let Ok(path) = std::env::var("CRM_CONFIG") {
            config.merge_file(Path::new(&path))?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Location of the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "crm").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge a YAML config file over the current values
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let layer: ConfigFile =
            serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "loaded config layer");

        if let Some(database) = layer.database {
            self.database = Some(database);
        }
        if let Some(page_size) = layer.page_size {
            self.page_size = page_size;
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(database) = lookup("CRM_DATABASE").filter(|v| !v.is_empty()) {
            self.database = Some(PathBuf::from(database));
        }
        if let Some(raw) = lookup("CRM_PAGE_SIZE") {
            self.page_size = raw
                .trim()
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: "CRM_PAGE_SIZE",
                    value: raw,
                })?;
        }
        Ok(())
    }

    /// Database path to open: configured path, else the platform data dir
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database {
            return path.clone();
        }
        ProjectDirs::from("", "", "crm")
            .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CrmError;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 100);
        assert!(config.database.is_none());
        assert!(config.database_path().ends_with(DEFAULT_DATABASE_FILE));
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "database: /var/lib/crm/data.sqlite3\npage_size: 25\n").unwrap();

        let mut config = Config::default();
        config.merge_file(&path).unwrap();

        assert_eq!(
            config.database,
            Some(PathBuf::from("/var/lib/crm/data.sqlite3"))
        );
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_partial_file_keeps_lower_layers() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "page_size: 10\n").unwrap();

        let mut config = Config {
            database: Some(PathBuf::from("keep.sqlite3")),
            page_size: 50,
        };
        config.merge_file(&path).unwrap();

        assert_eq!(config.database, Some(PathBuf::from("keep.sqlite3")));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "databse: typo.sqlite3\n").unwrap();

        let err = Config::default().merge_file(&path).unwrap_err();
        assert!(matches!(err, CrmError::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::default()
            .merge_file(Path::new("/nonexistent/crm/config.yaml"))
            .unwrap_err();
        assert!(matches!(err, CrmError::Config(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("CRM_DATABASE", "/tmp/x.sqlite3"), ("CRM_PAGE_SIZE", "20")]))
            .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/tmp/x.sqlite3"));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_env_rejects_bad_page_size() {
        for bad in ["zero", "0", "-5"] {
            let mut config = Config::default();
            let err = config.apply_env(env(&[("CRM_PAGE_SIZE", bad)])).unwrap_err();
            assert!(err.to_string().contains(bad));
        }
    }
}
