//! Runtime configuration - where saved requests and logs live

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, HOME_ENV_VAR, LOG_FILE_NAME, STORE_FILE_NAME};

/// Resolved application paths
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory from `REQTERM_HOME`, falling back to `~/.reqterm`
    pub fn from_env() -> Self {
        let override_dir = env::var_os(HOME_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::resolve(override_dir)
    }

    fn resolve(override_dir: Option<PathBuf>) -> Self {
        let data_dir = override_dir.unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
        });
        AppConfig { data_dir }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        AppConfig {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_wins() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/reqterm-test")));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/reqterm-test/requests.json"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/reqterm-test/reqterm.log"));
    }

    #[test]
    fn test_default_dir_ends_with_app_dir() {
        let config = AppConfig::resolve(None);
        assert!(config.data_dir().ends_with(APP_DIR_NAME));
    }
}
