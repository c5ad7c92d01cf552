//! Application configuration.

use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "EthosJus";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const HISTORY_FILE: &str = "ethosjus-history.jsonl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub data_dir: PathBuf,
    /// Entries shown by `history` when no limit is given.
    pub history_limit: usize,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app_name, "EthosJus");
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.history_path(), PathBuf::from("data/ethosjus-history.jsonl"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::new("/tmp/ethos").with_history_limit(5);
        assert_eq!(config.history_path(), PathBuf::from("/tmp/ethos/ethosjus-history.jsonl"));
        assert_eq!(config.history_limit, 5);
    }
}
