use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where board state is persisted. Defaults to
    /// `kanban-board-storage.json` in the current directory when unset.
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    /// Artificial latency applied by the sample ticket API, in milliseconds.
    #[serde(default)]
    pub fetch_latency_ms: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config| config.join("ticketboard/config.toml"))
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or unreadable. Config problems are never fatal.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_fetch_latency_ms(&self) -> u64 {
        self.fetch_latency_ms.unwrap_or(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latency() {
        let config = AppConfig::default();
        assert_eq!(config.effective_fetch_latency_ms(), 300);
    }

    #[test]
    fn test_latency_override() {
        let config: AppConfig = toml::from_str("fetch_latency_ms = 5").unwrap();
        assert_eq!(config.effective_fetch_latency_ms(), 5);
    }

    #[test]
    fn test_empty_config_parses() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.state_path.is_none());
        assert!(config.fetch_latency_ms.is_none());
    }
}
