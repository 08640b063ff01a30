//! Page-object timing configuration.
//!
//! Stores wait and settle timings in `~/.axpage/config.json`, so a slow
//! simulator host can stretch every page's timings without touching test
//! code. All fields have defaults matching the original suite's budgets.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";

/// Returns the axpage home directory (`~/.axpage`), creating it if needed.
pub fn axpage_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".axpage");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_wait_timeout_ms() -> u64 {
    10_000
}

/// Timing configuration applied to every page built with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Delay after binding a page before its elements are used, giving the
    /// screen time to settle after a transition.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Interval between accessibility-tree polls during waits.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Wait budget for locators that don't carry their own timeout.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl PageConfig {
    /// Load config from `~/.axpage/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        let path = axpage_dir().join(CONFIG_FILENAME);
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.axpage/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let path = axpage_dir().join(CONFIG_FILENAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// The settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The default wait timeout as a [`Duration`].
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_suite_budgets() {
        let config = PageConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_secs(1));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.wait_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn roundtrip_serialization() {
        let config = PageConfig {
            settle_delay_ms: 0,
            poll_interval_ms: 50,
            wait_timeout_ms: 5000,
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: PageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.settle_delay_ms, 0);
        assert_eq!(loaded.poll_interval_ms, 50);
        assert_eq!(loaded.wait_timeout_ms, 5000);
    }

    #[test]
    fn deserialize_empty_json_uses_defaults() {
        let loaded: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.settle_delay_ms, 1000);
        assert_eq!(loaded.wait_timeout_ms, 10_000);
    }
}
