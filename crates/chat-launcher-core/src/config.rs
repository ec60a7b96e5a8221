use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::icon::IconStyle;

pub const DEFAULT_STORAGE_KEY: &str = "isSidebarOpen";
pub const DEFAULT_ICON_ID: &str = "chat-icon";
pub const DEFAULT_ENTRANCE_DELAY_MS: u64 = 100;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Page global the host may set to override the defaults.
pub const CONFIG_GLOBAL: &str = "__CHAT_LAUNCHER_CONFIG__";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("launcher config is not valid JSON: {0}")]
    Parse(String),
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("icon id must not be empty")]
    EmptyIconId,
    #[error("icon size must be greater than zero")]
    ZeroIconSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Storage key carrying the sidebar open flag.
    pub storage_key: String,
    pub icon_id: String,
    /// Delay between attaching the icon and scaling it in.
    pub entrance_delay_ms: u64,
    /// `tracing_subscriber::EnvFilter` directive used by the browser host.
    pub log_filter: String,
    pub icon: IconStyle,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            icon_id: DEFAULT_ICON_ID.to_string(),
            entrance_delay_ms: DEFAULT_ENTRANCE_DELAY_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            icon: IconStyle::default(),
        }
    }
}

impl LauncherConfig {
    /// Parses a JSON override. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.storage_key = self.storage_key.trim().to_string();
        self.icon_id = self.icon_id.trim().to_string();
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.icon_id.is_empty() {
            return Err(ConfigError::EmptyIconId);
        }
        if self.icon.size_px == 0 {
            return Err(ConfigError::ZeroIconSize);
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        Ok(self)
    }

    #[must_use]
    pub fn entrance_delay(&self) -> Duration {
        Duration::from_millis(self.entrance_delay_ms)
    }
}
