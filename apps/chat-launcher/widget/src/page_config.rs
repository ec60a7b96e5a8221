use chat_launcher_core::{ConfigError, LauncherConfig};

/// Resolves the launcher config from the raw page global, if any. A bad
/// override falls back to the defaults and hands the error back for logging,
/// since tracing is not installed until the config is known.
pub(crate) fn resolve_page_config(raw: Option<String>) -> (LauncherConfig, Option<ConfigError>) {
    let Some(raw) = raw else {
        return (LauncherConfig::default(), None);
    };
    match LauncherConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(error) => (LauncherConfig::default(), Some(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_global_uses_defaults() {
        let (config, error) = resolve_page_config(None);
        assert_eq!(config, LauncherConfig::default());
        assert!(error.is_none());
    }

    #[test]
    fn valid_global_overrides_defaults() {
        let raw = r#"{"storage_key":"sidebar.open","log_filter":"debug"}"#;
        let (config, error) = resolve_page_config(Some(raw.to_string()));
        assert!(error.is_none());
        assert_eq!(config.storage_key, "sidebar.open");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.icon_id, "chat-icon");
    }

    #[test]
    fn invalid_global_falls_back_and_reports() {
        let (config, error) = resolve_page_config(Some("not json".to_string()));
        assert_eq!(config, LauncherConfig::default());
        assert!(matches!(error, Some(ConfigError::Parse(_))));
    }

    #[test]
    fn rejected_global_falls_back_and_reports() {
        let (config, error) = resolve_page_config(Some(r#"{"icon_id":" "}"#.to_string()));
        assert_eq!(config, LauncherConfig::default());
        assert_eq!(error, Some(ConfigError::EmptyIconId));
    }
}
