//! Build-time application configuration.
//!
//! Values are baked in when the WebAssembly bundle is compiled, so a deployment
//! picks its backend origin with `EDU2JOB_API_URL=... trunk build`.

/// Backend origin used when `EDU2JOB_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Log filter used when `EDU2JOB_LOG` is not set at build time.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin without a trailing slash.
    pub api_url: String,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
    /// How long success banners stay up before dismissing themselves.
    pub notify_success_ms: i32,
    /// How long error banners stay up before dismissing themselves.
    pub notify_error_ms: i32,
    /// Rows per page in history tables.
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            notify_success_ms: 1800,
            notify_error_ms: 1200,
            page_size: crate::insights::PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("EDU2JOB_API_URL"), option_env!("EDU2JOB_LOG"))
    }

    pub fn from_values(api_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_url = normalize_origin(url);
        }
        if let Some(filter) = log_filter.map(str::trim).filter(|f| !f.is_empty()) {
            config.log_filter = filter.to_string();
        }
        config
    }
}

fn normalize_origin(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = AppConfig::from_values(Some("https://api.example.org//"), None);
        assert_eq!(config.api_url, "https://api.example.org");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some(""));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_log_filter_override() {
        let config = AppConfig::from_values(None, Some("edu2job=debug,warn"));
        assert_eq!(config.log_filter, "edu2job=debug,warn");
    }
}
