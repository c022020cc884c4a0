//! Build Configuration
//!
//! Settings baked in at compile time from the environment.

use log::LevelFilter;

const DEFAULT_API_URL: &str = "/api/v1";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Prefix on every console line
pub const APP_NAME: &str = "SIM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: &'static str,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("SIMULATOR_API_URL"), option_env!("SIMULATOR_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&'static str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/');
        Self {
            api_url,
            log_level: console_logger::parse_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_values(None, None);
        assert_eq!(config.api_url, "/api/v1");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::from_values(Some("https://api.example.com/v2/"), Some("debug"));
        assert_eq!(config.api_url, "https://api.example.com/v2");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
