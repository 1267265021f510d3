//! Runtime configuration, read from the environment (and `.env` if present).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the marketplace API
    pub api_url: String,
    pub request_timeout: Duration,
    /// Where to keep the signed-in session between runs; in-memory when unset
    pub session_path: Option<PathBuf>,
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
    /// Problems found while loading, logged once tracing is up
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut warnings = Vec::new();

        let api_url = env::var("KWATHU_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("KWATHU_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Invalid KWATHU_TIMEOUT_SECS '{}', using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                ));
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_path = env::var("KWATHU_SESSION_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("KWATHU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            session_path,
            log_level,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share process-wide env vars, so they run in one test.
    #[test]
    fn test_from_env() {
        for key in [
            "KWATHU_API_URL",
            "KWATHU_TIMEOUT_SECS",
            "KWATHU_SESSION_PATH",
            "KWATHU_LOG_LEVEL",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.session_path.is_none());
        assert_eq!(config.log_level, "info");
        assert!(config.warnings.is_empty());

        env::set_var("KWATHU_API_URL", "https://api.kwathu.test");
        env::set_var("KWATHU_TIMEOUT_SECS", "soon");
        env::set_var("KWATHU_SESSION_PATH", "/tmp/kwathu/session.json");

        let config = Config::from_env();
        assert_eq!(config.api_url, "https://api.kwathu.test");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(
            config.warnings,
            vec!["Invalid KWATHU_TIMEOUT_SECS 'soon', using 30s".to_string()]
        );
        assert_eq!(
            config.session_path,
            Some(PathBuf::from("/tmp/kwathu/session.json"))
        );

        for key in ["KWATHU_API_URL", "KWATHU_TIMEOUT_SECS", "KWATHU_SESSION_PATH"] {
            env::remove_var(key);
        }
    }
}
