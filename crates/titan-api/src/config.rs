//! Server Configuration

use serde::{Deserialize, Serialize};

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/form-titan/server.json";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// tracing-subscriber filter directive
    pub log_filter: String,
    /// Page size for submission listings, also the upper bound on `?limit=`
    pub submission_list_limit: usize,
    /// Preload the sample contact form
    pub seed_sample_form: bool,
    /// Allow any origin
    pub cors_allow_any: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8001".into(),
            log_filter: "info".into(),
            submission_list_limit: 100,
            seed_sample_form: true,
            cors_allow_any: true,
        }
    }
}

impl ServerConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Load from `FORM_TITAN_CONFIG` (or the default path) and apply
    /// environment overrides. A file that cannot be loaded yields defaults
    /// plus the load error, so the caller can report it once logging is up.
    pub fn from_env() -> (Self, Option<std::io::Error>) {
        let path = std::env::var("FORM_TITAN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let (config, error) = match Self::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        (config.with_overrides(|key| std::env::var(key).ok()), error)
    }

    /// Apply `FORM_TITAN_BIND` and `RUST_LOG` from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("FORM_TITAN_BIND") {
            self.bind_addr = bind;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.log_filter = filter;
        }
        self
    }

    /// Effective listing size for a requested limit
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.submission_list_limit)
            .min(self.submission_list_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"bind_addr": "127.0.0.1:9000"}"#).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.submission_list_limit, 100);
        assert!(config.seed_sample_form);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default().with_overrides(|key| match key {
            "FORM_TITAN_BIND" => Some("127.0.0.1:1234".into()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "127.0.0.1:1234");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_list_limit_is_clamped() {
        let config = ServerConfig { submission_list_limit: 50, ..Default::default() };
        assert_eq!(config.list_limit(None), 50);
        assert_eq!(config.list_limit(Some(10)), 10);
        assert_eq!(config.list_limit(Some(500)), 50);
    }

    #[test]
    fn test_missing_file() {
        assert!(ServerConfig::load("/nonexistent/form-titan.json").is_err());
    }
}
