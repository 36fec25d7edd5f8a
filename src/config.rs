use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/v1/odds/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Multipart field the service reads the intercept from.
pub const UPLOAD_FIELD: &str = "empire_file";
/// Literal suffix a selected file name must end with.
pub const REQUIRED_EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ODDS_ENDPOINT is not a valid URL ({value}): {source}")]
    Endpoint {
        value: String,
        source: url::ParseError,
    },
    #[error("{name} must be a positive integer, got {value:?}")]
    NotPositive { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub request_timeout: Duration,
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl Config {
    /// Build the config from `ODDS_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(value) = lookup("ODDS_ENDPOINT") {
            cfg.endpoint = Url::parse(value.trim())
                .map_err(|source| ConfigError::Endpoint { value, source })?;
        }
        if let Some(value) = lookup("ODDS_TIMEOUT_SECS") {
            cfg.request_timeout = Duration::from_secs(parse_positive("ODDS_TIMEOUT_SECS", value)?);
        }
        if let Some(value) = lookup("ODDS_MAX_FILE_BYTES") {
            cfg.max_file_bytes = parse_positive("ODDS_MAX_FILE_BYTES", value)?;
        }

        Ok(cfg)
    }

    /// Root of the odds service, used for the startup reachability check.
    pub fn service_root(&self) -> Url {
        let mut root = self.endpoint.clone();
        root.set_path("/");
        root.set_query(None);
        root
    }
}

fn parse_positive(name: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::NotPositive { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup(&[
            ("ODDS_ENDPOINT", "https://odds.example.com/api/v2/odds/"),
            ("ODDS_TIMEOUT_SECS", "5"),
            ("ODDS_MAX_FILE_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint.host_str(), Some("odds.example.com"));
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_file_bytes, 1024);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("ODDS_ENDPOINT", "not a url")])),
            Err(ConfigError::Endpoint { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("ODDS_TIMEOUT_SECS", "0")])),
            Err(ConfigError::NotPositive { name: "ODDS_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("ODDS_MAX_FILE_BYTES", "lots")])),
            Err(ConfigError::NotPositive { .. })
        ));
    }

    #[test]
    fn service_root_strips_the_route() {
        let cfg = Config::default();
        assert_eq!(cfg.service_root().as_str(), "http://localhost:8000/");
    }
}
