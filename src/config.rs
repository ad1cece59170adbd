use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        Ok(Self {
            database_url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            acquire_timeout_secs: lookup("DB_ACQUIRE_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config = AppConfig::from_lookup(lookup_in(&[("DATABASE_URL", "sqlite::memory:")]))
            .expect("config");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite://users.db"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        ]))
        .expect("config");
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.acquire_timeout_secs, 5);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .expect("config");
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_in(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
