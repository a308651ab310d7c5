//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_CONNECTIONS};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable or zero pool sizes fall back to the defaults, and the
    /// minimum pool size never exceeds the maximum.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let min_connections = lookup("DATABASE_MIN_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MIN_CONNECTIONS)
            .min(max_connections);

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections,
            min_connections,
        }
    }

    /// Build a configuration pointing at the given database URL.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Serializes tests that mutate the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = Config::with_database_url("postgres://admin:hunter2@db/students");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_with_database_url_keeps_pool_defaults() {
        let config = Config::with_database_url("sqlite::memory:");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
    }

    #[test]
    fn test_lookup_reads_all_keys() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_MIN_CONNECTIONS", "2"),
        ]));

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);
    }

    #[test]
    fn test_lookup_missing_keys_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
    }

    #[test]
    fn test_zero_max_connections_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")]));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_min_connections_clamped_to_max() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("DATABASE_MIN_CONNECTIONS", "8"),
        ]));

        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 3);
    }

    #[test]
    fn test_from_env_unparseable_numbers_use_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("DATABASE_MAX_CONNECTIONS", "abc");
        env::set_var("DATABASE_MIN_CONNECTIONS", "-1");

        let config = Config::from_env();

        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("DATABASE_MIN_CONNECTIONS");

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
    }
}
