//! Application configuration management

use std::env;

use anyhow::{Context, Result};

use crate::db::MEMORY_URL;
use crate::profile::Profile;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite URL, e.g. `sqlite:roster.db` or `sqlite::memory:`
    pub database_url: String,

    /// Pool size for file databases (in-memory always uses one connection)
    pub database_max_connections: u32,

    /// Active profile; `local` seeds sample data
    pub profile: Profile,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: MEMORY_URL.to_string(),
            database_max_connections: 5,
            profile: Profile::Default,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value.parse().context("Invalid PORT")?,
            None => defaults.port,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.parse().context("Invalid DATABASE_MAX_CONNECTIONS")?,
            None => defaults.database_max_connections,
        };

        let profile = match lookup("APP_PROFILE") {
            Some(value) => Profile::from_arg(&value)
                .with_context(|| format!("Unknown APP_PROFILE '{value}'"))?,
            None => defaults.profile,
        };

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections,
            profile,
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, MEMORY_URL);
        assert_eq!(config.profile, Profile::Default);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("DATABASE_URL", "sqlite:roster.db"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("APP_PROFILE", "local"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite:roster.db");
        assert_eq!(config.database_max_connections, 2);
        assert_eq!(config.profile, Profile::Local);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("Invalid PORT"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("APP_PROFILE", "staging")])).is_err());
    }
}
