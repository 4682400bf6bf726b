//! Runtime configuration read from the environment.

use anyhow::{anyhow, Context};
use studydeck_core::QualityScale;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub quality_scale: QualityScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 10,
            host: "0.0.0.0".to_string(),
            port: 3000,
            quality_scale: QualityScale::default(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS: {}", v))?,
            None => defaults.max_connections,
        };

        let port = match lookup("PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid PORT: {}", v))?,
            None => defaults.port,
        };

        let quality_scale = match lookup("QUALITY_SCALE") {
            Some(v) => QualityScale::from_str(&v.to_lowercase())
                .ok_or_else(|| anyhow!("invalid QUALITY_SCALE: {} (expected practice or revision)", v))?,
            None => defaults.quality_scale,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            max_connections,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            quality_scale,
        })
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

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
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.quality_scale, QualityScale::Practice);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/studydeck"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("QUALITY_SCALE", "Revision"),
        ]))
        .unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/studydeck")
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.quality_scale, QualityScale::Revision);
    }

    #[test]
    fn empty_database_url_means_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("QUALITY_SCALE", "0-5")])).is_err());
    }
}
