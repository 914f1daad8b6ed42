use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("STORAGE must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = match lookup("STORAGE") {
            Some(value) => StorageBackend::parse(&value)?,
            None => StorageBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            bail!("Cannot load DATABASE_URL env variable");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match lookup("PORT") {
                Some(port) => port.parse().context("PORT must be a number")?,
                None => 8000,
            },
            storage,
            database_url,
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(max) => max
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                None => 5,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/workout")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(config(&[]).is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = config(&[("STORAGE", "memory"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(config(&[("STORAGE", "redis")]).is_err());
        assert!(config(&[("STORAGE", "memory"), ("PORT", "http")]).is_err());
    }
}
