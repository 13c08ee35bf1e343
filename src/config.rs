use std::net::SocketAddr;
use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:1313",
    "http://localhost:5173"
];

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Postgres { database_url: String },
    /// `requested` is false when no `DATABASE_URL` was given and memory is the fallback.
    InMemory { requested: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `STORAGE=memory` or a missing `DATABASE_URL` selects the in-memory store.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let in_memory = lookup("STORAGE")
            .is_some_and(|storage| storage.eq_ignore_ascii_case("memory"));

        let storage = match lookup("DATABASE_URL") {
            Some(database_url) if !in_memory && !database_url.trim().is_empty() => {
                StorageConfig::Postgres { database_url }
            }
            _ => StorageConfig::InMemory { requested: in_memory },
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR '{bind_addr}' is not a socket address"))?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.map(str::to_owned).to_vec(),
        };

        Ok(Config {
            storage,
            bind_addr,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_storage() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.storage, StorageConfig::InMemory { requested: false });
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.cors_origins.len(), 3);
    }

    #[test]
    fn database_url_selects_postgres_unless_memory_forced() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/homies")]).unwrap();
        assert_eq!(config.storage, StorageConfig::Postgres {
            database_url: "postgres://localhost/homies".to_owned()
        });

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/homies"),
            ("STORAGE", "Memory"),
        ]).unwrap();
        assert_eq!(config.storage, StorageConfig::InMemory { requested: true });
    }

    #[test]
    fn blank_database_url_is_an_implicit_fallback() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.storage, StorageConfig::InMemory { requested: false });

        let config = config_from(&[("DATABASE_URL", "  "), ("STORAGE", "memory")]).unwrap();
        assert_eq!(config.storage, StorageConfig::InMemory { requested: true });
    }

    #[test]
    fn parses_cors_origins_and_rejects_bad_bind_addr() {
        let config = config_from(&[("CORS_ORIGINS", "https://homies.example, ,http://localhost:8080")]).unwrap();
        assert_eq!(config.cors_origins, vec!["https://homies.example", "http://localhost:8080"]);

        assert!(config_from(&[("BIND_ADDR", "not an address")]).is_err());
    }
}
