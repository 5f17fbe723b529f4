//! Runtime settings, read from the environment (and `.env`, via dotenvy, in
//! `main`).

use anyhow::{Context, Result};
use std::{env, net::SocketAddr};

/// Postgres default max connections is 100, and we'll take most of 'em
/// https://www.postgresql.org/docs/current/runtime-config-connection.html
const DEFAULT_MAX_CONNECTIONS: u32 = 80;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub listen_addr: SocketAddr,
    pub wkhtmltopdf: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let pg_usr = get("POSTGRES_USER")
                    .context("DATABASE_URL or POSTGRES_USER must be set")?;
                let pg_pw = get("POSTGRES_PASSWORD")
                    .context("POSTGRES_PASSWORD must be set")?;
                let pg_db =
                    get("POSTGRES_DB").context("POSTGRES_DB must be set")?;
                let pg_host = get("POSTGRES_HOST")
                    .unwrap_or_else(|| "localhost:5432".to_string());
                format!("postgres://{pg_usr}:{pg_pw}@{pg_host}/{pg_db}")
            }
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS={n:?} is not a number"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let listen_addr = match get("LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("LISTEN_ADDR={addr:?} is not a socket address"))?,
            None => SocketAddr::from(([127, 0, 0, 1], 8000)),
        };
        let wkhtmltopdf =
            get("WKHTMLTOPDF_PATH").unwrap_or_else(|| "wkhtmltopdf".to_string());

        Ok(Self {
            database_url,
            max_connections,
            listen_addr,
            wkhtmltopdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]))
                .expect("config");

        assert_eq!(config.database_url, "postgres://db");
        assert_eq!(config.max_connections, 80);
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 8000)));
        assert_eq!(config.wkhtmltopdf, "wkhtmltopdf");
    }

    #[test]
    fn test_url_from_postgres_parts() {
        let config = Config::from_lookup(lookup(&[
            ("POSTGRES_USER", "jack"),
            ("POSTGRES_PASSWORD", "pw"),
            ("POSTGRES_DB", "props"),
        ]))
        .expect("config");

        assert_eq!(config.database_url, "postgres://jack:pw@localhost:5432/props");
    }

    #[test]
    fn test_missing_database() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_bad_listen_addr() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("LISTEN_ADDR", "nowhere"),
        ]));
        assert!(result.is_err());
    }
}
