use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://wayv.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first if a `.env` file should count.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_url),
            host: lookup("HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(lookup("PORT"), defaults.port),
            max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), defaults.max_connections)
                .max(1),
            max_upload_bytes: parse_or(lookup("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, fallback: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.database_url, "sqlite://wayv.db");
        assert_eq!(cfg.port, 8000);
    }

    #[test]
    fn test_values_are_read_from_env() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://data/test.db"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9100"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]));
        assert_eq!(cfg.database_url, "sqlite://data/test.db");
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.max_connections, 2);
        assert_eq!(cfg.max_upload_bytes, 1024);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("DB_MAX_CONNECTIONS", "0"),
            ("MAX_UPLOAD_BYTES", "-5"),
        ]));
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.max_connections, 1);
        assert_eq!(cfg.max_upload_bytes, 10 * 1024 * 1024);
    }
}
