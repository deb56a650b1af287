//! Application configuration management.
//!
//! Configuration comes from environment variables (optionally seeded from a
//! `.env` file) and is deserialized with `envy` into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `MOVEMENT_LIST_LIMIT` (optional): default page size of the movement listing, defaults to 50
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_movement_list_limit")]
    pub movement_list_limit: i64,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_movement_list_limit() -> i64 {
    50
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Build configuration from explicit key/value pairs.
    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        // Field names map to upper case: database_url -> DATABASE_URL
        envy::from_iter::<_, Config>(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_iter(vars(&[("DATABASE_URL", "postgres://localhost/cuentas")]))
            .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.movement_list_limit, 50);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_iter(vars(&[
            ("DATABASE_URL", "postgres://db/cuentas"),
            ("SERVER_PORT", "8080"),
            ("MOVEMENT_LIST_LIMIT", "20"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.movement_list_limit, 20);
    }

    #[test]
    fn database_url_is_required() {
        assert!(Config::from_iter(vars(&[("SERVER_PORT", "8080")])).is_err());
    }
}
