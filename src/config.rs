use serde::Deserialize;

use crate::api::state::DEFAULT_SESSION_IDLE_MINUTES;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// AniList GraphQL endpoint
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Poster shown for a slot with nothing committed
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Minutes of inactivity before a session is dropped
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_api_url() -> String {
    "https://graphql.anilist.co".to_string()
}

fn default_placeholder_image_url() -> String {
    "https://via.placeholder.com/150".to_string()
}

fn default_session_idle_minutes() -> u32 {
    DEFAULT_SESSION_IDLE_MINUTES
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn session_idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.catalog_api_url, "https://graphql.anilist.co");
        assert_eq!(config.placeholder_image_url, "https://via.placeholder.com/150");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.session_idle_timeout(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("CATALOG_API_URL".to_string(), "http://localhost:4000".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("SESSION_IDLE_MINUTES".to_string(), "5".to_string()),
        ];
        let config = Config::from_vars(vars).unwrap();
        assert_eq!(config.catalog_api_url, "http://localhost:4000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_idle_timeout(), chrono::Duration::minutes(5));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(Config::from_vars(vars).is_err());
    }
}
