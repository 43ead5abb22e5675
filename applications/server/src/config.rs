/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
}

/// Settings for the external video catalog the resolver queries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default)]
    pub key: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = std::path::PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with WATCHBOX_)
        settings = settings.add_source(
            config::Environment::with_prefix("WATCHBOX")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.key.is_empty() {
            return Err(ServerError::Config(
                "Catalog API key is required (set WATCHBOX_CATALOG_KEY)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/watchbox.db".to_string()
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        url: default_api_url(),
        key: String::new(),
    }
}

fn default_api_url() -> String {
    "https://www.googleapis.com/youtube/v3/videos".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            catalog: default_catalog(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete_except_the_catalog_key() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.storage.url.starts_with("sqlite://"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn a_catalog_key_makes_the_defaults_valid() {
        let mut config = ServerConfig::default();
        config.catalog.key = "k".to_string();
        assert!(config.validate().is_ok());
    }
}
