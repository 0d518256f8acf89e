use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hubspot: HubSpotSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HubSpotSettings {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
    /// TTL for pending OAuth state entries, in seconds
    #[serde(default = "default_ttl")]
    pub state_ttl_secs: i64,
    /// TTL for parked credential blobs, in seconds
    #[serde(default = "default_ttl")]
    pub credentials_ttl_secs: i64,
}

fn default_ttl() -> i64 {
    600
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Credentials normally arrive through the environment, not config files
        if let Ok(client_id) = std::env::var("HUBSPOT_CLIENT_ID") {
            builder = builder.set_override("hubspot.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("HUBSPOT_CLIENT_SECRET") {
            builder = builder.set_override("hubspot.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("HUBSPOT_REDIRECT_URI") {
            builder = builder.set_override("hubspot.redirect_uri", redirect_uri)?;
        }

        builder = builder.add_source(Environment::with_prefix("HUBSPOT_CONNECTOR"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
