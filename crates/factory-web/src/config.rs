//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use events::EventsConfig;
use identity::KeycloakConfig;
use orchestrator::DEFAULT_RARE_CHANCE;
use plumbus_generator::GeneratorConfig;
use sig_store::SigStoreConfig;

/// Session secret used when `SESSION_SECRET` is unset. Only fit for local runs.
pub const DEV_SESSION_SECRET: &str = "your-secret-key";

/// Factory web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Keycloak realm and client.
    pub keycloak: KeycloakConfig,
    /// Image-generation service.
    pub generator: GeneratorConfig,
    /// Signing service.
    pub sig_store: SigStoreConfig,
    /// NATS publishing.
    pub events: EventsConfig,
    /// Secret the session cookie key is derived from.
    pub session_secret: String,
    /// Chance that a new plumbus is rare.
    pub rare_chance: f64,
    /// Default tracing filter.
    pub log_level: String,
    /// Emit JSON log lines.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `FACTORY_ADDR` | Server bind address | `0.0.0.0:{PORT}` |
    /// | `PORT` | Port used when `FACTORY_ADDR` is unset | `8080` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:factory.db?mode=rwc` |
    /// | `KEYCLOAK_URL` | Browser-facing Keycloak URL | `http://localhost:8080` |
    /// | `KEYCLOAK_INTERNAL_URL` | Back-channel Keycloak URL | `http://localhost:8080` |
    /// | `KEYCLOAK_REALM` | Realm | `master` |
    /// | `KEYCLOAK_CLIENT_ID` | OIDC client id | `factory` |
    /// | `KEYCLOAK_CLIENT_SECRET` | OIDC client secret | (empty) |
    /// | `PLUMBUS_SERVICE_URL` | Image-generation service | `http://localhost:8081` |
    /// | `SIG_STORE_URL` | Signing service | `http://localhost:3000` |
    /// | `SESSION_SECRET` | Cookie signing secret | `your-secret-key` |
    /// | `NATS_URL` | NATS server | `nats://localhost:4222` |
    /// | `NATS_TOPIC` | Event topic | `accountats` |
    /// | `EVENT_SOURCE` | Event `source` field | `factory` |
    /// | `IMAGE_DIR` | Where generated images are stored | `storage/images` |
    /// | `RARE_CHANCE` | Rarity probability in `[0, 1]` | `0.05` |
    /// | `LOG_LEVEL` | Tracing filter | `info` |
    /// | `LOG_FORMAT` | `json` for JSON logs | (plain) |
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("PORT", "8080");
        let addr = var("FACTORY_ADDR", &format!("0.0.0.0:{port}"))
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let keycloak_defaults = KeycloakConfig::default();
        let keycloak = KeycloakConfig {
            public_url: var("KEYCLOAK_URL", &keycloak_defaults.public_url),
            internal_url: var("KEYCLOAK_INTERNAL_URL", &keycloak_defaults.internal_url),
            realm: var("KEYCLOAK_REALM", &keycloak_defaults.realm),
            client_id: var("KEYCLOAK_CLIENT_ID", &keycloak_defaults.client_id),
            client_secret: var("KEYCLOAK_CLIENT_SECRET", &keycloak_defaults.client_secret),
            ..keycloak_defaults
        };

        let generator = GeneratorConfig::new(
            var("PLUMBUS_SERVICE_URL", "http://localhost:8081"),
            PathBuf::from(var("IMAGE_DIR", "storage/images")),
        );

        let sig_store = SigStoreConfig::new(var("SIG_STORE_URL", "http://localhost:3000"));

        let event_defaults = EventsConfig::default();
        let events = EventsConfig {
            url: var("NATS_URL", &event_defaults.url),
            topic: var("NATS_TOPIC", &event_defaults.topic),
            source: var("EVENT_SOURCE", &event_defaults.source),
        };

        let raw_chance = var("RARE_CHANCE", &DEFAULT_RARE_CHANCE.to_string());
        let rare_chance = raw_chance
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| (0.0..=1.0).contains(p))
            .ok_or_else(|| ConfigError::InvalidRareChance(raw_chance.clone()))?;

        Ok(Self {
            addr,
            database_url: var("DATABASE_URL", "sqlite:factory.db?mode=rwc"),
            keycloak,
            generator,
            sig_store,
            events,
            session_secret: var("SESSION_SECRET", DEV_SESSION_SECRET),
            rare_chance,
            log_level: var("LOG_LEVEL", "info"),
            log_json: var("LOG_FORMAT", "plain").eq_ignore_ascii_case("json"),
        })
    }

    /// Whether the session secret is still the development default.
    pub fn uses_dev_session_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid FACTORY_ADDR/PORT format")]
    InvalidAddr,

    #[error("RARE_CHANCE must be a number between 0 and 1, got {0:?}")]
    InvalidRareChance(String),
}
