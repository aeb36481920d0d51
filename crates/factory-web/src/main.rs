//! Web front-end for the plumbus factory.
//!
//! Server-rendered landing and dashboard pages, Keycloak login, and a JSON API
//! to request plumbuses and poll their generation.

mod config;
mod error;
mod routes;
mod session;
mod state;

use std::sync::Arc;

use database::Database;
use events::NatsPublisher;
use identity::KeycloakClient;
use orchestrator::{Factory, RarityRoller};
use plumbus_generator::GeneratorClient;
use sig_store::SigStoreClient;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = Config::from_env()?;
    init_logging(&config);
    info!(addr = %config.addr, "Starting plumbus factory");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Outbound service clients
    let generator = GeneratorClient::new(config.generator.clone())?;
    let sig_store = SigStoreClient::new(config.sig_store.clone())?;
    let keycloak = KeycloakClient::new(config.keycloak.clone())?;

    let mut factory = Factory::new(db.clone(), Arc::new(generator), Arc::new(sig_store))
        .with_rarity(RarityRoller::new(config.rare_chance))
        .with_event_source(config.events.source.clone());

    // The factory runs without events when NATS is down
    let publisher = match NatsPublisher::connect(&config.events).await {
        Ok(publisher) => Some(publisher),
        Err(e) => {
            warn!(nats_url = %config.events.url, error = %e, "Running without event publishing");
            None
        }
    };
    if let Some(publisher) = &publisher {
        factory = factory.with_publisher(Arc::new(publisher.clone()));
    }

    if config.uses_dev_session_secret() {
        warn!("SESSION_SECRET is not set, using the development default");
    }

    // Build application state
    let state = AppState::new(factory, Arc::new(keycloak), &config.session_secret);

    // Build router
    let app = routes::router(state)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Plumbus factory listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    if let Some(publisher) = publisher {
        if let Err(e) = publisher.close().await {
            warn!(error = %e, "Failed to flush NATS connection");
        }
    }
    db.close().await;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
