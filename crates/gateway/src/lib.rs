//! API Gateway Library
//!
//! This crate provides the HTTP REST API over the user service, which it
//! embeds in-process.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use user_service_lib::infra::Database;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Wire the application state over an open database.
pub fn build_state(db: Database, config: GatewayConfig) -> AppState {
    let endpoints = user_service_lib::build_endpoints(&db, config.pagination.clone());
    AppState::new(endpoints, db, config)
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Connect and apply pending migrations
    let db = Database::connect(&config.database).await?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_router(build_state(db, config));

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
