//! User Service Library
//!
//! This crate provides user management: persistence, business rules and a
//! transport-agnostic endpoint layer. The gateway embeds it behind HTTP.

pub mod endpoint;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{DatabaseConfig, PaginationConfig};

use crate::endpoint::Endpoints;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Wire repository, service and endpoints over an open database.
pub fn build_endpoints(db: &Database, pagination: PaginationConfig) -> Endpoints {
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let user_service = Arc::new(UserManager::new(user_repo));

    Endpoints::new(user_service, pagination)
}

/// Apply a migrate subcommand against the configured database.
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Pending migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Last migration reverted");
        }
        MigrateAction::Status => {
            for state in db.migration_status().await? {
                println!("[{}] {}", if state.applied { "x" } else { " " }, state.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Schema dropped and rebuilt");
        }
    }

    Ok(())
}

/// `migrate` subcommand.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
