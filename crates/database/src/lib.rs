//! SQLite persistence layer for the plumbus factory.
//!
//! This crate provides async database operations for users and their
//! plumbus generation records using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::NewPlumbus, plumbus, user};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:factory.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Resolve the user behind an identity-provider subject
//!     let owner = user::find_or_create_user(db.pool(), "kc-subject", "rick", "rick@citadel.io").await?;
//!
//!     // Record a generation request
//!     let new = NewPlumbus {
//!         user_id: owner.id,
//!         name: "Gift".to_string(),
//!         size: "medium".to_string(),
//!         color: "blue".to_string(),
//!         shape: "round".to_string(),
//!         weight: "light".to_string(),
//!         wrapping: "gift".to_string(),
//!         is_rare: false,
//!     };
//!     plumbus::create_plumbus(db.pool(), &new).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod plumbus;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{NewPlumbus, Plumbus, PlumbusStatus, PlumbusUpdate, User};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Every in-flight generation job holds a connection only for the duration
    /// of a single status update, so this comfortably covers bursts.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/factory.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "Connected to database");

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_user_and_plumbus_lifecycle() {
        let db = test_db().await;

        let owner = user::find_or_create_user(db.pool(), "kc-1", "morty", "morty@smith.com")
            .await
            .unwrap();

        let created = plumbus::create_plumbus(
            db.pool(),
            &NewPlumbus {
                user_id: owner.id,
                name: "Gift".to_string(),
                size: "medium".to_string(),
                color: "blue".to_string(),
                shape: "round".to_string(),
                weight: "light".to_string(),
                wrapping: "gift".to_string(),
                is_rare: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.status, PlumbusStatus::Pending);

        plumbus::update_plumbus(db.pool(), created.id, &PlumbusUpdate::status(PlumbusStatus::Generating))
            .await
            .unwrap();
        plumbus::update_plumbus(
            db.pool(),
            created.id,
            &PlumbusUpdate::completed("storage/images/a.png".to_string()),
        )
        .await
        .unwrap();

        let fetched = plumbus::get_plumbus(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.status, PlumbusStatus::Completed);
        assert_eq!(fetched.image_path.as_deref(), Some("storage/images/a.png"));
        assert!(fetched.signature.is_none());

        let listed = plumbus::list_plumbuses_for_user(db.pool(), owner.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_migrate_is_repeatable() {
        let db = test_db().await;
        db.migrate().await.unwrap();
    }
}
