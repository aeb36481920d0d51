//! User persistence.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Find the user for an identity-provider subject, creating it on first login.
///
/// Idempotent: once a row exists for `keycloak_id`, later calls return it
/// unchanged and ignore `username` and `email`.
pub async fn find_or_create_user(
    pool: &SqlitePool,
    keycloak_id: &str,
    username: &str,
    email: &str,
) -> Result<User> {
    let now = Utc::now();

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (id, keycloak_id, username, email, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(keycloak_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(keycloak_id)
    .bind(username)
    .bind(email)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?
    .rows_affected();

    if inserted > 0 {
        tracing::info!(keycloak_id, username, "Created user");
    }

    get_user_by_keycloak_id(pool, keycloak_id).await
}

/// Get a user by internal ID.
pub async fn get_user(pool: &SqlitePool, id: Uuid) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, keycloak_id, username, email, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user by identity-provider subject.
pub async fn get_user_by_keycloak_id(pool: &SqlitePool, keycloak_id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, keycloak_id, username, email, created_at, updated_at
        FROM users
        WHERE keycloak_id = ?
        "#,
    )
    .bind(keycloak_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: keycloak_id.to_string(),
    })
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_find_or_create_is_idempotent() {
        let db = test_db().await;

        let first = find_or_create_user(db.pool(), "kc-42", "rick", "rick@citadel.io")
            .await
            .unwrap();
        let second = find_or_create_user(db.pool(), "kc-42", "evil-rick", "evil@citadel.io")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(second.username, "rick");
        assert_eq!(second.email, "rick@citadel.io");
        assert_eq!(count_users(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_distinct_subjects_get_distinct_users() {
        let db = test_db().await;

        let rick = find_or_create_user(db.pool(), "kc-1", "rick", "rick@citadel.io")
            .await
            .unwrap();
        let morty = find_or_create_user(db.pool(), "kc-2", "morty", "morty@smith.com")
            .await
            .unwrap();

        assert_ne!(rick.id, morty.id);
        assert_eq!(count_users(db.pool()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let db = test_db().await;
        let result = get_user(db.pool(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "User", .. })));
    }

    #[tokio::test]
    async fn test_get_user_by_id_roundtrip() {
        let db = test_db().await;
        let created = find_or_create_user(db.pool(), "kc-7", "summer", "summer@smith.com")
            .await
            .unwrap();

        let fetched = get_user(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.keycloak_id, "kc-7");
        assert_eq!(fetched.username, "summer");
    }
}
