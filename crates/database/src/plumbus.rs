//! Plumbus record persistence.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewPlumbus, Plumbus, PlumbusStatus, PlumbusUpdate};

/// Insert a new plumbus in `pending` status and return the stored row.
pub async fn create_plumbus(pool: &SqlitePool, new: &NewPlumbus) -> Result<Plumbus> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO plumbuses
            (id, user_id, name, size, color, shape, weight, wrapping, status, is_rare, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(new.user_id)
    .bind(&new.name)
    .bind(&new.size)
    .bind(&new.color)
    .bind(&new.shape)
    .bind(&new.weight)
    .bind(&new.wrapping)
    .bind(PlumbusStatus::Pending)
    .bind(new.is_rare)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Plumbus",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_plumbus(pool, id).await
}

/// Apply a sparse update to a plumbus. `None` fields keep their stored value.
pub async fn update_plumbus(pool: &SqlitePool, id: Uuid, update: &PlumbusUpdate) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE plumbuses
        SET status = COALESCE(?, status),
            image_path = COALESCE(?, image_path),
            signature = COALESCE(?, signature),
            signature_date = COALESCE(?, signature_date),
            error_msg = COALESCE(?, error_msg),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(update.status)
    .bind(update.image_path.as_deref())
    .bind(update.signature.as_deref())
    .bind(update.signature_date)
    .bind(update.error_msg.as_deref())
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Plumbus",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Get a plumbus by ID.
pub async fn get_plumbus(pool: &SqlitePool, id: Uuid) -> Result<Plumbus> {
    sqlx::query_as::<_, Plumbus>(
        r#"
        SELECT id, user_id, name, size, color, shape, weight, wrapping, status, is_rare,
               image_path, signature, signature_date, error_msg, created_at, updated_at
        FROM plumbuses
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Plumbus",
        id: id.to_string(),
    })
}

/// List a user's plumbuses, newest first.
pub async fn list_plumbuses_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Plumbus>> {
    let rows = sqlx::query_as::<_, Plumbus>(
        r#"
        SELECT id, user_id, name, size, color, shape, weight, wrapping, status, is_rare,
               image_path, signature, signature_date, error_msg, created_at, updated_at
        FROM plumbuses
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count a user's plumbuses per status. Statuses with no rows are absent.
pub async fn count_plumbuses_by_status(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<HashMap<PlumbusStatus, i64>> {
    let rows = sqlx::query_as::<_, (PlumbusStatus, i64)>(
        r#"
        SELECT status, COUNT(*) as count
        FROM plumbuses
        WHERE user_id = ?
        GROUP BY status
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{user, Database};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn gift(user_id: Uuid) -> NewPlumbus {
        NewPlumbus {
            user_id,
            name: "Gift".to_string(),
            size: "medium".to_string(),
            color: "blue".to_string(),
            shape: "round".to_string(),
            weight: "light".to_string(),
            wrapping: "gift".to_string(),
            is_rare: true,
        }
    }

    #[tokio::test]
    async fn test_create_echoes_request_and_starts_pending() {
        let db = test_db().await;
        let owner = user::find_or_create_user(db.pool(), "kc-1", "rick", "rick@citadel.io")
            .await
            .unwrap();

        let created = create_plumbus(db.pool(), &gift(owner.id)).await.unwrap();

        assert_eq!(created.user_id, owner.id);
        assert_eq!(created.name, "Gift");
        assert_eq!(created.size, "medium");
        assert_eq!(created.color, "blue");
        assert_eq!(created.shape, "round");
        assert_eq!(created.weight, "light");
        assert_eq!(created.wrapping, "gift");
        assert_eq!(created.status, PlumbusStatus::Pending);
        assert!(created.is_rare);
        assert!(created.image_path.is_none());
        assert!(created.error_msg.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_existing_user() {
        let db = test_db().await;
        let result = create_plumbus(db.pool(), &gift(Uuid::new_v4())).await;
        assert!(matches!(result, Err(DatabaseError::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_sparse_update_keeps_unset_fields() {
        let db = test_db().await;
        let owner = user::find_or_create_user(db.pool(), "kc-1", "rick", "rick@citadel.io")
            .await
            .unwrap();
        let created = create_plumbus(db.pool(), &gift(owner.id)).await.unwrap();
        let signed_at = Utc::now();

        update_plumbus(
            db.pool(),
            created.id,
            &PlumbusUpdate::signed("a.png".to_string(), "sig".to_string(), signed_at),
        )
        .await
        .unwrap();

        // An update with only a status must not wipe the backfilled fields.
        update_plumbus(db.pool(), created.id, &PlumbusUpdate::status(PlumbusStatus::Completed))
            .await
            .unwrap();

        let fetched = get_plumbus(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.status, PlumbusStatus::Completed);
        assert_eq!(fetched.image_path.as_deref(), Some("a.png"));
        assert_eq!(fetched.signature.as_deref(), Some("sig"));
        assert_eq!(
            fetched.signature_date.map(|d| d.timestamp_millis()),
            Some(signed_at.timestamp_millis())
        );
        assert!(fetched.is_rare);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let db = test_db().await;
        let result = update_plumbus(
            db.pool(),
            Uuid::new_v4(),
            &PlumbusUpdate::status(PlumbusStatus::Generating),
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "Plumbus", .. })));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let db = test_db().await;
        let err = get_plumbus(db.pool(), Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let db = test_db().await;
        let rick = user::find_or_create_user(db.pool(), "kc-1", "rick", "rick@citadel.io")
            .await
            .unwrap();
        let morty = user::find_or_create_user(db.pool(), "kc-2", "morty", "morty@smith.com")
            .await
            .unwrap();

        let first = create_plumbus(db.pool(), &gift(rick.id)).await.unwrap();
        let _other = create_plumbus(db.pool(), &gift(morty.id)).await.unwrap();
        let second = create_plumbus(db.pool(), &gift(rick.id)).await.unwrap();

        let listed = list_plumbuses_for_user(db.pool(), rick.id).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(listed.iter().all(|p| p.user_id == rick.id));
    }

    #[tokio::test]
    async fn test_count_by_status() {
        let db = test_db().await;
        let owner = user::find_or_create_user(db.pool(), "kc-1", "rick", "rick@citadel.io")
            .await
            .unwrap();

        let a = create_plumbus(db.pool(), &gift(owner.id)).await.unwrap();
        create_plumbus(db.pool(), &gift(owner.id)).await.unwrap();
        update_plumbus(db.pool(), a.id, &PlumbusUpdate::failed("boom".to_string()))
            .await
            .unwrap();

        let counts = count_plumbuses_by_status(db.pool(), owner.id).await.unwrap();
        assert_eq!(counts.get(&PlumbusStatus::Pending), Some(&1));
        assert_eq!(counts.get(&PlumbusStatus::Failed), Some(&1));
        assert_eq!(counts.get(&PlumbusStatus::Completed), None);
    }
}
