/// Registration model: a joinee's record of joining someone else's entry
///
/// At most one registration may exist per (user, entry). There is no storage
/// constraint for this; callers check [`Registration::exists`] inside the same
/// transaction that inserts. Two concurrent attempts by the same user can
/// still both pass the check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A registered user as seen by the entry's host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registrant {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl Registration {
    pub async fn exists<'e, E>(executor: E, user_id: Uuid, project_id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(executor)
        .await
    }

    pub async fn create<'e, E>(executor: E, project_id: Uuid, user_id: Uuid) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (project_id, user_id)
            VALUES ($1, $2)
            RETURNING id, project_id, user_id, created_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Users registered for an entry, earliest first.
    pub async fn registrants(pool: &PgPool, project_id: Uuid) -> Result<Vec<Registrant>, sqlx::Error> {
        sqlx::query_as::<_, Registrant>(
            r#"
            SELECT r.user_id, u.name, u.email
            FROM registrations r
            JOIN users u ON r.user_id = u.id
            WHERE r.project_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
