/// Skill model
///
/// A skill is a free-text name attached to one user. Duplicates are allowed.

use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_name: String,
}

impl Skill {
    /// Attaches one skill to a user.
    pub async fn create<'e, E>(executor: E, user_id: Uuid, skill_name: &str) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (user_id, skill_name)
            VALUES ($1, $2)
            RETURNING id, user_id, skill_name
            "#,
        )
        .bind(user_id)
        .bind(skill_name)
        .fetch_one(executor)
        .await
    }

    /// Skill names of a user.
    pub async fn names_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT skill_name FROM skills WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
