/// Document model
///
/// Documents are files uploaded at signup. The row keeps the original file
/// name for display and the public path of the staged copy.

use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_name: String,
    pub file_path: String,
}

/// Document as shown on a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentLink {
    /// Original file name
    pub name: String,

    /// Public path of the stored file
    pub file: String,
}

impl Document {
    pub async fn create<'e, E>(
        executor: E,
        user_id: Uuid,
        document_name: &str,
        file_path: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (user_id, document_name, file_path)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, document_name, file_path
            "#,
        )
        .bind(user_id)
        .bind(document_name)
        .bind(file_path)
        .fetch_one(executor)
        .await
    }

    pub async fn links_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<DocumentLink>, sqlx::Error> {
        sqlx::query_as::<_, DocumentLink>(
            "SELECT document_name AS name, file_path AS file FROM documents WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
