/// Entry model: a user-created project or event
///
/// Entries are stored in the `projects` table whatever their kind; the `type`
/// column tells projects and events apart. The creator of an entry is its
/// host and the only user allowed to delete it or see who registered.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     project_name VARCHAR(255) NOT NULL,
///     project_description TEXT,
///     links TEXT,
///     type VARCHAR(16) NOT NULL DEFAULT 'project',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use uuid::Uuid;

/// Kind tag of an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Long-running collaboration (the default)
    #[default]
    Project,

    /// Time-bound event
    Event,
}

/// Returned when a stored or submitted kind is neither `project` nor `event`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entry type '{0}' (expected 'project' or 'event')")]
pub struct UnknownEntryKind(pub String);

impl EntryKind {
    /// Converts kind to its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Project => "project",
            EntryKind::Event => "event",
        }
    }

    /// Parses a kind, case-insensitively
    pub fn parse(s: &str) -> Result<Self, UnknownEntryKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(EntryKind::Project),
            "event" => Ok(EntryKind::Event),
            _ => Err(UnknownEntryKind(s.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EntryKind {
    type Error = UnknownEntryKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntryKind::parse(&value)
    }
}

/// Stored entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    pub id: Uuid,

    /// Creator / host
    pub user_id: Uuid,

    pub project_name: String,

    pub project_description: Option<String>,

    /// Comma-joined list of links
    pub links: Option<String>,

    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: EntryKind,

    pub created_at: DateTime<Utc>,
}

/// Entry joined with its creator's display name, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EntryWithCreator {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: Entry,

    pub creator_name: String,
}

/// Input for creating an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub project_name: String,
    pub project_description: Option<String>,
    pub links: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

const ENTRY_COLUMNS: &str =
    "p.id, p.user_id, p.project_name, p.project_description, p.links, p.type, p.created_at";

impl Entry {
    /// Inserts an entry owned by `user_id`.
    pub async fn create<'e, E>(executor: E, user_id: Uuid, data: &NewEntry) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO projects (user_id, project_name, project_description, links, type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, project_name, project_description, links, type, created_at
            "#,
        )
        .bind(user_id)
        .bind(&data.project_name)
        .bind(&data.project_description)
        .bind(&data.links)
        .bind(data.kind.as_str())
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM projects p WHERE p.id = $1");

        sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Entries hosted by `user_id`, with the host's name.
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<EntryWithCreator>, sqlx::Error> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS}, u.name AS creator_name \
             FROM projects p JOIN users u ON p.user_id = u.id \
             WHERE p.user_id = $1 \
             ORDER BY p.created_at DESC"
        );

        sqlx::query_as::<_, EntryWithCreator>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Every entry, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<EntryWithCreator>, sqlx::Error> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS}, u.name AS creator_name \
             FROM projects p JOIN users u ON p.user_id = u.id \
             ORDER BY p.created_at DESC, p.id DESC"
        );

        sqlx::query_as::<_, EntryWithCreator>(&sql).fetch_all(pool).await
    }

    /// Deletes an entry only if `owner_id` hosts it.
    ///
    /// Returns false when nothing matched (already gone or not owned).
    pub async fn delete_owned(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
