/// User model and database operations
///
/// A user is created once, at signup, together with its skills, entries and
/// documents (see [`crate::signup`]). Profile editing is not part of this
/// service, so the row is otherwise read-only.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     roll_number VARCHAR(64) NOT NULL,
///     department VARCHAR(255),
///     year_of_study VARCHAR(32),
///     phone_number VARCHAR(32),
///     profile_picture VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use campushub_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     &CreateUser {
///         name: "Ana".to_string(),
///         email: "ana@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         roll_number: "R1".to_string(),
///         department: None,
///         year_of_study: None,
///         phone_number: None,
///         profile_picture: None,
///     },
/// )
/// .await?;
///
/// let found = User::find_by_email(&pool, "ana@x.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Full user row, including the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login key, unique across users
    pub email: String,

    /// Argon2id password hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// College roll number
    pub roll_number: String,

    pub department: Option<String>,

    pub year_of_study: Option<String>,

    pub phone_number: Option<String>,

    /// Public path of the staged profile picture (e.g. `/uploads/...`)
    pub profile_picture: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// User fields that are safe to return to any caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub year_of_study: Option<String>,
    pub roll_number: String,
    pub profile_picture: Option<String>,
}

/// Input for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,

    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    pub roll_number: String,

    pub department: Option<String>,

    pub year_of_study: Option<String>,

    pub phone_number: Option<String>,

    pub profile_picture: Option<String>,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, roll_number, department, \
                            year_of_study, phone_number, profile_picture, created_at";

const PUBLIC_COLUMNS: &str = "id, name, email, phone_number, department, year_of_study, \
                              roll_number, profile_picture";

impl User {
    /// Inserts a user and returns the stored row.
    ///
    /// Accepts any executor so the insert can run on the pool or inside an
    /// open transaction.
    ///
    /// # Errors
    ///
    /// Fails with a database error on a duplicate email (`users_email_key`).
    pub async fn create<'e, E>(executor: E, data: &CreateUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, roll_number, department, \
             year_of_study, phone_number, profile_picture) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.roll_number)
            .bind(&data.department)
            .bind(&data.year_of_study)
            .bind(&data.phone_number)
            .bind(&data.profile_picture)
            .fetch_one(executor)
            .await
    }

    /// Finds a user by login email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Finds the public view of a user.
    pub async fn find_public<'e, E>(executor: E, id: Uuid) -> Result<Option<PublicUser>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {PUBLIC_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, PublicUser>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lists every user (public fields only), newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicUser>, sqlx::Error> {
        let sql = format!("SELECT {PUBLIC_COLUMNS} FROM users ORDER BY created_at DESC");

        sqlx::query_as::<_, PublicUser>(&sql).fetch_all(pool).await
    }

    /// Counts users. Used by tests to assert that nothing leaked from a
    /// rolled-back signup.
    pub async fn count_by_email(pool: &PgPool, email: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Reduces the row to its public fields.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            department: self.department.clone(),
            year_of_study: self.year_of_study.clone(),
            roll_number: self.roll_number.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            roll_number: "R1".to_string(),
            department: Some("CSE".to_string()),
            year_of_study: Some("3".to_string()),
            phone_number: None,
            profile_picture: Some("/uploads/1-2.png".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ana@x.com");
    }

    #[test]
    fn test_to_public_keeps_profile_fields() {
        let user = sample_user();
        let public = user.to_public();

        assert_eq!(public.id, user.id);
        assert_eq!(public.roll_number, "R1");
        assert_eq!(public.department.as_deref(), Some("CSE"));
        assert_eq!(public.profile_picture.as_deref(), Some("/uploads/1-2.png"));
    }
}
