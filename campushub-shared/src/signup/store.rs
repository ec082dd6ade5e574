/// Transaction-scoped storage used by the signup coordinator
///
/// The coordinator never touches a pool directly: it asks a [`SignupStore`]
/// for a fresh [`SignupTransaction`] and drives every insert through it.
/// [`PgSignupStore`] is the Postgres implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::entry::{Entry, NewEntry};
use crate::models::skill::Skill;
use crate::models::user::{CreateUser, User};

/// Opens signup transactions
#[async_trait]
pub trait SignupStore: Send + Sync {
    type Tx: SignupTransaction;

    async fn begin(&self) -> Result<Self::Tx, sqlx::Error>;
}

/// One open transaction
///
/// Inserts take `&self` so that several can be in flight at once. Dropping a
/// transaction without committing rolls it back.
#[async_trait]
pub trait SignupTransaction: Send + Sync + Sized {
    /// Inserts the user row and returns its generated id.
    async fn insert_user(&self, user: &CreateUser) -> Result<Uuid, sqlx::Error>;

    async fn insert_skill(&self, user_id: Uuid, skill_name: &str) -> Result<(), sqlx::Error>;

    async fn insert_entry(&self, user_id: Uuid, entry: &NewEntry) -> Result<(), sqlx::Error>;

    async fn insert_document(
        &self,
        user_id: Uuid,
        document_name: &str,
        file_path: &str,
    ) -> Result<(), sqlx::Error>;

    async fn commit(self) -> Result<(), sqlx::Error>;

    async fn rollback(self) -> Result<(), sqlx::Error>;
}

/// Postgres-backed [`SignupStore`]
#[derive(Debug, Clone)]
pub struct PgSignupStore {
    pool: PgPool,
}

impl PgSignupStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SignupStore for PgSignupStore {
    type Tx = PgSignupTransaction;

    async fn begin(&self) -> Result<Self::Tx, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSignupTransaction { tx: Mutex::new(tx) })
    }
}

/// A Postgres transaction shared by concurrently dispatched inserts
///
/// A transaction is bound to one connection, so statements are issued on it
/// one at a time in the order the lock is acquired.
pub struct PgSignupTransaction {
    tx: Mutex<Transaction<'static, Postgres>>,
}

#[async_trait]
impl SignupTransaction for PgSignupTransaction {
    async fn insert_user(&self, user: &CreateUser) -> Result<Uuid, sqlx::Error> {
        let mut tx = self.tx.lock().await;
        let user = User::create(&mut **tx, user).await?;
        Ok(user.id)
    }

    async fn insert_skill(&self, user_id: Uuid, skill_name: &str) -> Result<(), sqlx::Error> {
        let mut tx = self.tx.lock().await;
        Skill::create(&mut **tx, user_id, skill_name).await?;
        Ok(())
    }

    async fn insert_entry(&self, user_id: Uuid, entry: &NewEntry) -> Result<(), sqlx::Error> {
        let mut tx = self.tx.lock().await;
        Entry::create(&mut **tx, user_id, entry).await?;
        Ok(())
    }

    async fn insert_document(
        &self,
        user_id: Uuid,
        document_name: &str,
        file_path: &str,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.tx.lock().await;
        Document::create(&mut **tx, user_id, document_name, file_path).await?;
        Ok(())
    }

    async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.into_inner().commit().await
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.into_inner().rollback().await
    }
}
