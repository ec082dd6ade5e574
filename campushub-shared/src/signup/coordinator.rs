use futures::future::{join_all, BoxFuture};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{SignupError, SignupStage};
use super::payload::SignupRequest;
use super::store::{SignupStore, SignupTransaction};
use crate::auth::password::hash_password;
use crate::models::user::CreateUser;

/// Response message of a successful signup
pub const SUCCESS_MESSAGE: &str = "✅ User Registered Successfully";

/// What a committed signup wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupOutcome {
    pub user_id: Uuid,
    pub skills: usize,
    pub entries: usize,
    pub documents: usize,
}

/// Persists a user and all of its dependent rows as one unit
///
/// Either the user row and every skill, entry and document row are
/// committed, or the transaction is rolled back and nothing from the call is
/// visible. Dependent inserts are dispatched together and joined; if any of
/// them fails the first failure (in dispatch order) is reported and no commit
/// is attempted.
#[derive(Debug, Clone)]
pub struct SignupCoordinator<S> {
    store: S,
}

impl<S: SignupStore> SignupCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn register(&self, request: SignupRequest) -> Result<SignupOutcome, SignupError> {
        request.validate()?;

        let password_hash = hash_password(&request.password)?;
        let new_user = CreateUser {
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash,
            roll_number: request.roll_number.clone(),
            department: request.department.clone(),
            year_of_study: request.year_of_study.clone(),
            phone_number: request.phone_number.clone(),
            profile_picture: request.profile_picture.as_ref().map(|f| f.path.clone()),
        };

        let tx = self
            .store
            .begin()
            .await
            .map_err(|e| SignupError::storage(SignupStage::Begin, e))?;

        let user_id = match tx.insert_user(&new_user).await {
            Ok(id) => id,
            Err(e) => {
                let err = SignupError::storage(SignupStage::User, e);
                abort(tx, &request, &err).await;
                return Err(err);
            }
        };

        let outcome = SignupOutcome {
            user_id,
            skills: request.skills.len(),
            entries: request.entries.len(),
            documents: request.documents.len(),
        };

        if request.dependent_rows() == 0 {
            if let Err(e) = tx.commit().await {
                let err = SignupError::storage(SignupStage::CommitUserOnly, e);
                commit_failed(&request, &err);
                return Err(err);
            }

            info!(user_id = %user_id, "User registered without details");
            return Ok(outcome);
        }

        let failure = {
            let tx = &tx;
            let mut batch: Vec<BoxFuture<'_, Result<(), SignupError>>> =
                Vec::with_capacity(request.dependent_rows());

            for skill in &request.skills {
                batch.push(Box::pin(async move {
                    tx.insert_skill(user_id, skill)
                        .await
                        .map_err(|e| SignupError::storage(SignupStage::Skill, e))
                }));
            }

            for entry in &request.entries {
                batch.push(Box::pin(async move {
                    tx.insert_entry(user_id, entry)
                        .await
                        .map_err(|e| SignupError::storage(SignupStage::Project, e))
                }));
            }

            for document in &request.documents {
                batch.push(Box::pin(async move {
                    tx.insert_document(user_id, &document.original_name, &document.path)
                        .await
                        .map_err(|e| SignupError::storage(SignupStage::Document, e))
                }));
            }

            join_all(batch).await.into_iter().find_map(Result::err)
        };

        if let Some(err) = failure {
            abort(tx, &request, &err).await;
            return Err(err);
        }

        if let Err(e) = tx.commit().await {
            let err = SignupError::storage(SignupStage::CommitDetails, e);
            commit_failed(&request, &err);
            return Err(err);
        }

        info!(
            user_id = %user_id,
            skills = outcome.skills,
            entries = outcome.entries,
            documents = outcome.documents,
            "User registered"
        );

        Ok(outcome)
    }
}

async fn abort<T: SignupTransaction>(tx: T, request: &SignupRequest, cause: &SignupError) {
    warn!(email = %request.email, error = %cause, "Signup failed, rolling back");

    if let Err(e) = tx.rollback().await {
        warn!(error = %e, "Rollback failed");
    }

    warn_orphaned_uploads(request);
}

/// The consumed transaction is discarded by the server.
fn commit_failed(request: &SignupRequest, cause: &SignupError) {
    warn!(email = %request.email, error = %cause, "Signup commit failed");

    warn_orphaned_uploads(request);
}

fn warn_orphaned_uploads(request: &SignupRequest) {
    let staged = orphaned_uploads(request);
    if staged > 0 {
        warn!(files = staged, "Staged uploads left behind by failed signup");
    }
}

fn orphaned_uploads(request: &SignupRequest) -> usize {
    request.documents.len() + usize::from(request.profile_picture.is_some())
}
