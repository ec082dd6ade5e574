/// Account registration
///
/// A signup writes a user row plus any number of skill, entry and document
/// rows. The whole set is committed in one transaction or not at all.
///
/// - [`payload`]: turns raw form/JSON input into a [`SignupRequest`]
/// - [`store`]: the transaction seam and its Postgres implementation
/// - [`coordinator`]: dispatches the inserts and decides commit or rollback
///
/// # Example
///
/// ```no_run
/// use campushub_shared::signup::{PgSignupStore, SignupCoordinator, SignupForm};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, form: SignupForm) -> Result<(), Box<dyn std::error::Error>> {
/// let coordinator = SignupCoordinator::new(PgSignupStore::new(pool));
/// let outcome = coordinator.register(form.normalize()?).await?;
/// println!("registered {}", outcome.user_id);
/// # Ok(())
/// # }
/// ```

pub mod coordinator;
pub mod error;
pub mod payload;
pub mod store;

pub use coordinator::{SignupCoordinator, SignupOutcome, SUCCESS_MESSAGE};
pub use error::{SignupError, SignupStage};
pub use payload::{EntryInput, LinksInput, ListField, SignupForm, SignupRequest};
pub use store::{PgSignupStore, PgSignupTransaction, SignupStore, SignupTransaction};
