/// Database models for CampusHub
///
/// Each model owns the SQL for its table. Functions that may run inside a
/// transaction take any `PgExecutor`, so the same call works on a pool and on
/// an open transaction.
///
/// # Models
///
/// - `user`: Accounts and profile fields
/// - `skill`: Free-text skills attached to a user
/// - `entry`: Projects and events (stored in `projects`)
/// - `document`: Files uploaded at signup
/// - `registration`: A user joining someone else's entry
/// - `notification`: Messages to entry hosts

pub mod document;
pub mod entry;
pub mod notification;
pub mod registration;
pub mod skill;
pub mod user;
