/// API route handlers, organised by resource
///
/// - `health`: liveness and database probe
/// - `auth`: signup and login
/// - `profile`: public profile with skills, entries and documents
/// - `users`: user directory
/// - `entries`: projects and events
/// - `registrations`: joining entries
/// - `notifications`: host notifications

pub mod auth;
pub mod entries;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod registrations;
pub mod users;
