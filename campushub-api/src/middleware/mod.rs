/// Middleware for the API server
///
/// - `security`: response security headers
/// - `auth`: bearer token authentication for `/api` routes

pub mod auth;
pub mod security;
