/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use campushub_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use campushub_shared::{
    signup::{PgSignupStore, SignupCoordinator},
    uploads::{UploadStore, PUBLIC_PREFIX},
};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Largest accepted signup body (profile picture plus up to ten documents)
pub const SIGNUP_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Shared application state
///
/// Cloned into every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub uploads: UploadStore,
    pub signup: Arc<SignupCoordinator<PgSignupStore>>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let uploads = UploadStore::new(config.uploads.dir.clone());
        let signup = Arc::new(SignupCoordinator::new(PgSignupStore::new(db.clone())));

        Self {
            db,
            config: Arc::new(config),
            uploads,
            signup,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET  /health, /test-db                  (public)
/// ├── POST /signup, /login                    (public)
/// ├── GET  /profile/:userId, /users           (public)
/// ├── GET  /uploads/*                         (public, static files)
/// └── /api                                    (bearer token)
///     ├── GET/POST /projects
///     ├── DELETE   /projects/:id
///     ├── GET      /all-projects
///     ├── POST     /projects/:id/register
///     ├── GET      /projects/:id/registrations
///     ├── POST     /notifications
///     ├── GET      /notifications/:userId
///     ├── PUT      /notifications/:userId/read
///     └── GET      /notifications/:userId/unread
/// ```
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/test-db", get(routes::health::test_db))
        .route(
            "/signup",
            post(routes::auth::signup).layer(DefaultBodyLimit::max(SIGNUP_BODY_LIMIT)),
        )
        .route("/login", post(routes::auth::login))
        .route("/profile/:user_id", get(routes::profile::get_profile))
        .route("/users", get(routes::users::list_users));

    let api_routes = Router::new()
        .route(
            "/projects",
            get(routes::entries::list_own_entries).post(routes::entries::create_entry),
        )
        .route("/projects/:id", delete(routes::entries::delete_entry))
        .route("/all-projects", get(routes::entries::list_all_entries))
        .route("/projects/:id/register", post(routes::registrations::register))
        .route(
            "/projects/:id/registrations",
            get(routes::registrations::list_registrations),
        )
        .route("/notifications", post(routes::notifications::create_notification))
        .route(
            "/notifications/:user_id",
            get(routes::notifications::list_notifications),
        )
        .route(
            "/notifications/:user_id/read",
            put(routes::notifications::mark_read),
        )
        .route(
            "/notifications/:user_id/unread",
            get(routes::notifications::unread_count),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_auth,
        ));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.uploads.dir()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
