/// Bearer token authentication
///
/// Validates `Authorization: Bearer <token>` and stores the caller's
/// `AuthContext` in request extensions for handlers to extract.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use campushub_shared::auth::middleware::authenticate;

use crate::{app::AppState, error::ApiResult};

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let auth = authenticate(header, state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request");
        e
    })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
