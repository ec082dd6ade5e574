/// User directory
///
/// `GET /users` lists every user with public fields only, newest first.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use campushub_shared::models::user::{PublicUser, User};

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    Ok(Json(User::list_public(&state.db).await?))
}
