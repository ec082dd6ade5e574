/// Public profile endpoint
///
/// ```text
/// GET /profile/:userId
/// ```
///
/// ```json
/// {
///   "message": "Profile data retrieved",
///   "user": {
///     "id": "uuid", "name": "Ana", "email": "ana@x.com", "...": "...",
///     "projects": [{ "project_name": "X", "project_description": "d", "links": "", "type": "project" }],
///     "skills": ["Go", "SQL"],
///     "documents": [{ "name": "cv.pdf", "file": "/uploads/..." }]
///   }
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use campushub_shared::models::{
    document::{Document, DocumentLink},
    entry::{Entry, EntryKind},
    skill::Skill,
    user::{PublicUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: Profile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub projects: Vec<ProfileEntry>,
    pub skills: Vec<String>,
    pub documents: Vec<DocumentLink>,
}

/// Entry as listed on its host's profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub project_name: String,
    pub project_description: Option<String>,
    pub links: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl From<Entry> for ProfileEntry {
    fn from(entry: Entry) -> Self {
        Self {
            project_name: entry.project_name,
            project_description: entry.project_description,
            links: entry.links,
            kind: entry.kind,
        }
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_public(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let (entries, skills, documents) = tokio::try_join!(
        Entry::list_by_owner(&state.db, user_id),
        Skill::names_for_user(&state.db, user_id),
        Document::links_for_user(&state.db, user_id),
    )?;

    Ok(Json(ProfileResponse {
        message: "Profile data retrieved".to_string(),
        user: Profile {
            user,
            projects: entries.into_iter().map(|e| e.entry.into()).collect(),
            skills,
            documents,
        },
    }))
}
