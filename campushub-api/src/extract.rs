/// Signup body extraction
///
/// `/signup` accepts `multipart/form-data` (text fields plus
/// `profilePicture` and `documents` file fields), a urlencoded form, or a
/// JSON body. All of them end up as a [`SignupPayload`]: the raw form fields
/// and the uploaded files, still in memory. Nothing is written to disk here.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use bytes::Bytes;
use campushub_shared::signup::SignupForm;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const PROFILE_PICTURE_FIELD: &str = "profilePicture";
pub const DOCUMENTS_FIELD: &str = "documents";
pub const MAX_DOCUMENTS: usize = 10;

/// A file received in the request body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Default)]
pub struct SignupPayload {
    pub form: SignupForm,
    pub profile_picture: Option<UploadedFile>,
    pub documents: Vec<UploadedFile>,
}

#[async_trait]
impl<S> FromRequest<S> for SignupPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;

            let fields = pairs
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect();

            return Ok(SignupPayload {
                form: form_from_fields(fields)?,
                ..Default::default()
            });
        }

        if !content_type.starts_with("multipart/form-data") {
            let Json(form) = Json::<SignupForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;

            return Ok(SignupPayload {
                form,
                ..Default::default()
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut fields = Map::new();
        let mut payload = SignupPayload::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let file_name = field
                .file_name()
                .filter(|n| !n.is_empty())
                .map(str::to_string);

            match file_name {
                Some(file_name) => {
                    let file = UploadedFile {
                        file_name,
                        data: field.bytes().await?,
                    };

                    match name.as_str() {
                        PROFILE_PICTURE_FIELD if payload.profile_picture.is_none() => {
                            payload.profile_picture = Some(file);
                        }
                        DOCUMENTS_FIELD if payload.documents.len() < MAX_DOCUMENTS => {
                            payload.documents.push(file);
                        }
                        PROFILE_PICTURE_FIELD | DOCUMENTS_FIELD => {
                            return Err(ApiError::BadRequest(format!(
                                "Too many files in field: {}",
                                name
                            )));
                        }
                        _ => {
                            return Err(ApiError::BadRequest(format!(
                                "Unexpected file field: {}",
                                name
                            )));
                        }
                    }
                }
                None => {
                    let text = field.text().await?;
                    fields.insert(name, Value::String(text));
                }
            }
        }

        payload.form = form_from_fields(fields)?;

        Ok(payload)
    }
}

/// Text fields of a form body; later duplicates win
fn form_from_fields(fields: Map<String, Value>) -> Result<SignupForm, ApiError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::BadRequest(format!("Invalid signup form: {}", e)))
}
