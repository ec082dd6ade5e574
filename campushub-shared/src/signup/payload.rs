/// Boundary normalisation of signup input
///
/// Clients send `skills` and `projects` either as JSON text (multipart form
/// fields) or as real JSON lists (JSON bodies). [`SignupForm::normalize`]
/// turns both shapes into one [`SignupRequest`] so the coordinator only ever
/// sees ordered lists.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use super::error::SignupError;
use crate::models::entry::{EntryKind, NewEntry};
use crate::uploads::StagedFile;

/// A list that may arrive serialized as text or already structured
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListField<T> {
    Text(String),
    List(Vec<T>),
}

impl<T: DeserializeOwned> ListField<T> {
    /// Parses the text form; structured lists pass through unchanged.
    pub fn into_list(self, field: &'static str) -> Result<Vec<T>, SignupError> {
        match self {
            ListField::List(items) => Ok(items),
            ListField::Text(text) => serde_json::from_str(&text)
                .map_err(|source| SignupError::MalformedList { field, source }),
        }
    }
}

/// `links` given either comma-joined or as a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LinksInput {
    Joined(String),
    List(Vec<String>),
}

impl LinksInput {
    pub fn into_joined(self) -> String {
        match self {
            LinksInput::Joined(joined) => joined,
            LinksInput::List(links) => links
                .iter()
                .map(|link| link.trim())
                .filter(|link| !link.is_empty())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// One project/event as submitted by a client
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EntryInput {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub links: Option<LinksInput>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl EntryInput {
    /// Validates the item; a missing or blank `type` becomes `project`.
    pub fn normalize(self, index: usize) -> Result<NewEntry, SignupError> {
        let project_name = self
            .project_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SignupError::InvalidEntry {
                index,
                reason: "project_name is required".to_string(),
            })?;

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => EntryKind::default(),
            Some(raw) => EntryKind::parse(raw).map_err(|e| SignupError::InvalidEntry {
                index,
                reason: e.to_string(),
            })?,
        };

        Ok(NewEntry {
            project_name,
            project_description: self.project_description,
            links: self.links.map(LinksInput::into_joined),
            kind,
        })
    }
}

/// Raw signup fields as they arrive at the HTTP boundary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year_of_study: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone_number: Option<String>,
    pub skills: Option<ListField<String>>,
    pub projects: Option<ListField<EntryInput>>,
}

impl SignupForm {
    /// Checks required fields, then normalises `skills` and `projects`.
    ///
    /// Files are not part of the form; the caller attaches staged uploads to
    /// the returned request.
    pub fn normalize(self) -> Result<SignupRequest, SignupError> {
        let request = SignupRequest {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            roll_number: self.roll_number.unwrap_or_default(),
            department: non_blank(self.department),
            year_of_study: non_blank(self.year_of_study),
            phone_number: non_blank(self.phone_number),
            profile_picture: None,
            skills: Vec::new(),
            entries: Vec::new(),
            documents: Vec::new(),
        };
        request.validate()?;

        let skills = match self.skills {
            Some(field) => field.into_list("skills")?,
            None => Vec::new(),
        };

        let entries = match self.projects {
            Some(field) => field
                .into_list("projects")?
                .into_iter()
                .enumerate()
                .map(|(index, item)| item.normalize(index))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(SignupRequest {
            skills,
            entries,
            ..request
        })
    }
}

/// Normalised input of the registration coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    /// Plaintext; hashed by the coordinator and then dropped
    pub password: String,
    pub roll_number: String,
    pub department: Option<String>,
    pub year_of_study: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<StagedFile>,
    pub skills: Vec<String>,
    pub entries: Vec<NewEntry>,
    pub documents: Vec<StagedFile>,
}

impl SignupRequest {
    /// Fails on the first blank required field, in the order
    /// name, email, password, rollNumber.
    pub fn validate(&self) -> Result<(), SignupError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("rollNumber", &self.roll_number),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(SignupError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Number of dependent rows a successful signup writes.
    pub fn dependent_rows(&self) -> usize {
        self.skills.len() + self.entries.len() + self.documents.len()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
    }))
}
