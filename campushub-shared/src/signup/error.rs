use std::fmt;

use crate::auth::password::PasswordError;

/// Storage step of a signup that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupStage {
    Begin,
    User,
    Skill,
    Project,
    Document,
    /// Commit with no dependent rows
    CommitUserOnly,
    /// Commit after dependent rows were inserted
    CommitDetails,
}

impl SignupStage {
    pub fn message(&self) -> &'static str {
        match self {
            SignupStage::Begin => "Transaction start failed",
            SignupStage::User => "User insert failed",
            SignupStage::Skill => "Skill insert failed",
            SignupStage::Project => "Project insert failed",
            SignupStage::Document => "Document insert failed",
            SignupStage::CommitUserOnly => "Commit failed for user only",
            SignupStage::CommitDetails => "Commit failed after details",
        }
    }
}

impl fmt::Display for SignupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a signup was rejected or failed
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    /// A required field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// `skills` or `projects` arrived as text that is not a JSON list
    #[error("Invalid JSON in {field}: {source}")]
    MalformedList {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A project/event item cannot be stored as given
    #[error("Invalid project #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error(transparent)]
    Hash(#[from] PasswordError),

    /// A storage step failed; the transaction has been rolled back
    #[error("{stage}")]
    Storage {
        stage: SignupStage,
        #[source]
        source: sqlx::Error,
    },
}

impl SignupError {
    pub(crate) fn storage(stage: SignupStage, source: sqlx::Error) -> Self {
        SignupError::Storage { stage, source }
    }

    /// True for errors detected before any storage access
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SignupError::MissingField(_)
                | SignupError::MalformedList { .. }
                | SignupError::InvalidEntry { .. }
        )
    }

    pub fn stage(&self) -> Option<SignupStage> {
        match self {
            SignupError::Storage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
