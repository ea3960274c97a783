//! Store error types.

use quill_model::{ModelError, PostId};
use quill_persistence::PersistenceError;
use quill_validate::{AuthField, ErrorMap};
use thiserror::Error;

/// Errors from login, registration, and session restore.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The submitted form failed field validation.
    #[error("Please correct the highlighted fields")]
    InvalidForm(ErrorMap<AuthField>),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the user can fix this by resubmitting the form.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Model(_) | Self::Persistence(_))
    }
}

/// Errors from the post collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Unauthorized: Post does not belong to current user")]
    Unauthorized(PostId),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotAuthenticated => Some("Run `quill login` first.".into()),
            Self::NotFound(_) => Some("Run `quill list` to see your posts.".into()),
            Self::Unauthorized(_) | Self::Model(_) => None,
            Self::Persistence(err) => err.suggestion(),
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized(_))
    }
}

/// Errors from the remote demo API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote API returned status {status}")]
    Status { status: u16 },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
pub type Result<T> = std::result::Result<T, StoreError>;
