use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid post id: {0:?}")]
    InvalidPostId(String),
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),
    #[error("unknown field: {0:?}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
