use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Regex Error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid state identifier: {0:?} (expected STATE_[A-Z0-9_]+)")]
    InvalidStateId(String),

    #[error("Invalid owner code: {0:?} (expected three uppercase letters)")]
    InvalidOwnerCode(String),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
