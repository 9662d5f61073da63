use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Script error: {0}")]
    Script(#[from] script::ScriptError),
    #[error("Directory not found: {0:?}")]
    MissingDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, IndexError>;
