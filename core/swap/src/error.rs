use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Index error: {0}")]
    Index(#[from] state_index::IndexError),
    #[error("Script error: {0}")]
    Script(#[from] script::ScriptError),
    #[error("States file not found: {0:?}")]
    MissingStatesFile(PathBuf),
    #[error("Category directory not found: {0:?}")]
    MissingCategoryDir(PathBuf),
    #[error("Refusing to overwrite input file: {0:?}")]
    InPlacePatch(PathBuf),
}

pub type Result<T> = std::result::Result<T, SwapError>;
