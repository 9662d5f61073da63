use crate::error::Result;
use crate::types::StateIndex;
use std::fs;
use std::path::Path;

/// Load a persisted index. A missing file is `Ok(None)`.
pub fn load_index(path: &Path) -> Result<Option<StateIndex>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let index: StateIndex = serde_json::from_str(&content)?;
    Ok(Some(index))
}

/// Write the index as pretty-printed JSON, creating parent directories.
pub fn save_index(index: &StateIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(index)?;
    fs::write(path, json)?;
    Ok(())
}
