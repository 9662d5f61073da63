use crate::error::{IndexError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the `.txt` files directly inside `dir`, sorted by file name.
pub fn list_category_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IndexError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(dir = ?dir, %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
