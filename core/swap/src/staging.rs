use crate::error::Result;
use script::Category;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy-on-first-write staging of corpus files into the output directory.
///
/// Each output path is copied from its source at most once per run, so later
/// patches for other states in the same file build on the earlier ones.
#[derive(Debug)]
pub struct Staging {
    output_dir: PathBuf,
    staged: HashSet<PathBuf>,
}

impl Staging {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            staged: HashSet::new(),
        }
    }

    /// Output location for `file_name` of `category`.
    pub fn output_path(&self, category: Category, file_name: &str) -> PathBuf {
        self.output_dir.join(category.as_str()).join(file_name)
    }

    /// Return the staged copy of `source`, copying it on first request.
    pub fn stage(&mut self, category: Category, source: &Path, file_name: &str) -> Result<PathBuf> {
        let target = self.output_path(category, file_name);
        if self.staged.contains(&target) {
            return Ok(target);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &target)?;
        tracing::debug!(source = ?source, target = ?target, "staged file");

        self.staged.insert(target.clone());
        Ok(target)
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.staged.contains(path)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}
