use crate::error::Result;
use crate::files::list_category_files;
use crate::types::{CollisionPolicy, StateIndex};
use script::{Category, declared_states};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of an index build.
#[derive(Debug, Default)]
pub struct IndexBuild {
    pub index: StateIndex,
    /// Files that could not be read or decoded; they contribute nothing.
    pub unreadable: Vec<PathBuf>,
    /// Number of state/category pairs claimed by more than one file.
    pub collisions: usize,
}

/// Accumulates state declarations file by file.
pub struct IndexBuilder {
    build: IndexBuild,
    policy: CollisionPolicy,
}

impl IndexBuilder {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            build: IndexBuild::default(),
            policy,
        }
    }

    /// Index the declarations in `text`, recorded under `file_name`.
    ///
    /// Returns the number of distinct states declared.
    pub fn add_text(&mut self, category: Category, file_name: &str, text: &str) -> Result<usize> {
        let states = declared_states(text)?;
        let count = states.len();

        for state in states {
            if let Some(collision) = self.build.index.insert(state, category, file_name, self.policy) {
                tracing::warn!(
                    state = %collision.state,
                    category = %collision.category,
                    kept = %collision.kept,
                    dropped = %collision.dropped,
                    "state declared in more than one file"
                );
                self.build.collisions += 1;
            }
        }

        Ok(count)
    }

    /// Index one file. Read or decode failures skip the file.
    pub fn add_file(&mut self, category: Category, path: &Path) -> Result<()> {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                self.build.unreadable.push(path.to_path_buf());
                return Ok(());
            }
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = ?path, %err, "skipping unreadable file");
                self.build.unreadable.push(path.to_path_buf());
                return Ok(());
            }
        };

        let count = self.add_text(category, &file_name, &content)?;
        tracing::debug!(path = ?path, states = count, "indexed file");
        Ok(())
    }

    pub fn finish(self) -> IndexBuild {
        self.build
    }
}

/// Build the index over each category's files, in the given order.
pub fn build_index(file_sets: &[(Category, Vec<PathBuf>)], policy: CollisionPolicy) -> Result<IndexBuild> {
    let mut builder = IndexBuilder::new(policy);
    for (category, files) in file_sets {
        for path in files {
            builder.add_file(*category, path)?;
        }
    }
    Ok(builder.finish())
}

/// List each category directory and build the index over its `.txt` files.
pub fn build_index_from_dirs(dirs: &[(Category, &Path)], policy: CollisionPolicy) -> Result<IndexBuild> {
    let mut file_sets = Vec::with_capacity(dirs.len());
    for (category, dir) in dirs {
        file_sets.push((*category, list_category_files(dir)?));
    }

    let build = build_index(&file_sets, policy)?;
    tracing::info!(
        states = build.index.len(),
        unreadable = build.unreadable.len(),
        collisions = build.collisions,
        "built state index"
    );
    Ok(build)
}
