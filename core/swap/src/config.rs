use crate::error::{Result, SwapError};
use script::Category;
use serde::{Deserialize, Serialize};
use state_index::CollisionPolicy;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths and policies for one ownership swap run.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "states_file": "game/common/history/states/00_states.txt", "output_dir": "mod/common/history" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SwapConfig {
    /// Master file declaring the owner of each state.
    pub states_file: PathBuf,
    /// Persisted state index.
    pub index_file: PathBuf,
    pub pops_dir: PathBuf,
    pub buildings_dir: PathBuf,
    /// Receives `pops/` and `buildings/` copies of every touched file.
    pub output_dir: PathBuf,
    pub collision_policy: CollisionPolicy,
    /// Ignore any persisted index and rebuild it.
    pub rebuild_index: bool,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            states_file: PathBuf::from("gamefiles/states/00_states.txt"),
            index_file: PathBuf::from("data/state_index.json"),
            pops_dir: PathBuf::from("gamefiles/pops"),
            buildings_dir: PathBuf::from("gamefiles/buildings"),
            output_dir: PathBuf::from("output"),
            collision_policy: CollisionPolicy::default(),
            rebuild_index: false,
        }
    }
}

impl SwapConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn category_dir(&self, category: Category) -> &Path {
        match category {
            Category::Pops => &self.pops_dir,
            Category::Buildings => &self.buildings_dir,
        }
    }

    /// Check that every input the run depends on exists.
    pub fn validate(&self) -> Result<()> {
        if !self.states_file.is_file() {
            return Err(SwapError::MissingStatesFile(self.states_file.clone()));
        }
        self.validate_corpus()
    }

    /// Check that both category directories exist.
    pub fn validate_corpus(&self) -> Result<()> {
        for category in Category::ALL {
            let dir = self.category_dir(category);
            if !dir.is_dir() {
                return Err(SwapError::MissingCategoryDir(dir.to_path_buf()));
            }
        }
        Ok(())
    }
}
