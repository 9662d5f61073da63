use script::{OwnerCode, StateId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// At least one file was rewritten.
    Patched,
    /// Blocks were found but already carried the new owner.
    Unchanged,
    /// The index names files for the state, but none holds its block.
    NotFound,
    /// No block was found and at least one indexed file could not be read.
    Unreadable,
    /// The state has no index entry.
    Skipped,
}

#[derive(Serialize, Debug, Clone)]
pub struct StateOutcome {
    pub state: StateId,
    pub owner: OwnerCode,
    pub status: SwapStatus,
    /// Staged files rewritten for this state.
    pub files: Vec<PathBuf>,
}

/// Result of an ownership swap run.
#[derive(Serialize, Debug, Clone, Default)]
pub struct SwapReport {
    /// The index was rebuilt rather than loaded.
    pub index_rebuilt: bool,
    pub outcomes: Vec<StateOutcome>,
    /// Corpus or staged files that could not be read.
    pub unreadable_files: BTreeSet<PathBuf>,
    /// Indexed files that did not contain the state's block.
    pub blocks_not_found: usize,
    /// Files copied into the output directory.
    pub staged_files: usize,
}

impl SwapReport {
    pub fn count(&self, status: SwapStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn outcome(&self, state: &StateId) -> Option<&StateOutcome> {
        self.outcomes.iter().find(|o| &o.state == state)
    }
}
