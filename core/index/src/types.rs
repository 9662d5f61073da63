use script::{Category, StateId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// --- JSON Structure ---

/// Files holding one state's blocks, at most one per category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildings: Option<String>,
}

impl IndexEntry {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Pops => self.pops.as_deref(),
            Category::Buildings => self.buildings.as_deref(),
        }
    }

    fn slot(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Pops => &mut self.pops,
            Category::Buildings => &mut self.buildings,
        }
    }

    /// Categories present in this entry, paired with their file name.
    pub fn files(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|file| (category, file)))
    }
}

/// What to do when a state/category pair is found in a second file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The file scanned last wins.
    #[default]
    Overwrite,
    /// The file scanned first wins.
    KeepFirst,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "keep_first" | "keep-first" => Ok(CollisionPolicy::KeepFirst),
            other => Err(format!(
                "unknown collision policy {other:?} (expected overwrite or keep_first)"
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::KeepFirst => f.write_str("keep_first"),
        }
    }
}

/// A state/category pair claimed by two different files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub state: StateId,
    pub category: Category,
    pub kept: String,
    pub dropped: String,
}

/// Reverse index from state to the files declaring its blocks.
///
/// Serialized as `{ "STATE_X": { "pops": "file.txt", "buildings": "file.txt" } }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct StateIndex {
    entries: BTreeMap<StateId, IndexEntry>,
}

impl StateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &StateId) -> Option<&IndexEntry> {
        self.entries.get(state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that `file` declares `state` for `category`.
    ///
    /// Returns the collision when a different file already held the slot; which
    /// of the two is kept depends on `policy`.
    pub fn insert(
        &mut self,
        state: StateId,
        category: Category,
        file: &str,
        policy: CollisionPolicy,
    ) -> Option<Collision> {
        let slot = self.entries.entry(state.clone()).or_default().slot(category);

        let existing = match slot.as_deref() {
            Some(existing) if existing == file => return None,
            Some(existing) => Some(existing.to_string()),
            None => None,
        };
        let Some(existing) = existing else {
            *slot = Some(file.to_string());
            return None;
        };

        let (kept, dropped) = match policy {
            CollisionPolicy::Overwrite => {
                *slot = Some(file.to_string());
                (file.to_string(), existing)
            }
            CollisionPolicy::KeepFirst => (existing, file.to_string()),
        };
        Some(Collision {
            state,
            category,
            kept,
            dropped,
        })
    }
}
