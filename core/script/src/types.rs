use crate::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STATE_PREFIX: &str = "STATE_";

/// Identifier of a state region, e.g. `STATE_SVEALAND`.
///
/// Only the bare identifier is stored; the `s:` scope prefix used in script
/// files is added by the matchers that need it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateId(String);

impl StateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StateId {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix(STATE_PREFIX)
            .map(|rest| {
                !rest.is_empty()
                    && rest
                        .bytes()
                        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
            })
            .unwrap_or(false);

        if valid {
            Ok(StateId(s.to_string()))
        } else {
            Err(ScriptError::InvalidStateId(s.to_string()))
        }
    }
}

impl TryFrom<String> for StateId {
    type Error = ScriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateId> for String {
    fn from(value: StateId) -> Self {
        value.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three-letter country tag, e.g. `FRA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerCode([u8; 3]);

impl OwnerCode {
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for OwnerCode {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_uppercase) => {
                Ok(OwnerCode([a, b, c]))
            }
            _ => Err(ScriptError::InvalidOwnerCode(s.to_string())),
        }
    }
}

impl TryFrom<String> for OwnerCode {
    type Error = ScriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OwnerCode> for String {
    fn from(value: OwnerCode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OwnerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of per-state sub-entity file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pops,
    Buildings,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pops, Category::Buildings];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pops => "pops",
            Category::Buildings => "buildings",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pops" => Ok(Category::Pops),
            "buildings" => Ok(Category::Buildings),
            other => Err(format!("unknown category: {other}")),
        }
    }
}
