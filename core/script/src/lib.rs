pub mod block;
pub mod error;
pub mod owners;
pub mod patch;
pub mod scan;
pub mod types;

pub use block::{Block, extract_block};
pub use error::{Result, ScriptError};
pub use owners::{OwnershipTable, parse_ownership};
pub use patch::{Patched, patch_ownership};
pub use scan::declared_states;
pub use types::{Category, OwnerCode, StateId};
