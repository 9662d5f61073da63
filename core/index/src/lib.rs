pub mod builder;
pub mod error;
pub mod files;
pub mod store;
pub mod types;

pub use builder::{IndexBuild, IndexBuilder, build_index, build_index_from_dirs};
pub use error::{IndexError, Result};
pub use files::list_category_files;
pub use store::{load_index, save_index};
pub use types::{Collision, CollisionPolicy, IndexEntry, StateIndex};
