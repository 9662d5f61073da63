pub mod config;
pub mod error;
pub mod process;
pub mod report;
pub mod staging;

pub use config::SwapConfig;
pub use error::{Result, SwapError};
pub use process::{OwnershipSwap, swap_file};
pub use report::{StateOutcome, SwapReport, SwapStatus};
pub use staging::Staging;
