pub mod config;
pub mod index;
pub mod owners;
pub mod patch;
pub mod swap;
