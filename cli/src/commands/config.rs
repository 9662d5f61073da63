use anyhow::{Context, Result};
use clap::Args;
use state_index::CollisionPolicy;
use std::path::PathBuf;
use swap::SwapConfig;

/// Path and policy overrides shared by commands that touch the corpus.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON config file (fields: states_file, index_file, pops_dir, buildings_dir, output_dir, collision_policy, rebuild_index)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Master states file declaring each state's owner
    #[arg(long)]
    pub states_file: Option<PathBuf>,
    /// Persisted state index (JSON)
    #[arg(long)]
    pub index_file: Option<PathBuf>,
    /// Directory of pops files
    #[arg(long)]
    pub pops_dir: Option<PathBuf>,
    /// Directory of buildings files
    #[arg(long)]
    pub buildings_dir: Option<PathBuf>,
    /// Output directory for patched copies
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// How to resolve a state declared in two files of one category (overwrite, keep_first)
    #[arg(long)]
    pub collision_policy: Option<CollisionPolicy>,
}

impl ConfigArgs {
    /// Load the config file (or defaults) and apply command-line overrides.
    pub fn resolve(self) -> Result<SwapConfig> {
        let mut config = match &self.config {
            Some(path) => SwapConfig::load(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?,
            None => SwapConfig::default(),
        };

        if let Some(path) = self.states_file {
            config.states_file = path;
        }
        if let Some(path) = self.index_file {
            config.index_file = path;
        }
        if let Some(path) = self.pops_dir {
            config.pops_dir = path;
        }
        if let Some(path) = self.buildings_dir {
            config.buildings_dir = path;
        }
        if let Some(path) = self.output_dir {
            config.output_dir = path;
        }
        if let Some(policy) = self.collision_policy {
            config.collision_policy = policy;
        }

        Ok(config)
    }
}
