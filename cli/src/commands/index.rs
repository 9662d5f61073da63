use crate::commands::config::ConfigArgs;
use anyhow::{Context, Result};
use clap::Args;
use swap::OwnershipSwap;

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn handle(args: IndexArgs) -> Result<()> {
    let runner = OwnershipSwap::new(args.config.resolve()?);
    let build = runner
        .rebuild_index()
        .context("Failed to build state index")?;

    println!(
        "Indexed {} states and saved to {:?}",
        build.index.len(),
        runner.config().index_file
    );
    if !build.unreadable.is_empty() {
        println!("Skipped {} unreadable files:", build.unreadable.len());
        for path in &build.unreadable {
            println!("  {:?}", path);
        }
    }
    if build.collisions > 0 {
        println!(
            "{} states were declared in more than one file (policy: {})",
            build.collisions,
            runner.config().collision_policy
        );
    }
    Ok(())
}
