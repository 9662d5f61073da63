use crate::commands::config::ConfigArgs;
use anyhow::{Context, Result};
use clap::Args;
use swap::{OwnershipSwap, SwapReport, SwapStatus};

#[derive(Args, Debug)]
pub struct SwapArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Ignore the persisted index and rebuild it
    #[arg(long)]
    pub rebuild_index: bool,
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: SwapArgs) -> Result<()> {
    let mut config = args.config.resolve()?;
    config.rebuild_index |= args.rebuild_index;

    let report = OwnershipSwap::new(config)
        .run()
        .context("Ownership swap failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SwapReport) {
    for outcome in &report.outcomes {
        match outcome.status {
            SwapStatus::Patched => {
                for file in &outcome.files {
                    println!("{}: owner set to {} in {:?}", outcome.state, outcome.owner, file);
                }
            }
            SwapStatus::NotFound => println!("{}: block not found in indexed files", outcome.state),
            SwapStatus::Unreadable => println!("{}: indexed files could not be read", outcome.state),
            SwapStatus::Skipped => println!("{}: not found in state index, skipping", outcome.state),
            SwapStatus::Unchanged => {}
        }
    }

    for path in &report.unreadable_files {
        println!("Unreadable file skipped: {:?}", path);
    }

    println!(
        "Ownership swap completed: {} states, {} patched, {} unchanged, {} not found, {} unreadable, {} skipped, {} files staged{}",
        report.outcomes.len(),
        report.count(SwapStatus::Patched),
        report.count(SwapStatus::Unchanged),
        report.count(SwapStatus::NotFound),
        report.count(SwapStatus::Unreadable),
        report.count(SwapStatus::Skipped),
        report.staged_files,
        if report.index_rebuilt { " (index rebuilt)" } else { "" },
    );
}
