use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::index::IndexArgs;
use commands::owners::OwnersArgs;
use commands::patch::PatchArgs;
use commands::swap::SwapArgs;

#[derive(Parser)]
#[command(name = "state-swap")]
#[command(about = "Rewrite state ownership in pops and buildings history files", long_about = None)]
struct Cli {
    /// Log per-file details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the owners from the states file to the pops and buildings files
    Swap(SwapArgs),
    /// Rebuild the state index from the pops and buildings directories
    BuildIndex(IndexArgs),
    /// Set one state's owner in a single file
    Patch(PatchArgs),
    /// List the owners declared in a states file
    Owners(OwnersArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Swap(args) => commands::swap::handle(args)?,
        Commands::BuildIndex(args) => commands::index::handle(args)?,
        Commands::Patch(args) => commands::patch::handle(args)?,
        Commands::Owners(args) => commands::owners::handle(args)?,
    }

    Ok(())
}
