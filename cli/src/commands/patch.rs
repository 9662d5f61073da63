use anyhow::{Context, Result};
use clap::Args;
use script::{OwnerCode, StateId};
use std::path::PathBuf;
use swap::swap_file;

#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Pops or buildings file to patch
    #[arg(short, long)]
    pub input: PathBuf,
    /// State whose block is rewritten (e.g. STATE_SVEALAND)
    #[arg(short, long)]
    pub state: StateId,
    /// New owner tag (e.g. SWE)
    #[arg(long)]
    pub owner: OwnerCode,
    /// Output file (must differ from the input)
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn handle(args: PatchArgs) -> Result<()> {
    let patched = swap_file(&args.input, &args.output, &args.state, args.owner)
        .with_context(|| format!("Failed to patch {:?}", args.input))?;

    if !patched.found {
        println!("{}: block not found in {:?}", args.state, args.input);
    } else if patched.changed {
        println!("{}: ownership set to {} in {:?}", args.state, args.owner, args.output);
    } else {
        println!("{}: already owned by {}", args.state, args.owner);
    }
    Ok(())
}
