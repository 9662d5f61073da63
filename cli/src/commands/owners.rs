use anyhow::{Context, Result};
use clap::Args;
use script::parse_ownership;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OwnersArgs {
    /// Master states file
    pub states_file: PathBuf,
    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: OwnersArgs) -> Result<()> {
    let content = fs::read_to_string(&args.states_file)
        .with_context(|| format!("Failed to read states file: {:?}", args.states_file))?;
    let table = parse_ownership(&content)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for (state, owner) in &table {
        println!("{state} {owner}");
    }
    println!("Found {} state ownership entries.", table.len());
    Ok(())
}
