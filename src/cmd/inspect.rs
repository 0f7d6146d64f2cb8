use crate::reports;
use clap::Args;
use skinstric::config::ReviewConfig;
use skinstric::error::SkResult;
use skinstric::payload::parse_demographics;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: ReviewConfig,

    /// Classifier response to analyse (JSON file).
    #[arg(short, long)]
    pub payload: String,
}

pub fn run(args: &InspectArgs, config: &ReviewConfig) -> SkResult<()> {
    info!("Inspecting payload: {}", args.payload);
    let raw = fs::read_to_string(&args.payload)?;
    let parsed = parse_demographics(&raw, config)?;
    reports::print_extraction(&parsed);
    Ok(())
}
