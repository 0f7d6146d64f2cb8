use clap::Args;
use skinstric::cache::SessionCache;
use skinstric::error::{SkResult, SkinstricError};
use skinstric::intake::IntakeFlow;

#[derive(Args, Debug, Clone)]
pub struct IntakeArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub location: String,
}

pub fn run(args: &IntakeArgs, cache_path: &str) -> SkResult<()> {
    let mut flow = IntakeFlow::new();

    flow.set_input(args.name.as_str());
    flow.submit()?;

    flow.set_input(args.location.as_str());
    let submission = flow.submit()?.ok_or_else(|| {
        SkinstricError::Validation("Intake did not reach the location step".to_string())
    })?;

    let mut cache = SessionCache::open(cache_path)?;
    submission.record(&mut cache);
    cache.save()?;

    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}
