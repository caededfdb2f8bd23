use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde_json::{json, Value};
use serde_yaml::from_str;

use crate::plan::SweepPlan;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// YAML sweep plan describing the job space.
    #[arg(long)]
    pub plan: PathBuf,
}

pub fn run(args: &CountArgs) -> Result<(), Box<dyn Error>> {
    let plan_text = fs::read_to_string(&args.plan)?;
    let plan: SweepPlan = from_str(&plan_text)?;
    let summary = summarize(&plan)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Sizes the job space without materializing any job.
pub fn summarize(plan: &SweepPlan) -> Result<Value, Box<dyn Error>> {
    let builder = plan.builder()?;
    let combinations = builder.number_of_jobs();
    Ok(json!({
        "parameters": plan.parameters.len(),
        "combinations": combinations,
        "repetitions": plan.repetitions,
        "total_jobs": combinations.saturating_mul(plan.repetitions),
    }))
}
