use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use jobgrid_argv::{shell_command_from_job, Typemap};
use jobgrid_core::JobParams;
use serde_json::Value;
use serde_yaml::from_str;

use crate::plan::SweepPlan;

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// YAML sweep plan describing the job space.
    #[arg(long)]
    pub plan: PathBuf,
    /// Write command lines here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ExpandArgs) -> Result<(), Box<dyn Error>> {
    let plan_text = fs::read_to_string(&args.plan)?;
    let plan: SweepPlan = from_str(&plan_text)?;
    let lines = expand_lines(&plan)?;
    match &args.out {
        Some(path) => {
            let mut text = lines.join("\n");
            text.push('\n');
            fs::write(path, text)?;
        }
        None => {
            for line in &lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Renders one runnable command line per job in the plan's job space.
pub fn expand_lines(plan: &SweepPlan) -> Result<Vec<String>, Box<dyn Error>> {
    let jobs = plan
        .builder()?
        .build(|_: &JobParams| Ok(Value::Null), plan.repetitions)?;
    let typemap = Typemap::new();
    let mut lines = Vec::with_capacity(jobs.len());
    for job in &jobs {
        lines.push(shell_command_from_job(&plan.command, job, &typemap, &plan.argv)?);
    }
    Ok(lines)
}
