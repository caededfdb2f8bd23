use std::error::Error;
use std::fmt::Write as _;

use clap::Args;
use jobgrid_argv::{job_from_argv, Coercion, JobArgvConfig, Typemap};
use jobgrid_core::{plain_text, type_name, JobParams};
use serde_json::Value;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Per-parameter coercions as name=coercion pairs (str, int, float, bool).
    #[arg(long = "types", value_delimiter = ',')]
    pub types: Vec<String>,
    /// Metadata key carrying the job id.
    #[arg(long, default_value = "--id")]
    pub id_key: String,
    /// Metadata key carrying the repetition id.
    #[arg(long, default_value = "--rep")]
    pub rep_key: String,
    /// Job argv tokens, exactly as a worker would receive them.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub tokens: Vec<String>,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    print!("{}", describe(args)?);
    Ok(())
}

/// Decodes the tokens and renders one line per parameter with its type.
pub fn describe(args: &ShowArgs) -> Result<String, Box<dyn Error>> {
    let mut typemap = Typemap::new();
    for entry in &args.types {
        let (name, coercion) = entry
            .split_once('=')
            .ok_or_else(|| format!("invalid --types entry '{entry}', expected name=coercion"))?;
        typemap.insert(name, Coercion::from_name(coercion)?);
    }
    let config = JobArgvConfig {
        job_id_key: args.id_key.clone(),
        repetition_id_key: args.rep_key.clone(),
    };

    let job = job_from_argv(&args.tokens, |_: &JobParams| Ok(Value::Null), &typemap, &config)?;
    let mut out = format!("job {} repetition {}\n", job.job_id(), job.repetition_id());
    for (name, value) in job.params() {
        writeln!(out, "{}: {} = {}", name, type_name(value), plain_text(value))?;
    }
    Ok(out)
}
