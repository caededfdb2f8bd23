//! Encoding jobs as argv token lists and decoding them back.
//!
//! The wire layout is a metadata section, a separator, and one
//! `name=value` token per parameter in sorted name order:
//!
//! ```text
//! --id=42 --rep=3 -- a=42 b=True c=foo
//! ```
//!
//! The metadata keys are configurable through [`JobArgvConfig`] so the
//! tokens can coexist with a worker's own argument conventions.

use jobgrid_core::errors::{ErrorInfo, JobGridError};
use jobgrid_core::job::{CallbackError, Job, JobParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::{format_value, Typemap};
use crate::cursor::UnparsedArguments;

/// Token separating job metadata from job parameters.
pub const SEPARATOR: &str = "--";

/// Names of the metadata tokens carrying a job's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobArgvConfig {
    /// Key of the job id token.
    #[serde(default = "JobArgvConfig::default_job_id_key")]
    pub job_id_key: String,
    /// Key of the repetition id token.
    #[serde(default = "JobArgvConfig::default_repetition_id_key")]
    pub repetition_id_key: String,
}

impl JobArgvConfig {
    fn default_job_id_key() -> String {
        "--id".to_string()
    }

    fn default_repetition_id_key() -> String {
        "--rep".to_string()
    }
}

impl Default for JobArgvConfig {
    fn default() -> Self {
        Self {
            job_id_key: Self::default_job_id_key(),
            repetition_id_key: Self::default_repetition_id_key(),
        }
    }
}

/// Encodes a job as argv tokens: metadata, separator, then parameters.
///
/// Parameters appear in sorted name order, each formatted through the
/// typemap. Names that cannot survive the token syntax (empty, equal to
/// the separator, or containing `=`) are rejected.
pub fn argv_from_job(
    job: &Job,
    typemap: &Typemap,
    config: &JobArgvConfig,
) -> Result<Vec<String>, JobGridError> {
    let mut argv = Vec::with_capacity(job.params().len() + 3);
    argv.push(format!("{}={}", config.job_id_key, job.job_id()));
    argv.push(format!("{}={}", config.repetition_id_key, job.repetition_id()));
    argv.push(SEPARATOR.to_string());
    for (name, value) in job.params() {
        ensure_encodable_name(name)?;
        let text = format_value(name, value, typemap.resolve(name))?;
        argv.push(format!("{name}={text}"));
    }
    Ok(argv)
}

/// Decodes argv tokens produced by [`argv_from_job`] back into a job.
///
/// The metadata section must contain exactly the two configured keys;
/// anything else before the separator is an error listing the unexpected
/// keys. Parameter tokens after the separator are parsed through the
/// typemap, and a name appearing twice keeps its last value.
pub fn job_from_argv<S, F>(
    argv: &[S],
    callback: F,
    typemap: &Typemap,
    config: &JobArgvConfig,
) -> Result<Job, JobGridError>
where
    S: AsRef<str>,
    F: Fn(&JobParams) -> Result<Value, CallbackError> + Send + Sync + 'static,
{
    let separator = argv
        .iter()
        .position(|token| token.as_ref() == SEPARATOR)
        .ok_or_else(|| {
            JobGridError::Argv(
                ErrorInfo::new("argv-separator", "no argument separator found")
                    .with_context("separator", SEPARATOR),
            )
        })?;

    let mut meta = UnparsedArguments::from_argv(&argv[..separator])?;
    let job_id = meta.read_uint(&config.job_id_key)?;
    let repetition_id = meta.read_uint(&config.repetition_id_key)?;
    if !meta.is_empty() {
        let keys = meta.names().collect::<Vec<_>>().join(", ");
        return Err(JobGridError::Argv(
            ErrorInfo::new("meta-unexpected", "unexpected meta arguments")
                .with_context("params", keys),
        ));
    }

    let mut unparsed = UnparsedArguments::from_argv(&argv[separator + 1..])?;
    let names: Vec<String> = unparsed.names().map(str::to_string).collect();
    let mut params = JobParams::new();
    for name in names {
        let value = unparsed.read(&name, typemap.resolve(&name))?;
        params.insert(name, value);
    }

    Ok(Job::new(job_id, repetition_id, callback, params))
}

fn ensure_encodable_name(name: &str) -> Result<(), JobGridError> {
    if name.is_empty() || name == SEPARATOR || name.contains('=') {
        return Err(JobGridError::Argv(
            ErrorInfo::new("param-name", "parameter name cannot be encoded as a token")
                .with_context("param", name),
        ));
    }
    Ok(())
}
