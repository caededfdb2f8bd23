//! Job entities produced by expanding a parameter space.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::Value;

use crate::value::plain_text;

/// Parameter set handed to a job callback, keyed by parameter name.
pub type JobParams = BTreeMap<String, Value>;

/// Error type produced by job callbacks.
///
/// Callbacks run arbitrary user code, so their failures are carried as
/// boxed errors and passed through to the caller untouched.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared work function invoked with a job's parameters.
pub type JobCallback = Arc<dyn Fn(&JobParams) -> Result<Value, CallbackError> + Send + Sync>;

/// A single unit of work: one parameter set plus the identity that locates
/// it inside the job space.
///
/// `job_id` numbers the parameter combinations and `repetition_id` numbers
/// the repeated runs of one combination, both starting at zero. Jobs are
/// cheap to clone since the callback is shared.
#[derive(Clone)]
pub struct Job {
    job_id: u64,
    repetition_id: u64,
    callback: JobCallback,
    params: JobParams,
}

impl Job {
    /// Creates a job from its identity, work function and parameters.
    pub fn new<F>(job_id: u64, repetition_id: u64, callback: F, params: JobParams) -> Self
    where
        F: Fn(&JobParams) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        Self::from_shared(job_id, repetition_id, Arc::new(callback), params)
    }

    pub(crate) fn from_shared(
        job_id: u64,
        repetition_id: u64,
        callback: JobCallback,
        params: JobParams,
    ) -> Self {
        Self {
            job_id,
            repetition_id,
            callback,
            params,
        }
    }

    /// Position of this job's parameter combination within the job space.
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Which repetition of the parameter combination this job is.
    pub fn repetition_id(&self) -> u64 {
        self.repetition_id
    }

    /// The job's parameters, keyed by name.
    pub fn params(&self) -> &JobParams {
        &self.params
    }

    /// Runs the job, consuming it so it cannot be executed twice.
    ///
    /// The callback's return value is wrapped together with the job into a
    /// [`JobResult`]; a callback error is returned unchanged.
    pub fn run(self) -> Result<JobResult, CallbackError> {
        let result = (self.callback)(&self.params)?;
        Ok(JobResult { job: self, result })
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("job_id", &self.job_id)
            .field("repetition_id", &self.repetition_id)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.job_id, self.repetition_id)?;
        for (name, value) in &self.params {
            write!(f, " {}={}", name, plain_text(value))?;
        }
        Ok(())
    }
}

/// Outcome of a completed job: the job itself plus the callback's value.
#[derive(Debug, Clone)]
pub struct JobResult {
    job: Job,
    result: Value,
}

impl JobResult {
    /// The job that produced this result.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// The value returned by the job callback.
    pub fn result(&self) -> &Value {
        &self.result
    }

    /// Decomposes the result into the job and the callback value.
    pub fn into_parts(self) -> (Job, Value) {
        (self.job, self.result)
    }
}
