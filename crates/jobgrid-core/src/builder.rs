//! Incremental construction of cartesian-product job spaces.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{ErrorInfo, JobGridError};
use crate::job::{CallbackError, Job, JobCallback, JobParams};

/// Builder that accumulates named parameter lists and expands them into
/// the cartesian product of all registered values.
///
/// Parameters are kept sorted by name. During expansion the first name in
/// sort order varies slowest and the last varies fastest, so two builders
/// fed the same lists always enumerate jobs in the same order, regardless
/// of registration order.
#[derive(Debug, Clone, Default)]
pub struct JobBuilder {
    param_lists: BTreeMap<String, Vec<Value>>,
}

impl JobBuilder {
    /// Creates a builder with no parameters registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an explicit list of values for a parameter.
    ///
    /// Returns the stored values. Registering the same name twice is an
    /// error and leaves the first registration untouched.
    pub fn add<I, V>(
        &mut self,
        name: impl Into<String>,
        values: I,
    ) -> Result<&[Value], JobGridError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.register(name.into(), values)
    }

    /// Registers evenly strided values covering `start..=end`.
    ///
    /// Values are `start + n * stride` for `n = 0, 1, 2, ...` while the
    /// result does not exceed `end`. Because of float rounding the last
    /// value may land slightly short of a mathematically exact endpoint;
    /// `add_range("x", 0.0, 0.3, 0.1)` stores `[0.0, 0.1, 0.2]` since
    /// three strides overshoot `0.3` by a rounding error.
    pub fn add_range(
        &mut self,
        name: impl Into<String>,
        start: f64,
        end: f64,
        stride: f64,
    ) -> Result<&[Value], JobGridError> {
        let name = name.into();
        ensure_finite(
            "range-nonfinite",
            &name,
            &[("start", start), ("end", end), ("stride", stride)],
        )?;
        if start >= end {
            return Err(bounds_error("range-bounds", &name, start, end));
        }
        if stride <= 0.0 {
            return Err(JobGridError::Config(
                ErrorInfo::new("range-stride", "stride must be positive")
                    .with_context("param", name)
                    .with_context("stride", stride.to_string()),
            ));
        }

        let mut values = Vec::new();
        let mut n = 0u64;
        loop {
            let value = start + n as f64 * stride;
            if value > end {
                break;
            }
            values.push(Value::from(value));
            n += 1;
        }
        self.register(name, values)
    }

    /// Registers `num` evenly spaced values from `start` to `stop`, both
    /// endpoints included.
    ///
    /// The stride is `(stop - start) / (num - 1)`; the last value may
    /// differ from `stop` by float rounding.
    pub fn add_linspace(
        &mut self,
        name: impl Into<String>,
        start: f64,
        stop: f64,
        num: usize,
    ) -> Result<&[Value], JobGridError> {
        let name = name.into();
        ensure_finite("linspace-nonfinite", &name, &[("start", start), ("stop", stop)])?;
        if start >= stop {
            return Err(bounds_error("linspace-bounds", &name, start, stop));
        }
        if num < 2 {
            return Err(JobGridError::Config(
                ErrorInfo::new("linspace-count", "num must be at least 2 to include start and stop")
                    .with_context("param", name)
                    .with_context("num", num.to_string()),
            ));
        }

        let stride = (stop - start) / (num - 1) as f64;
        let values = (0..num)
            .map(|n| Value::from(start + n as f64 * stride))
            .collect();
        self.register(name, values)
    }

    /// Number of parameter combinations the current lists expand to.
    ///
    /// This is the product of the list lengths, so an empty builder
    /// reports one job (the empty parameter set) and any empty list
    /// collapses the whole space to zero.
    pub fn number_of_jobs(&self) -> usize {
        self.param_lists
            .values()
            .fold(1, |product, values| product.saturating_mul(values.len()))
    }

    /// Expands the registered lists into the full job space.
    ///
    /// Every parameter combination gets `repetitions` jobs sharing the
    /// same `job_id` with repetition ids `0..repetitions`. All jobs share
    /// the given callback, and each owns its own copy of the parameters.
    pub fn build<F>(self, callback: F, repetitions: usize) -> Result<Vec<Job>, JobGridError>
    where
        F: Fn(&JobParams) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        if repetitions < 1 {
            return Err(JobGridError::Config(
                ErrorInfo::new("repetitions", "at least one repetition is required")
                    .with_context("repetitions", repetitions.to_string()),
            ));
        }

        let lists: Vec<(String, Vec<Value>)> = self.param_lists.into_iter().collect();
        let mut combos = Vec::new();
        expand_grid(&lists, 0, JobParams::new(), &mut combos);

        let callback: JobCallback = Arc::new(callback);
        let mut jobs = Vec::with_capacity(combos.len().saturating_mul(repetitions));
        for (job_id, params) in combos.into_iter().enumerate() {
            for repetition_id in 0..repetitions {
                jobs.push(Job::from_shared(
                    job_id as u64,
                    repetition_id as u64,
                    Arc::clone(&callback),
                    params.clone(),
                ));
            }
        }
        Ok(jobs)
    }

    fn register(&mut self, name: String, values: Vec<Value>) -> Result<&[Value], JobGridError> {
        match self.param_lists.entry(name) {
            Entry::Occupied(entry) => Err(JobGridError::Config(
                ErrorInfo::new("param-redefined", "parameter is already registered")
                    .with_context("param", entry.key().clone()),
            )),
            Entry::Vacant(entry) => Ok(entry.insert(values)),
        }
    }
}

fn expand_grid(
    lists: &[(String, Vec<Value>)],
    idx: usize,
    current: JobParams,
    outputs: &mut Vec<JobParams>,
) {
    if idx == lists.len() {
        outputs.push(current);
        return;
    }
    let (name, values) = &lists[idx];
    for value in values {
        let mut next = current.clone();
        next.insert(name.clone(), value.clone());
        expand_grid(lists, idx + 1, next, outputs);
    }
}

fn ensure_finite(code: &str, name: &str, fields: &[(&str, f64)]) -> Result<(), JobGridError> {
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(JobGridError::Config(
                ErrorInfo::new(code, "bounds must be finite")
                    .with_context("param", name)
                    .with_context(*field, value.to_string()),
            ));
        }
    }
    Ok(())
}

fn bounds_error(code: &str, name: &str, start: f64, end: f64) -> JobGridError {
    JobGridError::Config(
        ErrorInfo::new(code, "start must be smaller than end")
            .with_context("param", name)
            .with_context("start", start.to_string())
            .with_context("end", end.to_string()),
    )
}
