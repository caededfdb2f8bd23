//! YAML sweep plans consumed by the CLI.

use std::collections::BTreeMap;

use jobgrid_argv::JobArgvConfig;
use jobgrid_core::{JobBuilder, JobGridError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative description of a sweep: the worker command, how often to
/// repeat each parameter set, and the parameter lists to cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub command: String,
    #[serde(default = "SweepPlan::default_repetitions")]
    pub repetitions: usize,
    #[serde(default)]
    pub argv: JobArgvConfig,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamSpec>,
}

impl SweepPlan {
    const fn default_repetitions() -> usize {
        1
    }

    /// Registers every declared parameter on a fresh builder.
    pub fn builder(&self) -> Result<JobBuilder, JobGridError> {
        let mut builder = JobBuilder::new();
        for (name, spec) in &self.parameters {
            match spec {
                ParamSpec::Values { values } => {
                    builder.add(name.clone(), values.iter().cloned())?;
                }
                ParamSpec::Range { start, end, stride } => {
                    builder.add_range(name.clone(), *start, *end, *stride)?;
                }
                ParamSpec::Linspace { start, stop, num } => {
                    builder.add_linspace(name.clone(), *start, *stop, *num)?;
                }
            }
        }
        Ok(builder)
    }
}

/// One parameter's candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamSpec {
    Values {
        values: Vec<Value>,
    },
    Range {
        start: f64,
        end: f64,
        stride: f64,
    },
    Linspace {
        start: f64,
        stop: f64,
        num: usize,
    },
}
