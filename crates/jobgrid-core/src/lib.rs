#![deny(missing_docs)]
#![doc = "Job-space construction for parameter sweeps: cartesian products of named parameter lists, expanded into identified, repeatable jobs."]

pub mod builder;
pub mod errors;
pub mod job;
pub mod value;

pub use builder::JobBuilder;
pub use errors::{ErrorInfo, JobGridError};
pub use job::{CallbackError, Job, JobCallback, JobParams, JobResult};
pub use value::{plain_text, type_name};
