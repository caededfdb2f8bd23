//! Typed command-line codec between jobgrid jobs and argv token lists.

mod codec;
mod coerce;
mod cursor;
mod shell;

pub use codec::{argv_from_job, job_from_argv, JobArgvConfig, SEPARATOR};
pub use coerce::{format_value, parse_value, Coercion, CustomCoercion, Typemap};
pub use cursor::UnparsedArguments;
pub use shell::{quote, shell_command_from_job};
