//! Consume-once access to raw `name=value` tokens.

use std::collections::BTreeMap;

use jobgrid_core::errors::{ErrorInfo, JobGridError};
use serde_json::Value;

use crate::coerce::{parse_bool, parse_f64, parse_i64, parse_u64, parse_value, Coercion};

/// Tokens that have been split into name and raw value but not yet
/// interpreted.
///
/// Every read removes its entry, so each argument is consumed exactly
/// once and whatever remains afterwards is surplus. When the same name
/// appears in several tokens the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnparsedArguments {
    args: BTreeMap<String, String>,
}

impl UnparsedArguments {
    /// Splits each token at its first `=` into a name and a raw value.
    ///
    /// A token without `=` is an error naming the offending token.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self, JobGridError> {
        let mut args = BTreeMap::new();
        for token in argv {
            let (name, raw) = split_token(token.as_ref())?;
            args.insert(name.to_string(), raw.to_string());
        }
        Ok(Self { args })
    }

    /// Consumes an argument and parses it with the given coercion.
    pub fn read(&mut self, name: &str, coercion: &Coercion) -> Result<Value, JobGridError> {
        let raw = self.take(name)?;
        parse_value(name, &raw, coercion)
    }

    /// Consumes an argument as verbatim text.
    pub fn read_str(&mut self, name: &str) -> Result<String, JobGridError> {
        self.take(name)
    }

    /// Consumes an argument as a signed integer.
    pub fn read_int(&mut self, name: &str) -> Result<i64, JobGridError> {
        let raw = self.take(name)?;
        parse_i64(name, &raw)
    }

    /// Consumes an argument as an unsigned integer.
    pub fn read_uint(&mut self, name: &str) -> Result<u64, JobGridError> {
        let raw = self.take(name)?;
        parse_u64(name, &raw)
    }

    /// Consumes an argument as a finite float.
    pub fn read_float(&mut self, name: &str) -> Result<f64, JobGridError> {
        let raw = self.take(name)?;
        parse_f64(name, &raw)
    }

    /// Consumes an argument as a `True`/`False` literal.
    pub fn read_bool(&mut self, name: &str) -> Result<bool, JobGridError> {
        let raw = self.take(name)?;
        parse_bool(name, &raw)
    }

    /// True once every argument has been consumed.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Number of arguments not yet consumed.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Names of the arguments not yet consumed, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    /// Fails if any argument was left unconsumed, listing the leftovers.
    pub fn ensure_consumed(&self) -> Result<(), JobGridError> {
        if self.args.is_empty() {
            return Ok(());
        }
        let leftover = self.names().collect::<Vec<_>>().join(", ");
        Err(JobGridError::Argv(
            ErrorInfo::new("args-unused", "arguments were not consumed")
                .with_context("params", leftover),
        ))
    }

    fn take(&mut self, name: &str) -> Result<String, JobGridError> {
        self.args.remove(name).ok_or_else(|| {
            JobGridError::Argv(
                ErrorInfo::new("arg-missing", "expected argument was not provided")
                    .with_context("param", name),
            )
        })
    }
}

pub(crate) fn split_token(token: &str) -> Result<(&str, &str), JobGridError> {
    token.split_once('=').ok_or_else(|| {
        JobGridError::Argv(
            ErrorInfo::new("argv-split", "can't split token into a name=value argument")
                .with_context("token", token),
        )
    })
}
