//! Coercions between raw token text and typed parameter values.
//!
//! Tokens on a command line are untyped text. A [`Coercion`] is the
//! bidirectional rule that turns that text back into a typed value and a
//! typed value into text, and a [`Typemap`] assigns a coercion to each
//! parameter name. Unlisted names fall back to the map's default, which
//! starts out as [`Coercion::Str`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use jobgrid_core::errors::{ErrorInfo, JobGridError};
use jobgrid_core::job::CallbackError;
use jobgrid_core::value::plain_text;
use serde_json::{Number, Value};

/// Conversion rule between token text and a parameter value.
#[derive(Clone, Default)]
pub enum Coercion {
    /// Pass the text through unchanged.
    #[default]
    Str,
    /// Signed 64-bit integers.
    Int,
    /// Finite 64-bit floats.
    Float,
    /// Exactly the literals `True` and `False`.
    Bool,
    /// A user supplied parser and formatter pair.
    Custom(CustomCoercion),
}

/// Parser and formatter pair backing [`Coercion::Custom`].
#[derive(Clone)]
pub struct CustomCoercion {
    parse: Arc<dyn Fn(&str) -> Result<Value, CallbackError> + Send + Sync>,
    format: Arc<dyn Fn(&Value) -> Result<String, CallbackError> + Send + Sync>,
}

impl Coercion {
    /// Looks up one of the named coercions: `str`, `int`, `float`, `bool`.
    pub fn from_name(name: &str) -> Result<Self, JobGridError> {
        match name {
            "str" => Ok(Coercion::Str),
            "int" => Ok(Coercion::Int),
            "float" => Ok(Coercion::Float),
            "bool" => Ok(Coercion::Bool),
            other => Err(JobGridError::Config(
                ErrorInfo::new("coercion-unknown", "no such named coercion")
                    .with_context("coercion", other)
                    .with_hint("known coercions are str, int, float, bool"),
            )),
        }
    }

    /// Builds a custom coercion from a parser and a formatter.
    ///
    /// Errors returned by either closure are wrapped into a coercion
    /// error naming the parameter, with the original message as hint.
    pub fn custom<P, F>(parse: P, format: F) -> Self
    where
        P: Fn(&str) -> Result<Value, CallbackError> + Send + Sync + 'static,
        F: Fn(&Value) -> Result<String, CallbackError> + Send + Sync + 'static,
    {
        Coercion::Custom(CustomCoercion {
            parse: Arc::new(parse),
            format: Arc::new(format),
        })
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Coercion::Str => "Str",
            Coercion::Int => "Int",
            Coercion::Float => "Float",
            Coercion::Bool => "Bool",
            Coercion::Custom(_) => "Custom(..)",
        })
    }
}

/// Parses raw token text into the value described by the coercion.
pub fn parse_value(name: &str, raw: &str, coercion: &Coercion) -> Result<Value, JobGridError> {
    match coercion {
        Coercion::Str => Ok(Value::String(raw.to_string())),
        Coercion::Int => parse_i64(name, raw).map(Value::from),
        Coercion::Float => parse_f64(name, raw).map(Value::from),
        Coercion::Bool => parse_bool(name, raw).map(Value::from),
        Coercion::Custom(custom) => (custom.parse)(raw)
            .map_err(|err| JobGridError::Coerce(parse_info(name, raw).with_hint(err.to_string()))),
    }
}

/// Formats a value as the token text described by the coercion.
///
/// The built-in coercions reject values of the wrong type instead of
/// silently converting them.
pub fn format_value(
    name: &str,
    value: &Value,
    coercion: &Coercion,
) -> Result<String, JobGridError> {
    match coercion {
        Coercion::Str => Ok(plain_text(value)),
        Coercion::Int => match value.as_i64() {
            Some(number) => Ok(number.to_string()),
            None => Err(format_error(name, value, "value is not an integer")),
        },
        Coercion::Float => match value.as_f64() {
            Some(number) => Ok(float_text(number)),
            None => Err(format_error(name, value, "value is not numeric")),
        },
        Coercion::Bool => match value.as_bool() {
            Some(true) => Ok("True".to_string()),
            Some(false) => Ok("False".to_string()),
            None => Err(format_error(name, value, "value is not a boolean")),
        },
        Coercion::Custom(custom) => (custom.format)(value).map_err(|err| {
            JobGridError::Coerce(
                ErrorInfo::new("coerce-format", "could not format value")
                    .with_context("param", name)
                    .with_context("value", plain_text(value))
                    .with_hint(err.to_string()),
            )
        }),
    }
}

pub(crate) fn parse_i64(name: &str, raw: &str) -> Result<i64, JobGridError> {
    raw.parse::<i64>()
        .map_err(|err| JobGridError::Coerce(parse_info(name, raw).with_hint(err.to_string())))
}

pub(crate) fn parse_u64(name: &str, raw: &str) -> Result<u64, JobGridError> {
    raw.parse::<u64>()
        .map_err(|err| JobGridError::Coerce(parse_info(name, raw).with_hint(err.to_string())))
}

pub(crate) fn parse_f64(name: &str, raw: &str) -> Result<f64, JobGridError> {
    let number = raw
        .parse::<f64>()
        .map_err(|err| JobGridError::Coerce(parse_info(name, raw).with_hint(err.to_string())))?;
    if !number.is_finite() {
        return Err(JobGridError::Coerce(
            parse_info(name, raw).with_hint("float value is not finite"),
        ));
    }
    Ok(number)
}

pub(crate) fn parse_bool(name: &str, raw: &str) -> Result<bool, JobGridError> {
    match raw {
        "True" => Ok(true),
        "False" => Ok(false),
        _ => Err(JobGridError::Coerce(
            parse_info(name, raw).with_hint("expected 'True' or 'False'"),
        )),
    }
}

fn parse_info(name: &str, raw: &str) -> ErrorInfo {
    ErrorInfo::new("coerce-parse", "could not coerce value")
        .with_context("param", name)
        .with_context("value", raw)
}

fn format_error(name: &str, value: &Value, message: &str) -> JobGridError {
    JobGridError::Coerce(
        ErrorInfo::new("coerce-format", message)
            .with_context("param", name)
            .with_context("value", plain_text(value)),
    )
}

/// Renders a float so it stays recognizable as one: the shortest text
/// that parses back to the same value, always with a decimal point or
/// exponent.
fn float_text(number: f64) -> String {
    match Number::from_f64(number) {
        Some(number) => number.to_string(),
        None => number.to_string(),
    }
}

/// Assignment of coercions to parameter names.
#[derive(Debug, Clone, Default)]
pub struct Typemap {
    entries: BTreeMap<String, Coercion>,
    default: Coercion,
}

impl Typemap {
    /// Creates an empty map whose default coercion is [`Coercion::Str`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a coercion to a parameter name.
    pub fn insert(&mut self, name: impl Into<String>, coercion: Coercion) {
        self.entries.insert(name.into(), coercion);
    }

    /// Builder-style variant of [`Typemap::insert`].
    pub fn with(mut self, name: impl Into<String>, coercion: Coercion) -> Self {
        self.insert(name, coercion);
        self
    }

    /// Replaces the fallback coercion used for unlisted names.
    pub fn with_default(mut self, coercion: Coercion) -> Self {
        self.default = coercion;
        self
    }

    /// Returns the coercion for a parameter name, falling back to the
    /// map's default.
    pub fn resolve(&self, name: &str) -> &Coercion {
        self.entries.get(name).unwrap_or(&self.default)
    }
}
