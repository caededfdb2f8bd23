//! POSIX shell quoting for generated command lines.

use jobgrid_core::errors::JobGridError;
use jobgrid_core::job::Job;

use crate::codec::{argv_from_job, JobArgvConfig};
use crate::coerce::Typemap;

/// Quotes one token for a POSIX shell.
///
/// Tokens made of unambiguous characters pass through unchanged; empty
/// tokens become `''`; everything else is wrapped in single quotes with
/// embedded quotes spliced as `'\''`.
pub fn quote(token: &str) -> String {
    if token.is_empty() {
        return "''".to_string();
    }
    if token.bytes().all(is_safe_byte) {
        return token.to_string();
    }
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('\'');
    for ch in token.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'-' | b'+' | b'_' | b'=' | b'!' | b'.' | b'/' | b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
    )
}

/// Renders a job as one runnable shell command line.
///
/// The command prefix is taken verbatim (it may carry its own arguments
/// and shell syntax); each generated token is quoted individually.
pub fn shell_command_from_job(
    command: &str,
    job: &Job,
    typemap: &Typemap,
    config: &JobArgvConfig,
) -> Result<String, JobGridError> {
    let argv = argv_from_job(job, typemap, config)?;
    let mut line = String::from(command);
    for token in &argv {
        line.push(' ');
        line.push_str(&quote(token));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::quote;

    #[test]
    fn safe_tokens_pass_through() {
        assert_eq!(quote("foo"), "foo");
        assert_eq!(quote("--id=42"), "--id=42");
        assert_eq!(quote("a=0.5"), "a=0.5");
        assert_eq!(quote("path/to/file.txt"), "path/to/file.txt");
    }

    #[test]
    fn empty_tokens_become_empty_quotes() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn unsafe_tokens_are_single_quoted() {
        assert_eq!(quote("foo bar"), "'foo bar'");
        assert_eq!(quote("a=$HOME"), "'a=$HOME'");
        assert_eq!(quote("semi;colon"), "'semi;colon'");
    }

    #[test]
    fn embedded_single_quotes_are_spliced() {
        assert_eq!(quote("foo'bar'baz"), "'foo'\\''bar'\\''baz'");
        assert_eq!(quote("'"), "''\\'''");
    }
}
