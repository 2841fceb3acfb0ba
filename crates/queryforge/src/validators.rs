//! Structural validators applied to every loosely-typed input before it is
//! accepted into the document model. These are independent of the schema;
//! schema-aware checks live in [`coerce`](crate::coerce).

use crate::error::EngineError;
use crate::error::Result;

/// Ceiling on any single string value accepted into an argument.
pub const MAX_STRING_LENGTH: usize = 8192;

/// Ceiling on the value of any pagination-style argument.
pub const MAX_PAGINATION_VALUE: i64 = 1000;

/// Argument names treated as pagination bounds.
pub const PAGINATION_ARGUMENTS: [&str; 6] =
    ["first", "last", "limit", "offset", "skip", "take"];

/// True if `name` matches the GraphQL `Name` grammar:
/// `[_A-Za-z][_0-9A-Za-z]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {},
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

/// Validate a field/fragment/type/argument/directive name, reporting the
/// kind of name in the error message.
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(EngineError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

/// Validate a variable name, which must carry its leading `$` sigil.
pub fn validate_variable_name(name: &str) -> Result<()> {
    match name.strip_prefix('$') {
        Some(rest) if is_valid_name(rest) => Ok(()),
        _ => Err(EngineError::InvalidName {
            kind: "variable",
            name: name.to_string(),
        }),
    }
}

/// Reject oversized strings and strings carrying control characters other
/// than tab/newline/carriage-return.
pub fn validate_string_value(value: &str) -> Result<()> {
    if value.len() > MAX_STRING_LENGTH {
        return Err(EngineError::InvalidValue {
            reason: format!(
                "string length {} exceeds the maximum of {MAX_STRING_LENGTH}",
                value.len(),
            ),
        });
    }
    if let Some(ch) = value.chars().find(
        |ch| ch.is_control() && !matches!(ch, '\t' | '\n' | '\r'),
    ) {
        return Err(EngineError::InvalidValue {
            reason: format!(
                "string contains forbidden control character U+{:04X}",
                ch as u32,
            ),
        });
    }
    Ok(())
}

/// Enforce the pagination ceiling for arguments named among
/// [`PAGINATION_ARGUMENTS`]. Non-pagination arguments pass unchecked.
pub fn validate_pagination_value(argument_name: &str, value: i64) -> Result<()> {
    if !PAGINATION_ARGUMENTS.contains(&argument_name) {
        return Ok(());
    }
    if value > MAX_PAGINATION_VALUE {
        return Err(EngineError::InvalidValue {
            reason: format!(
                "pagination argument `{argument_name}` value {value} exceeds \
                the maximum of {MAX_PAGINATION_VALUE}",
            ),
        });
    }
    Ok(())
}
