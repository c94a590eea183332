use crate::{ClassificationError, Quote};
use regex::Captures;

/// The whole token (capture group 0 of an anchored pattern).
pub fn whole<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(0).map_or("", |m| m.as_str())
}

/// Capture group `i`, or `""` when the group did not participate.
pub fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Parse a base-10 integer that already matched `-?[0-9]+`.
pub fn parse_integer(token: &str) -> Result<i64, ClassificationError> {
    token.parse::<i64>().map_err(|source| ClassificationError::InvalidInteger { token: token.to_string(), source })
}

/// Parse a decimal that already matched `-?[0-9]*\.[0-9]+`.
///
/// Such text is always valid `f64` syntax, but `f64::from_str` saturates to
/// infinity on overflow instead of failing, so non-finite results are rejected.
pub fn parse_float(token: &str) -> Result<f64, ClassificationError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ClassificationError::FloatOutOfRange { token: token.to_string() }),
    }
}

/// Quote flavor of a token that matched a quoted-string pattern.
pub fn leading_quote(token: &str) -> Quote {
    token.chars().next().and_then(Quote::from_char).unwrap_or(Quote::Unquoted)
}
