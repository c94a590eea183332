//! Error types for classification and resolution.
//!
//! Both error kinds are recoverable: callers are expected to report them back
//! to whoever typed the token rather than abort.

use std::num::ParseIntError;
use thiserror::Error;

/// A token could not be turned into a [`TypedValue`](crate::TypedValue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// Strict mode is on and the token matched no literal rule.
    #[error("unrecognized literal: {token:?}")]
    Unrecognized { token: String },

    /// The token is shaped like an integer but does not fit in an `i64`.
    #[error("invalid integer literal {token:?}: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// The token is shaped like a float but its magnitude is not representable.
    /// Every token the float rule admits is valid `f64` syntax, so this is the
    /// only way a float literal fails.
    #[error("float literal {token:?} is out of range")]
    FloatOutOfRange { token: String },
}

impl ClassificationError {
    /// The offending token.
    pub fn token(&self) -> &str {
        match self {
            ClassificationError::Unrecognized { token }
            | ClassificationError::InvalidInteger { token, .. }
            | ClassificationError::FloatOutOfRange { token } => token,
        }
    }
}

/// A classified value could not be resolved. Only regex values can fail.
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
    /// The pattern uses syntax outside the POSIX extended dialect.
    #[error("invalid regular expression {pattern:?}: {source}")]
    Syntax {
        pattern: String,
        #[source]
        source: PosixError,
    },

    /// The regex engine rejected the translated pattern.
    #[error("invalid regular expression {pattern:?}: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The longest-match automaton could not be built for the pattern.
    #[error("invalid regular expression {pattern:?}: {source}")]
    Automaton {
        pattern: String,
        #[source]
        source: regex_automata::hybrid::BuildError,
    },
}

impl ResolutionError {
    /// The pattern text that failed to compile.
    pub fn pattern(&self) -> &str {
        match self {
            ResolutionError::Syntax { pattern, .. }
            | ResolutionError::Compile { pattern, .. }
            | ResolutionError::Automaton { pattern, .. } => pattern,
        }
    }
}

/// A POSIX extended regular expression dialect violation.
///
/// `offset` is the byte offset into the pattern where the problem starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosixError {
    #[error("invalid escape sequence `{escape}` at offset {offset}")]
    InvalidEscape { escape: String, offset: usize },

    #[error("trailing backslash at end of expression")]
    TrailingBackslash,

    #[error("unsupported group syntax `(?` at offset {offset}")]
    UnsupportedGroup { offset: usize },

    #[error("missing argument to repetition operator `{op}` at offset {offset}")]
    MissingRepeatArgument { op: String, offset: usize },

    #[error("invalid repeat count `{op}` at offset {offset}")]
    InvalidRepeatCount { op: String, offset: usize },

    #[error("unexpected `)` at offset {offset}")]
    UnexpectedParen { offset: usize },

    #[error("missing closing `)`")]
    MissingParen,

    #[error("missing closing `]` for bracket expression at offset {offset}")]
    MissingBracket { offset: usize },

    /// A `-` inside a bracket expression that is neither first, last, nor
    /// part of a range, as in `[a-c-e]`.
    #[error("invalid character class range `{range}` at offset {offset}")]
    InvalidClassRange { range: String, offset: usize },

    #[error("unknown character class `[:{name}:]` at offset {offset}")]
    UnknownClass { name: String, offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_error_reports_token() {
        let err = ClassificationError::Unrecognized { token: "plainword".to_string() };
        assert_eq!(err.token(), "plainword");
        assert_eq!(err.to_string(), "unrecognized literal: \"plainword\"");
    }

    #[test]
    fn integer_error_keeps_parse_source() {
        let source = "99999999999999999999".parse::<i64>().unwrap_err();
        let err = ClassificationError::InvalidInteger { token: "99999999999999999999".to_string(), source };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid integer literal"));
    }

    #[test]
    fn class_range_error_names_the_range() {
        let err = PosixError::InvalidClassRange { range: "-e".to_string(), offset: 4 };
        assert_eq!(err.to_string(), "invalid character class range `-e` at offset 4");
    }

    #[test]
    fn resolution_error_carries_posix_detail() {
        let err = ResolutionError::Syntax {
            pattern: r"\d+".to_string(),
            source: PosixError::InvalidEscape { escape: r"\d".to_string(), offset: 0 },
        };
        assert_eq!(err.pattern(), r"\d+");
        assert_eq!(err.to_string(), r#"invalid regular expression "\\d+": invalid escape sequence `\d` at offset 0"#);
    }
}
