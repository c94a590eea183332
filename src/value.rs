//! Classified literal values and their resolved forms.

use crate::{ClassificationError, LiteralKind, PosixRegex, ResolutionError};
use std::fmt;
use std::str::FromStr;

/// The quote character that originally delimited a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `"…"`
    Double,
    /// `'…'`
    Single,
    /// No quoting was present (bare words).
    Unquoted,
}

impl Quote {
    /// The quote character, or `None` for [`Quote::Unquoted`].
    pub fn as_char(self) -> Option<char> {
        match self {
            Quote::Double => Some('"'),
            Quote::Single => Some('\''),
            Quote::Unquoted => None,
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Quote::Double),
            '\'' => Some(Quote::Single),
            _ => None,
        }
    }
}

/// A literal classified from a single token.
///
/// Values are immutable and compare by payload: two tokens classified the
/// same way are equal. Regex values hold only the pattern text; a matcher is
/// compiled fresh by every call to [`TypedValue::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Pattern text with the `/…/` delimiters (and any wrapping quote) stripped.
    Regex(String),
    QuotedString {
        value: String,
        quote: Quote,
    },
    /// A bare word, produced only when strict mode is off.
    PlainString(String),
}

impl TypedValue {
    pub fn kind(&self) -> LiteralKind {
        match self {
            TypedValue::Boolean(_) => LiteralKind::Boolean,
            TypedValue::Integer(_) => LiteralKind::Integer,
            TypedValue::Float(_) => LiteralKind::Float,
            TypedValue::Regex(_) => LiteralKind::Regex,
            TypedValue::QuotedString { .. } => LiteralKind::QuotedString,
            TypedValue::PlainString(_) => LiteralKind::PlainString,
        }
    }

    /// Quote flavor for string values; `None` for every other kind.
    pub fn quote(&self) -> Option<Quote> {
        match self {
            TypedValue::QuotedString { quote, .. } => Some(*quote),
            TypedValue::PlainString(_) => Some(Quote::Unquoted),
            _ => None,
        }
    }

    /// Render the value back to text.
    ///
    /// Floats use fixed notation with six fractional digits. String values are
    /// rendered bare: quotes are never re-added, so a rendered quoted string
    /// re-classifies as a plain string (or something more specific).
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Resolve into a concrete runtime value. See [`crate::resolve`].
    pub fn resolve(&self) -> Result<ResolvedValue, ResolutionError> {
        crate::resolve(self)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(v) => write!(f, "{v}"),
            TypedValue::Integer(v) => write!(f, "{v}"),
            TypedValue::Float(v) => write!(f, "{v:.6}"),
            TypedValue::Regex(pattern) => f.write_str(pattern),
            TypedValue::QuotedString { value, .. } | TypedValue::PlainString(value) => f.write_str(value),
        }
    }
}

/// Parses with strict mode off, so only numeric overflow can fail.
impl FromStr for TypedValue {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::classify(s, false)
    }
}

/// The concrete runtime form of a [`TypedValue`].
///
/// A resolved regex is owned by the caller alone; resolving the same value
/// twice yields two independent matchers.
#[derive(Debug, Clone)]
pub enum ResolvedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Regex(PosixRegex),
}

impl ResolvedValue {
    /// Kind of the resolved value. Both string kinds resolve to `Str`, so this
    /// reports [`LiteralKind::PlainString`] for them.
    pub fn kind(&self) -> LiteralKind {
        match self {
            ResolvedValue::Bool(_) => LiteralKind::Boolean,
            ResolvedValue::Int(_) => LiteralKind::Integer,
            ResolvedValue::Float(_) => LiteralKind::Float,
            ResolvedValue::Str(_) => LiteralKind::PlainString,
            ResolvedValue::Regex(_) => LiteralKind::Regex,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ResolvedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResolvedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&PosixRegex> {
        match self {
            ResolvedValue::Regex(re) => Some(re),
            _ => None,
        }
    }

    /// Take ownership of the compiled matcher.
    pub fn into_regex(self) -> Option<PosixRegex> {
        match self {
            ResolvedValue::Regex(re) => Some(re),
            _ => None,
        }
    }
}
