use regex::{Captures, Regex};
use std::fmt;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod value;

pub use api::{
    ClassifyDetails, ClassifyResultVerbose, Options, RuleAttempt, classify, classify_verbose_with, classify_with,
    resolve,
};
pub use engine::{AttemptOutcome, PosixMatch, PosixRegex, ShapeMask};
pub use error::{ClassificationError, PosixError, ResolutionError};
pub use value::{Quote, ResolvedValue, TypedValue};

// --- Literal kinds ----------------------------------------------------------

/// The closed set of literal kinds a token can be classified as.
///
/// Listed in the order the classifier tries them; [`LiteralKind::PlainString`]
/// is the fallback and has no rule of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Boolean,
    Float,
    Integer,
    Regex,
    QuotedString,
    PlainString,
}

impl LiteralKind {
    /// Lowercase name used in diagnostics, e.g. `"integer"` or `"regex"`.
    pub fn name(self) -> &'static str {
        match self {
            LiteralKind::Boolean => "boolean",
            LiteralKind::Float => "float",
            LiteralKind::Integer => "integer",
            LiteralKind::Regex => "regex",
            LiteralKind::QuotedString => "quoted string",
            LiteralKind::PlainString => "string",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Rules ------------------------------------------------------------------

/// Turns the captures of an anchored rule pattern into a value.
///
/// Capture group 0 always spans the whole token, so productions can report
/// the token in their errors without it being passed separately.
pub(crate) type Production = Box<dyn Fn(&Captures<'_>) -> Result<TypedValue, ClassificationError> + Send + Sync>;

/// A classification rule: a name, the kind it produces, one anchored regex
/// and a `production` that builds the value from the regex captures.
///
/// A pattern match only proves the token's shape; the production may still
/// reject it (numeric overflow, non-finite floats).
pub(crate) struct Rule {
    pub name: &'static str,
    pub kind: LiteralKind,
    /// Anchored pattern, stored as a static reference created by `regex!`.
    pub pattern: &'static Regex,
    /// Shape bits the token must carry before the pattern is even tried.
    pub shape: u32,
    pub production: Production,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .field("shape", &self.shape)
            .finish()
    }
}
