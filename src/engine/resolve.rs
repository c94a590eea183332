//! Value resolution.
//!
//! Classification produces `TypedValue`s; resolution turns one into its
//! concrete runtime form on demand:
//!
//! ```text
//! TypedValue ──┬─ Boolean / Integer / Float   -> unwrap payload
//!              ├─ QuotedString / PlainString  -> owned string
//!              └─ Regex                       -> POSIX check + compile (may fail)
//!                                               into a leftmost-longest PosixRegex
//! ```
//!
//! Nothing is cached. Every call compiles a fresh matcher, so two resolutions of
//! the same value hand out two independently owned matchers.

use super::matcher::PosixRegex;
use crate::{ResolutionError, ResolvedValue, TypedValue};

pub(crate) fn resolve_value(value: &TypedValue) -> Result<ResolvedValue, ResolutionError> {
    let resolved = match value {
        TypedValue::Boolean(v) => ResolvedValue::Bool(*v),
        TypedValue::Integer(v) => ResolvedValue::Int(*v),
        TypedValue::Float(v) => ResolvedValue::Float(*v),
        TypedValue::QuotedString { value, .. } | TypedValue::PlainString(value) => ResolvedValue::Str(value.clone()),
        TypedValue::Regex(pattern) => ResolvedValue::Regex(PosixRegex::compile(pattern)?),
    };

    tracing::debug!(kind = %value.kind(), "resolved value");
    Ok(resolved)
}
