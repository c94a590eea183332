use super::helpers::{group, leading_quote, parse_float, parse_integer, whole};
use crate::engine::ShapeMask;
use crate::{ClassificationError, LiteralKind, Rule, TypedValue};

/// Rule matching the boolean literals (case-sensitive).
fn rule_boolean() -> Rule {
    rule! {
        name: "boolean",
        kind: LiteralKind::Boolean,
        pattern: r"^(true|false)$",
        prod: |caps: &Captures| -> Result<TypedValue, ClassificationError> {
            Ok(TypedValue::Boolean(group(caps, 1) == "true"))
        },
    }
}

/// Rule matching decimals with a mandatory point: `1.5`, `-0.25`, `.5`.
///
/// Must run before the integer rule.
fn rule_float() -> Rule {
    rule! {
        name: "float",
        kind: LiteralKind::Float,
        pattern: r"^-?[0-9]*\.[0-9]+$",
        shape: (ShapeMask::HAS_DIGITS | ShapeMask::HAS_DOT).bits(),
        prod: |caps: &Captures| -> Result<TypedValue, ClassificationError> {
            parse_float(whole(caps)).map(TypedValue::Float)
        },
    }
}

/// Rule matching base-10 integers with an optional leading minus.
fn rule_integer() -> Rule {
    rule! {
        name: "integer",
        kind: LiteralKind::Integer,
        pattern: r"^-?[0-9]+$",
        shape: ShapeMask::HAS_DIGITS.bits(),
        prod: |caps: &Captures| -> Result<TypedValue, ClassificationError> {
            parse_integer(whole(caps)).map(TypedValue::Integer)
        },
    }
}

/// Rule matching `/pattern/`, optionally wrapped in one quote character on
/// either side (`"/x/"`, `'/x/'`).
///
/// Must run before the quoted-string rule, which would otherwise capture the
/// wrapped form.
fn rule_regex() -> Rule {
    rule! {
        name: "regex",
        kind: LiteralKind::Regex,
        pattern: r#"^["']?/(.*)/["']?$"#,
        shape: ShapeMask::HAS_SLASH.bits(),
        prod: |caps: &Captures| -> Result<TypedValue, ClassificationError> {
            Ok(TypedValue::Regex(group(caps, 1).to_string()))
        },
    }
}

/// Rule matching a string wrapped in a matching pair of `"` or `'`.
fn rule_quoted_string() -> Rule {
    rule! {
        name: "quoted string",
        kind: LiteralKind::QuotedString,
        pattern: r#"^(?:"(.*)"|'(.*)')$"#,
        shape: ShapeMask::QUOTED.bits(),
        prod: |caps: &Captures| -> Result<TypedValue, ClassificationError> {
            let value = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            Ok(TypedValue::QuotedString { value: value.to_string(), quote: leading_quote(whole(caps)) })
        },
    }
}

/// The classification rules in precedence order. First match wins.
pub fn get() -> Vec<Rule> {
    vec![rule_boolean(), rule_float(), rule_integer(), rule_regex(), rule_quoted_string()]
}
