use crate::engine::{self, AttemptOutcome, ShapeMask};
use crate::{ClassificationError, LiteralKind, ResolutionError, ResolvedValue, Rule, TypedValue};
use once_cell::sync::Lazy;
use std::time::Duration;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::literal::rules::get);

/// Options that affect classification.
///
/// Passed explicitly on every call; the classifier reads no ambient state.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Reject tokens that match no literal rule instead of treating them as
    /// plain strings.
    pub strict: bool,
}

/// One rule as reached by a verbose classification run.
#[derive(Debug, Clone)]
pub struct RuleAttempt {
    /// Rule name, e.g. `"integer"`.
    pub rule: String,
    /// Kind the rule produces.
    pub kind: LiteralKind,
    pub outcome: AttemptOutcome,
    /// Time spent on the pattern and production (zero when skipped).
    pub duration: Duration,
}

/// Additional details returned by [`classify_verbose_with`].
///
/// Meant for debugging argument binding: which rules ran, which were skipped by
/// the shape scan, and which one decided the outcome.
#[derive(Debug, Clone)]
pub struct ClassifyDetails {
    /// Shape signals found in the token.
    pub shape: ShapeMask,
    /// Names of rules the shape admitted, in precedence order.
    pub active_rules: Vec<String>,
    /// Every rule the run reached, in precedence order.
    pub attempts: Vec<RuleAttempt>,
    /// Whether no rule matched and the fallback decided the outcome.
    pub fell_back: bool,
    /// Total elapsed time.
    pub total: Duration,
}

/// Result from [`classify_verbose_with`].
#[derive(Debug, Clone)]
pub struct ClassifyResultVerbose {
    pub token: String,
    pub result: Result<TypedValue, ClassificationError>,
    pub details: ClassifyDetails,
}

/// Classify a single token.
///
/// Rules are tried in order (boolean, float, integer, regex, quoted string);
/// the first match wins. A token no rule matches becomes a plain string, or an
/// error when `strict` is set. A numeric token that overflows is an error in
/// either mode.
///
/// # Example
/// ```
/// use typelit::{Quote, TypedValue, classify};
///
/// assert_eq!(classify("-12", true).unwrap(), TypedValue::Integer(-12));
/// assert_eq!(classify("/a.*b/", true).unwrap(), TypedValue::Regex("a.*b".into()));
/// assert_eq!(classify("'hi'", true).unwrap(), TypedValue::QuotedString { value: "hi".into(), quote: Quote::Single });
/// assert!(classify("plainword", true).is_err());
/// ```
pub fn classify(token: &str, strict: bool) -> Result<TypedValue, ClassificationError> {
    classify_with(token, &Options { strict })
}

/// Classify a single token with explicit [`Options`].
pub fn classify_with(token: &str, options: &Options) -> Result<TypedValue, ClassificationError> {
    engine::Classifier::new(token, &DEFAULT_RULES).run(options)
}

/// Classify `token` and return per-rule diagnostics alongside the outcome.
///
/// The outcome is always the one [`classify_with`] would return.
pub fn classify_verbose_with(token: &str, options: &Options) -> ClassifyResultVerbose {
    let classifier = engine::Classifier::new(token, &DEFAULT_RULES);
    let active_rules = classifier.active_rule_names().into_iter().map(str::to_string).collect();

    let run = classifier.run_with_metrics(options);
    let attempts = run
        .metrics
        .attempts
        .iter()
        .map(|a| RuleAttempt { rule: a.rule.to_string(), kind: a.kind, outcome: a.outcome, duration: a.duration })
        .collect();

    let details = ClassifyDetails {
        shape: run.metrics.shape,
        active_rules,
        attempts,
        fell_back: run.metrics.fell_back,
        total: run.metrics.total,
    };

    ClassifyResultVerbose { token: token.to_string(), result: run.outcome, details }
}

/// Resolve a classified value into its concrete runtime form.
///
/// Only regex values can fail: the pattern must be valid POSIX extended
/// syntax. Every call compiles a new matcher, which reports leftmost-longest
/// matches the way POSIX does.
///
/// # Example
/// ```
/// use typelit::{classify, resolve};
///
/// let value = classify("/ab+c/", false).unwrap();
/// let re = resolve(&value).unwrap().into_regex().unwrap();
/// assert!(re.is_match("xabbbc"));
///
/// let alt = classify("/a|ab/", false).unwrap();
/// let re = resolve(&alt).unwrap().into_regex().unwrap();
/// assert_eq!(re.find("ab").unwrap().as_str(), "ab");
///
/// let broken = classify("/[/", false).unwrap();
/// assert!(resolve(&broken).is_err());
/// ```
pub fn resolve(value: &TypedValue) -> Result<ResolvedValue, ResolutionError> {
    engine::resolve_value(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Quote;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relaxed_classification_is_total(token in "\\PC*") {
            let numeric_shape = regex::Regex::new(r"^-?[0-9]*\.?[0-9]+$").unwrap();
            match classify(&token, false) {
                Ok(_) => {}
                Err(err) => prop_assert!(numeric_shape.is_match(&token), "unexpected {err} for {token:?}"),
            }
        }

        #[test]
        fn classification_is_deterministic(token in "\\PC{0,12}", strict in any::<bool>()) {
            prop_assert_eq!(classify(&token, strict), classify(&token, strict));
        }

        #[test]
        fn integers_round_trip(v in any::<i64>()) {
            let value = TypedValue::Integer(v);
            prop_assert_eq!(classify(&value.render(), false), Ok(value.clone()));
            prop_assert_eq!(classify(&v.to_string(), true), Ok(value));
        }

        #[test]
        fn booleans_round_trip(v in any::<bool>()) {
            let value = TypedValue::Boolean(v);
            prop_assert_eq!(classify(&value.render(), true), Ok(value));
        }

        #[test]
        fn floats_round_trip(whole in -1_000_000_000i64..1_000_000_000, frac in 0u32..1_000_000) {
            let v: f64 = format!("{whole}.{frac:06}").parse().unwrap();
            let value = TypedValue::Float(v);
            prop_assert_eq!(classify(&value.render(), false), Ok(value));
        }

        #[test]
        fn decimal_point_means_float(token in "-?[0-9]{0,6}\\.[0-9]{1,6}") {
            prop_assert!(matches!(classify(&token, true), Ok(TypedValue::Float(_))));
        }

        #[test]
        fn regexes_round_trip(pattern in "[a-z.*+?|()\\[\\]/]{0,10}") {
            let value = TypedValue::Regex(pattern);
            let rendered = format!("/{}/", value.render());
            prop_assert_eq!(classify(&rendered, true), Ok(value));
        }

        #[test]
        fn quoted_strings_keep_flavor(body in "[^\"'\n]{0,12}", single in any::<bool>()) {
            let (token, quote) =
                if single { (format!("'{body}'"), Quote::Single) } else { (format!("\"{body}\""), Quote::Double) };
            let expected = if body.starts_with('/') && body.ends_with('/') && body.len() >= 2 {
                TypedValue::Regex(body[1..body.len() - 1].to_string())
            } else {
                TypedValue::QuotedString { value: body.clone(), quote }
            };
            prop_assert_eq!(classify(&token, true), Ok(expected));
        }
    }
}
