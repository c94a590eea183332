//! Ordered first-match classification.
//!
//! This module is the operational core of the classifier:
//!
//! - Scan the token once for its shape (see `shape.rs`).
//! - Walk the rule table in order, skipping rules the shape rules out.
//! - Evaluate each remaining rule's anchored pattern; the first match wins and
//!   its production builds the value (or fails on numeric overflow).
//! - If nothing matches, fall back to a plain string, or reject the token in
//!   strict mode.
//!
//! ```text
//! token ── ShapeMask::scan ──┐
//!                            v
//!   boolean ─> float ─> integer ─> regex ─> quoted ─> fallback
//!      │         │         │         │        │          │
//!      └─────────┴─────────┴─────────┴────────┴── first match wins
//! ```
//!
//! Rule order is load-bearing: a float must be tried before an integer and a
//! delimited regex before a quoted string, since their patterns overlap.

use super::metrics::{AttemptMetrics, AttemptOutcome, RunMetrics, RunResult};
use super::rule_table::{RuleId, RuleTable};
use super::shape::ShapeMask;
use crate::{ClassificationError, Options, Rule, TypedValue};
use std::time::{Duration, Instant};

/// Classifies one token against a rule table.
///
/// Usage: create with `Classifier::new(token, &rules)` then call `run(options)`.
#[derive(Debug)]
pub struct Classifier<'a> {
    token: &'a str,
    shape: ShapeMask,
    table: RuleTable<'a>,
}

impl<'a> Classifier<'a> {
    /// Create a new `Classifier` for `token` using a prepared table.
    pub fn new_with_table(token: &'a str, table: RuleTable<'a>) -> Self {
        let shape = ShapeMask::scan(token);
        Classifier { token, shape, table }
    }

    pub fn new(token: &'a str, rules: &'a [Rule]) -> Self {
        Self::new_with_table(token, RuleTable::new(rules))
    }

    /// Names of the rules the shape scan admits, in table order.
    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        self.table.admitted(self.shape).map(|id| self.table.metas[id].name).collect()
    }

    /// Try a single rule. `None` means its pattern did not match.
    fn apply(&self, id: RuleId) -> Option<Result<TypedValue, ClassificationError>> {
        let rule = self.table.rules[id];
        let caps = rule.pattern.captures(self.token)?;
        Some((rule.production)(&caps))
    }

    fn fallback(&self, options: &Options) -> Result<TypedValue, ClassificationError> {
        if options.strict {
            Err(ClassificationError::Unrecognized { token: self.token.to_string() })
        } else {
            Ok(TypedValue::PlainString(self.token.to_string()))
        }
    }

    /// Classify the token.
    pub fn run(&self, options: &Options) -> Result<TypedValue, ClassificationError> {
        for id in self.table.admitted(self.shape) {
            if let Some(outcome) = self.apply(id) {
                log_outcome(self.token, self.table.metas[id].name, &outcome);
                return outcome;
            }
            tracing::trace!(token = self.token, rule = self.table.metas[id].name, "rule did not match");
        }

        let outcome = self.fallback(options);
        log_outcome(self.token, "fallback", &outcome);
        outcome
    }

    /// Like [`Classifier::run`], recording every rule the run reached.
    pub fn run_with_metrics(&self, options: &Options) -> RunResult {
        let run_start = Instant::now();
        let mut metrics = RunMetrics { shape: self.shape, ..RunMetrics::default() };

        for (id, meta) in self.table.metas.iter().enumerate() {
            if !self.shape.admits(meta.shape) {
                metrics.attempts.push(AttemptMetrics {
                    rule: meta.name,
                    kind: meta.kind,
                    outcome: AttemptOutcome::Skipped,
                    duration: Duration::ZERO,
                });
                continue;
            }

            let start = Instant::now();
            let applied = self.apply(id);
            let outcome = if applied.is_some() { AttemptOutcome::Matched } else { AttemptOutcome::NoMatch };
            metrics.attempts.push(AttemptMetrics { rule: meta.name, kind: meta.kind, outcome, duration: start.elapsed() });

            if let Some(result) = applied {
                log_outcome(self.token, meta.name, &result);
                metrics.total = run_start.elapsed();
                return RunResult { outcome: result, metrics };
            }
        }

        let outcome = self.fallback(options);
        log_outcome(self.token, "fallback", &outcome);
        metrics.fell_back = true;
        metrics.total = run_start.elapsed();
        RunResult { outcome, metrics }
    }
}

fn log_outcome(token: &str, rule: &str, outcome: &Result<TypedValue, ClassificationError>) {
    match outcome {
        Ok(value) => tracing::debug!(token, rule, kind = %value.kind(), "classified token"),
        Err(err) => tracing::debug!(token, rule, error = %err, "token rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LiteralKind;
    use crate::rules::literal;

    #[test]
    fn metrics_record_skips_and_winner() {
        let rules = literal::rules::get();
        let classifier = Classifier::new("42", &rules);
        let run = classifier.run_with_metrics(&Options::default());

        assert_eq!(run.outcome, Ok(TypedValue::Integer(42)));
        assert!(!run.metrics.fell_back);

        let last = run.metrics.attempts.last().unwrap();
        assert_eq!(last.kind, LiteralKind::Integer);
        assert_eq!(last.outcome, AttemptOutcome::Matched);

        // Float needs a dot and is skipped without evaluating its pattern.
        let float = run.metrics.attempts.iter().find(|a| a.kind == LiteralKind::Float).unwrap();
        assert_eq!(float.outcome, AttemptOutcome::Skipped);
    }

    #[test]
    fn metrics_cover_every_rule_on_fallback() {
        let rules = literal::rules::get();
        let classifier = Classifier::new("plainword", &rules);
        let run = classifier.run_with_metrics(&Options { strict: true });

        assert!(run.outcome.is_err());
        assert!(run.metrics.fell_back);
        assert_eq!(run.metrics.attempts.len(), rules.len());
        assert!(run.metrics.attempts.iter().all(|a| a.outcome != AttemptOutcome::Matched));
    }

    #[test]
    fn run_and_run_with_metrics_agree() {
        let rules = literal::rules::get();
        for token in ["true", "-1.25", "7", "/x/", "'q'", "bare", "", "1.2.3"] {
            let classifier = Classifier::new(token, &rules);
            let opts = Options::default();
            assert_eq!(classifier.run(&opts), classifier.run_with_metrics(&opts).outcome, "token {token:?}");
        }
    }

    #[test]
    fn active_rules_follow_shape() {
        let rules = literal::rules::get();
        let names = Classifier::new("word", &rules).active_rule_names();
        assert_eq!(names, vec!["boolean"]);
    }
}
