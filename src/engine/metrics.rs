//! Classification run metrics.
//!
//! `Classifier::run` is the normal path and records nothing. Diagnostics go
//! through `Classifier::run_with_metrics`, which records one `AttemptMetrics`
//! per rule in table order, including rules skipped by the shape pre-filter.

use super::shape::ShapeMask;
use crate::{ClassificationError, LiteralKind, TypedValue};
use std::time::Duration;

/// What happened when the classifier reached a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
    /// The token's shape ruled the rule out; its pattern was not evaluated.
    Skipped,
    /// The pattern was evaluated and did not match.
    NoMatch,
    /// The pattern matched and the rule's production ran (it may still have failed).
    Matched,
}

/// One rule as seen by a single run.
#[derive(Debug, Clone)]
pub struct AttemptMetrics {
    pub rule: &'static str,
    pub kind: LiteralKind,
    pub outcome: AttemptOutcome,
    /// Time spent evaluating the pattern and production.
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Classifier::run_with_metrics`](super::Classifier::run_with_metrics).
    pub total: Duration,
    /// Signals found by the shape scan.
    pub shape: ShapeMask,
    /// Per-rule attempts, in table order, up to and including the winning rule.
    pub attempts: Vec<AttemptMetrics>,
    /// Whether the fallback (plain string or strict rejection) was reached.
    pub fell_back: bool,
}

/// Classifier output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: Result<TypedValue, ClassificationError>,
    pub metrics: RunMetrics,
}
