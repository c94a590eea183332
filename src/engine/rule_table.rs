//! Rule table construction.
//!
//! The static side of the classifier: an ordered view over the rule list with
//! per-rule metadata decoded once, so a classification run only compares
//! shape bits and evaluates patterns.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into both `RuleTable::rules` and `RuleTable::metas`;
//!   the two vectors stay aligned.
//! - Table order is rule order. Rule patterns overlap, so the first matching
//!   rule must win and nothing here may reorder rules.

use super::shape::ShapeMask;
use crate::{LiteralKind, Rule};

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

/// Metadata decoded from a rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub name: &'static str,
    pub kind: LiteralKind,
    pub shape: ShapeMask,
}

/// Ordered rule set with decoded metadata.
#[derive(Debug)]
pub struct RuleTable<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
}

impl<'a> RuleTable<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        let rules: Vec<&Rule> = rules.iter().collect();
        let metas = rules
            .iter()
            .map(|r| RuleMeta { name: r.name, kind: r.kind, shape: ShapeMask::from_bits_truncate(r.shape) })
            .collect();

        RuleTable { rules, metas }
    }

    /// Rules admitted by `shape`, in table order.
    pub fn admitted(&self, shape: ShapeMask) -> impl Iterator<Item = RuleId> + '_ {
        self.metas.iter().enumerate().filter(move |(_, meta)| shape.admits(meta.shape)).map(|(id, _)| id)
    }
}
