//! Classification and resolution engine.
//!
//! The engine is split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! rules (all)  ──┐
//!               │  RuleTable::new                 (rule_table.rs)
//!               └───────────────┬──────────────
//!                               │
//! token ── ShapeMask::scan ─────┼─ admit rules by required shape
//!         (shape.rs)            │
//!                               v
//!                     Classifier::run (classifier.rs)
//!                       - rules in table order
//!                       - first anchored match wins
//!                       - fallback: plain string / strict rejection
//!                               │
//!                               v
//!                          TypedValue  ── held by the caller ──┐
//!                                                              v
//!                                         resolve_value (resolve.rs)
//!                                           - unwrap scalars and strings
//!                                           - POSIX check (posix.rs) + compile
//!                                             into PosixRegex (matcher.rs)
//! ```
//!
//! Classification and resolution are separate steps: a value is classified
//! once and resolved later, possibly never.
//!
//! ## Responsibilities by module
//!
//! - `rule_table.rs`: ordered view of the rules with decoded metadata.
//! - `shape.rs`: one-pass token scan used to skip rules that cannot match.
//! - `classifier.rs`: ordered first-match classification and fallback.
//! - `resolve.rs`: per-variant resolution; regex compilation.
//! - `posix.rs`: POSIX ERE dialect checking and translation for `regex`.
//! - `matcher.rs`: leftmost-longest matching over the translated pattern.
//! - `metrics.rs`: opt-in per-rule timing for diagnostics.
//!
//! ## Adding a literal kind
//!
//! - Add a `LiteralKind` and a `TypedValue` variant; the compiler then points
//!   at every `match` that needs the new arm (rendering, resolution).
//! - Add a rule under `src/rules/**` at the right position in `get()`.
//! - If the rule has a cheap necessary condition, give it a `ShapeMask` bit.
//!
//! ## Debugging
//!
//! Rule attempts are logged at `trace` level and outcomes at `debug` level
//! through `tracing`; the CLI honours `RUST_LOG`.

#[path = "engine/classifier.rs"]
mod classifier;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/posix.rs"]
mod posix;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/rule_table.rs"]
mod rule_table;
#[path = "engine/shape.rs"]
mod shape;

pub use classifier::Classifier;
pub use matcher::{PosixMatch, PosixRegex};
pub use metrics::AttemptOutcome;
pub(crate) use resolve::resolve_value;
pub use shape::ShapeMask;
