//! Token shape scanning (pre-classification).
//!
//! Before any rule pattern runs, the token is scanned once for a handful of
//! cheap structural signals. Each rule declares the signals it cannot match
//! without, and the classifier skips rules whose requirements are not met.
//!
//! ## Design notes
//!
//! - Shape bits are *necessary* conditions only. A rule that is not skipped
//!   still has to match its full anchored pattern, so the scan can never change
//!   which rule wins; it only saves regex evaluations.
//! - All signals are ASCII byte checks; the literal grammar is ASCII-only.
//!
//! ## Extension points
//!
//! - Adding a new signal: add a `ShapeMask` bit, detect it in `ShapeMask::scan`,
//!   and reference it from the rules that need it. Keep it a necessary
//!   condition of those rules' patterns.

bitflags::bitflags! {
    /// Coarse structural signals detected in a token.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShapeMask: u32 {
        /// At least one ASCII digit.
        const HAS_DIGITS = 1 << 0;
        /// At least one `.`.
        const HAS_DOT    = 1 << 1;
        /// At least one `/`.
        const HAS_SLASH  = 1 << 2;
        /// First character is `"` or `'`.
        const QUOTED     = 1 << 3;
    }
}

impl ShapeMask {
    /// Scan `token` for its shape signals.
    pub fn scan(token: &str) -> Self {
        let mut shape = ShapeMask::empty();
        let bytes = token.as_bytes();

        if bytes.iter().any(|b| b.is_ascii_digit()) {
            shape |= ShapeMask::HAS_DIGITS;
        }
        if bytes.contains(&b'.') {
            shape |= ShapeMask::HAS_DOT;
        }
        if bytes.contains(&b'/') {
            shape |= ShapeMask::HAS_SLASH;
        }
        if matches!(bytes.first(), Some(b'"' | b'\'')) {
            shape |= ShapeMask::QUOTED;
        }

        tracing::trace!(token, ?shape, "scanned token shape");
        shape
    }

    /// Whether a rule requiring `required` may match a token of this shape.
    pub fn admits(self, required: ShapeMask) -> bool {
        self.contains(required)
    }
}
