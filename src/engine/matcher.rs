//! Leftmost-longest matching for POSIX patterns.
//!
//! `regex` reports leftmost-first matches: among the matches starting at the
//! leftmost position it picks the one its alternation order prefers. POSIX
//! picks the longest one instead, so `/a|ab/` finds `ab` in "ab". The two
//! agree on where the match starts, so a search runs in two steps:
//!
//! ```text
//! haystack ── regex (leftmost-first) ──> start
//!          └─ lazy DFA, MatchKind::All, anchored at start ──> longest end
//! ```
//!
//! A DFA built with `MatchKind::All` keeps running past its first match state
//! and reports the last one it saw, which is the longest match from `start`.

use super::posix;
use crate::ResolutionError;
use regex::{Regex, RegexBuilder};
use regex_automata::hybrid::dfa::{Cache, DFA};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchKind};
use std::fmt;
use std::ops::Range;

/// A compiled POSIX extended regular expression.
///
/// `^` and `$` match at line boundaries, `.` and negated brackets never match
/// a newline, and every search reports the leftmost-longest match.
#[derive(Clone)]
pub struct PosixRegex {
    pattern: String,
    leftmost: Regex,
    longest: DFA,
}

/// A match found by [`PosixRegex`], borrowed from the searched haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosixMatch<'h> {
    haystack: &'h str,
    start: usize,
    end: usize,
}

impl<'h> PosixMatch<'h> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.range()]
    }
}

impl PosixRegex {
    /// Check `pattern` against the ERE dialect and compile it.
    pub(crate) fn compile(pattern: &str) -> Result<Self, ResolutionError> {
        let translated = posix::translate(pattern).map_err(|source| {
            tracing::debug!(pattern, error = %source, "pattern outside POSIX ERE dialect");
            ResolutionError::Syntax { pattern: pattern.to_string(), source }
        })?;

        tracing::trace!(pattern, translated = %translated, "compiling regex");
        let leftmost = RegexBuilder::new(&translated)
            .multi_line(true)
            .build()
            .map_err(|source| ResolutionError::Compile { pattern: pattern.to_string(), source })?;
        let longest = DFA::builder()
            .syntax(syntax::Config::new().multi_line(true))
            .configure(DFA::config().match_kind(MatchKind::All))
            .build(&translated)
            .map_err(|source| ResolutionError::Automaton { pattern: pattern.to_string(), source })?;

        Ok(PosixRegex { pattern: pattern.to_string(), leftmost, longest })
    }

    /// The pattern text as written, before translation.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.leftmost.is_match(haystack)
    }

    /// The leftmost-longest match in `haystack`.
    pub fn find<'h>(&self, haystack: &'h str) -> Option<PosixMatch<'h>> {
        self.find_at(haystack, 0)
    }

    /// Like [`PosixRegex::find`], but starts looking at byte offset `start`.
    /// Anchors still see the text before `start`.
    pub fn find_at<'h>(&self, haystack: &'h str, start: usize) -> Option<PosixMatch<'h>> {
        self.search(&mut self.longest.create_cache(), haystack, start)
    }

    /// Every successive non-overlapping match. An empty match directly after
    /// the previous match is skipped, so `/a*/` on "baaab" yields "", "aaa"
    /// and a final "" at the end.
    pub fn find_iter<'r, 'h>(&'r self, haystack: &'h str) -> impl Iterator<Item = PosixMatch<'h>> + 'r
    where
        'h: 'r,
    {
        let mut cache = self.longest.create_cache();
        let mut at = 0;
        let mut last_end: Option<usize> = None;

        std::iter::from_fn(move || {
            while at <= haystack.len() {
                let m = self.search(&mut cache, haystack, at)?;
                let accept = !(m.is_empty() && last_end == Some(m.start));
                at = if m.is_empty() { m.end + haystack[m.end..].chars().next().map_or(1, char::len_utf8) } else { m.end };
                last_end = Some(m.end);
                if accept {
                    return Some(m);
                }
            }
            None
        })
    }

    fn search<'h>(&self, cache: &mut Cache, haystack: &'h str, start: usize) -> Option<PosixMatch<'h>> {
        let first = self.leftmost.find_at(haystack, start)?;
        let input = Input::new(haystack).range(first.start()..).anchored(Anchored::Yes);

        let end = match self.longest.try_search_fwd(cache, &input) {
            Ok(Some(half)) => half.offset().max(first.end()),
            Ok(None) => first.end(),
            Err(err) => {
                tracing::debug!(pattern = %self.pattern, error = %err, "longest-match search gave up");
                first.end()
            }
        };
        Some(PosixMatch { haystack, start: first.start(), end })
    }
}

impl fmt::Debug for PosixRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PosixRegex").field(&self.pattern).finish()
    }
}

impl fmt::Display for PosixRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(pattern: &str) -> PosixRegex {
        PosixRegex::compile(pattern).unwrap_or_else(|err| panic!("{pattern:?}: {err}"))
    }

    fn span(pattern: &str, haystack: &str) -> Option<(usize, usize)> {
        compile(pattern).find(haystack).map(|m| (m.start(), m.end()))
    }

    /// `(pattern, haystack, is_match, leftmost-longest span)`. Expected values
    /// are what Go's `regexp.CompilePOSIX(pattern).FindStringIndex(haystack)`
    /// reports.
    const REFERENCE: &[(&str, &str, bool, Option<(usize, usize)>)] = &[
        // Alternation picks the longest branch, not the first.
        ("a|ab", "ab", true, Some((0, 2))),
        ("ab|a", "ab", true, Some((0, 2))),
        ("(a|ab)(c|bcd)", "abcd", true, Some((0, 4))),
        ("x(a|ab)*", "xabab", true, Some((0, 5))),
        ("(a+|b+)*c", "aabbc", true, Some((0, 5))),
        ("foo|foobar", "xfoobar", true, Some((1, 7))),
        ("(|a)+", "aa", true, Some((0, 2))),
        ("a*", "baaa", true, Some((0, 0))),
        // Stacked repetition.
        ("a*?", "aaa", true, Some((0, 3))),
        ("a**", "aab", true, Some((0, 2))),
        ("a{2}{2}", "aaaaa", true, Some((0, 4))),
        ("a{2}{2}", "aaa", false, None),
        ("(ab)+?c", "ababc", true, Some((0, 5))),
        ("ba+?", "baaa", true, Some((0, 4))),
        // Newlines: `.` and negated brackets exclude them, anchors are per line.
        ("a.b", "a\nb", false, None),
        ("a[^x]b", "a\nb", false, None),
        ("a[^x]b", "a-b", true, Some((0, 3))),
        ("[^a]+", "b\nc", true, Some((0, 1))),
        ("a\\nb", "a\nb", true, Some((0, 3))),
        ("a[[:space:]]b", "a\nb", true, Some((0, 3))),
        ("^b", "a\nb", true, Some((2, 3))),
        ("a$", "a\nb", true, Some((0, 1))),
        ("^$", "a\n\nb", true, Some((2, 2))),
        // Brackets and escapes.
        ("[a-]+", "a-a-x", true, Some((0, 4))),
        ("[[:a]+", ":a[x", true, Some((0, 3))),
        ("a\\ b", "xa b", true, Some((1, 4))),
        ("[]a]+", "a]]b", true, Some((0, 3))),
        ("\\<a\\>", "<a>", true, Some((0, 3))),
        ("x{,2}", "x{,2}", true, Some((0, 5))),
    ];

    #[test]
    fn matches_agree_with_posix_reference() {
        for &(pattern, haystack, is_match, expected) in REFERENCE {
            let re = compile(pattern);
            assert_eq!(re.is_match(haystack), is_match, "{pattern:?} is_match {haystack:?}");
            assert_eq!(re.find(haystack).map(|m| (m.start(), m.end())), expected, "{pattern:?} find {haystack:?}");
        }
    }

    #[test]
    fn match_text_and_range() {
        let re = compile("a|ab");
        let m = re.find("xxab").unwrap();
        assert_eq!(m.as_str(), "ab");
        assert_eq!(m.range(), 2..4);
        assert!(!m.is_empty());
    }

    #[test]
    fn find_at_keeps_line_context() {
        let re = compile("^b+");
        assert_eq!(re.find_at("abb\nbb", 1), Some(PosixMatch { haystack: "abb\nbb", start: 4, end: 6 }));
        assert_eq!(span("^b+", "abb"), None);
    }

    #[test]
    fn find_iter_skips_empty_match_after_previous() {
        let re = compile("a*");
        let spans: Vec<_> = re.find_iter("baaab").map(|m| m.range()).collect();
        assert_eq!(spans, vec![0..0, 1..4, 5..5]);

        let re = compile("a|ab");
        let found: Vec<_> = re.find_iter("ab a ab").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["ab", "a", "ab"]);
    }

    #[test]
    fn find_iter_steps_over_multibyte_characters() {
        let re = compile("x*");
        let spans: Vec<_> = re.find_iter("éx").map(|m| m.range()).collect();
        assert_eq!(spans, vec![0..0, 2..3]);
    }

    #[test]
    fn keeps_pattern_as_written() {
        let re = compile(r"\101+");
        assert_eq!(re.as_str(), r"\101+");
        assert_eq!(re.to_string(), r"\101+");
        assert_eq!(format!("{re:?}"), r#"PosixRegex("\\101+")"#);
    }
}
