//! POSIX extended regular expression dialect.
//!
//! The `regex` crate speaks a Perl-flavoured superset of ERE. Patterns typed
//! into commands are held to the ERE dialect: Perl-only syntax is rejected, and
//! the few constructs the two dialects read differently are rewritten so the
//! compiled matcher behaves the way ERE reads the text.
//!
//! ```text
//! ERE text                          handling
//! \d \w \s \b \A \z \p{..} ...      rejected (invalid escape)
//! (?i) (?:..) (?P<n>..)             rejected
//! \1 .. \9 (alone)                  rejected (backreference)
//! [a-c-e]                           rejected (`-` inside a bracket outside a range)
//! a** a*? a{2}{3}                   stacked: (?:a*)* (?:a*)? (?:a{2}){3}
//! \0 \012 \101                      octal, emitted as \x{..}
//! \xHH \x{HHHH}                     hex, emitted as \x{..}
//! \<space> \<control>               the character itself, emitted as \x{..}
//! \< \>                             literal < > (word boundaries in `regex`)
//! a{  }  {,3}                       literal braces
//! [^..]                             [^\n..] (a negated bracket never matches newline)
//! [ or [: inside a bracket          literal (nested class in `regex`)
//! && ~~ -- inside brackets          literal (set operators in `regex`)
//! ```
//!
//! Repeat bounds are capped at 1000.

use crate::PosixError;

const MAX_REPEAT: u32 = 1000;

const POSIX_CLASSES: &[&str] = &[
    "alnum", "alpha", "ascii", "blank", "cntrl", "digit", "graph", "lower", "print", "punct", "space", "upper", "word",
    "xdigit",
];

/// Check `pattern` against the ERE dialect and rewrite it for `regex`.
pub(crate) fn translate(pattern: &str) -> Result<String, PosixError> {
    Translator::new(pattern).run()
}

struct Translator<'p> {
    pattern: &'p str,
    chars: Vec<(usize, char)>,
    pos: usize,
    out: String,
}

impl<'p> Translator<'p> {
    fn new(pattern: &'p str) -> Self {
        Translator {
            pattern,
            chars: pattern.char_indices().collect(),
            pos: 0,
            out: String::with_capacity(pattern.len()),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn offset(&self, idx: usize) -> usize {
        self.chars.get(idx).map(|&(o, _)| o).unwrap_or(self.pattern.len())
    }

    fn run(mut self) -> Result<String, PosixError> {
        // Where (in `out`) the item a repetition operator would apply to starts,
        // and whether that item already carries an operator.
        let mut operand: Option<usize> = None;
        let mut repeated = false;
        let mut groups: Vec<usize> = Vec::new();

        while let Some(c) = self.peek() {
            let offset = self.offset(self.pos);
            let start = self.out.len();
            self.pos += 1;

            match c {
                '*' | '+' | '?' => {
                    self.repeat(&c.to_string(), offset, operand, repeated)?;
                    repeated = true;
                    continue;
                }
                '{' => match self.bound() {
                    Some((text, min, max)) => {
                        if min > MAX_REPEAT || max.is_some_and(|max| max > MAX_REPEAT || max < min) {
                            return Err(PosixError::InvalidRepeatCount { op: text, offset });
                        }
                        self.repeat(&text, offset, operand, repeated)?;
                        repeated = true;
                        continue;
                    }
                    None => self.out.push_str(r"\{"),
                },
                '}' | ']' => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                '(' => {
                    if self.peek() == Some('?') {
                        return Err(PosixError::UnsupportedGroup { offset });
                    }
                    groups.push(start);
                    self.out.push('(');
                    operand = None;
                    repeated = false;
                    continue;
                }
                ')' => {
                    let Some(open) = groups.pop() else {
                        return Err(PosixError::UnexpectedParen { offset });
                    };
                    self.out.push(')');
                    operand = Some(open);
                    repeated = false;
                    continue;
                }
                '|' => {
                    self.out.push('|');
                    operand = None;
                    repeated = false;
                    continue;
                }
                '[' => self.bracket(offset)?,
                '\\' => self.escape(offset)?,
                _ => self.out.push(c),
            }
            operand = Some(start);
            repeated = false;
        }

        if !groups.is_empty() {
            return Err(PosixError::MissingParen);
        }
        Ok(self.out)
    }

    /// Apply repetition `op` to the item starting at `operand`. Operators stack
    /// (`a**` is `(a*)*`, `a*?` is `(a*)?`), but `regex` reads a second operator
    /// as a syntax error or a laziness flag, so a repeated item is grouped first.
    fn repeat(&mut self, op: &str, offset: usize, operand: Option<usize>, repeated: bool) -> Result<(), PosixError> {
        let Some(start) = operand else {
            return Err(PosixError::MissingRepeatArgument { op: op.to_string(), offset });
        };
        if repeated {
            self.out.insert_str(start, "(?:");
            self.out.push(')');
        }
        self.out.push_str(op);
        Ok(())
    }

    /// Parse a `{n}`, `{n,}` or `{n,m}` bound right after a `{`. Leaves the
    /// position untouched and returns `None` if the text is not a bound.
    fn bound(&mut self) -> Option<(String, u32, Option<u32>)> {
        let start = self.pos;
        let min = self.digits();
        let result = min.and_then(|min| match self.peek() {
            Some('}') => {
                self.pos += 1;
                Some((min, Some(min)))
            }
            Some(',') => {
                self.pos += 1;
                let max = self.digits();
                if self.peek() == Some('}') {
                    self.pos += 1;
                    Some((min, max))
                } else {
                    None
                }
            }
            _ => None,
        });

        match result {
            Some((min, max)) => {
                let text: String = std::iter::once('{').chain(self.chars[start..self.pos].iter().map(|&(_, c)| c)).collect();
                Some((text, min, max))
            }
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// Consume a run of ASCII digits. Saturates instead of overflowing, which
    /// still trips the repeat-count cap.
    fn digits(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
            self.pos += 1;
        }
        value
    }

    /// Translate the escape whose backslash sits at `offset`.
    fn escape(&mut self, offset: usize) -> Result<(), PosixError> {
        let Some(e) = self.peek() else {
            return Err(PosixError::TrailingBackslash);
        };
        self.pos += 1;

        match e {
            'a' | 'f' | 'n' | 'r' | 't' | 'v' => {
                self.out.push('\\');
                self.out.push(e);
            }
            'x' => {
                let value = self.hex().filter(|&v| v <= u32::from(char::MAX));
                let Some(value) = value else {
                    let escape = self.pattern[offset..self.offset(self.pos)].to_string();
                    return Err(PosixError::InvalidEscape { escape, offset });
                };
                self.out.push_str(&format!("\\x{{{value:X}}}"));
            }
            '0'..='7' => {
                let is_octal = |c: Option<char>| c.is_some_and(|c| c.is_digit(8));
                if e != '0' && !is_octal(self.peek()) {
                    return Err(PosixError::InvalidEscape { escape: format!("\\{e}"), offset });
                }
                let mut value = e.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                self.out.push_str(&format!("\\x{{{value:X}}}"));
            }
            '<' | '>' => self.out.push(e),
            // Any other ASCII character that is not a letter or digit stands for itself.
            c if c.is_ascii_punctuation() => {
                self.out.push('\\');
                self.out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_alphanumeric() => self.out.push_str(&format!("\\x{{{:X}}}", c as u32)),
            _ => return Err(PosixError::InvalidEscape { escape: format!("\\{e}"), offset }),
        }
        Ok(())
    }

    /// Read the digits of a `\xHH` or `\x{H..}` escape.
    fn hex(&mut self) -> Option<u32> {
        let braced = self.peek() == Some('{');
        if braced {
            self.pos += 1;
        }
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) && (braced || self.pos - start < 2) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
        if braced {
            if self.peek() != Some('}') {
                return None;
            }
            self.pos += 1;
        } else if digits.len() < 2 {
            return None;
        }
        u32::from_str_radix(&digits, 16).ok()
    }

    /// Translate a bracket expression whose `[` sits at `offset`.
    ///
    /// A `-` is literal only as the first or last member; anywhere else it
    /// must form a range. A negated expression never matches a newline.
    fn bracket(&mut self, offset: usize) -> Result<(), PosixError> {
        self.out.push('[');
        if self.peek() == Some('^') {
            self.pos += 1;
            self.out.push_str(r"^\n");
        }

        let mut first = true;
        loop {
            let Some(c) = self.peek() else {
                return Err(PosixError::MissingBracket { offset });
            };
            let here = self.offset(self.pos);
            let next = self.chars.get(self.pos + 1).map(|&(_, c)| c);

            if c == ']' && !first {
                self.pos += 1;
                self.out.push(']');
                return Ok(());
            }
            if c == '-' && !first && next != Some(']') {
                let range: String = self.chars[self.pos..].iter().take(2).map(|&(_, c)| c).collect();
                return Err(PosixError::InvalidClassRange { range, offset: here });
            }
            first = false;

            if c == '[' && next == Some(':') && self.class_name(here)? {
                continue;
            }

            self.class_char(here)?;
            // `a-]` is `a` and `-`, not a range.
            let after = self.chars.get(self.pos + 1).map(|&(_, c)| c);
            if self.peek() == Some('-') && after.is_some_and(|c| c != ']') {
                self.pos += 1;
                self.out.push('-');
                let hi = self.offset(self.pos);
                self.class_char(hi)?;
            }
        }
    }

    /// Translate one bracket member (a character or an escape) at `offset`.
    fn class_char(&mut self, offset: usize) -> Result<(), PosixError> {
        let Some(c) = self.peek() else {
            return Err(PosixError::MissingBracket { offset });
        };
        self.pos += 1;
        match c {
            '\\' => self.escape(offset)?,
            // Class syntax and set operators in `regex`.
            '[' | ']' | '^' | '-' | '&' | '~' => {
                self.out.push('\\');
                self.out.push(c);
            }
            _ => self.out.push(c),
        }
        Ok(())
    }

    /// Translate `[:name:]` inside a bracket expression; the `[` sits at
    /// `offset`. Without a closing `:]` the `[` is an ordinary member and
    /// nothing is consumed; returns whether a class was read.
    fn class_name(&mut self, offset: usize) -> Result<bool, PosixError> {
        let start = self.pos + 2;
        let Some(len) = self.chars.get(start..).and_then(|rest| rest.windows(2).position(|w| w[0].1 == ':' && w[1].1 == ']'))
        else {
            return Ok(false);
        };

        let name: String = self.chars[start..start + len].iter().map(|&(_, c)| c).collect();
        if !POSIX_CLASSES.contains(&name.strip_prefix('^').unwrap_or(&name)) {
            return Err(PosixError::UnknownClass { name, offset });
        }
        self.pos = start + len + 2;
        self.out.push_str("[:");
        self.out.push_str(&name);
        self.out.push_str(":]");
        Ok(true)
    }
}
