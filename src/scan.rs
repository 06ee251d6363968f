// SPDX: CC0-1.0

use core::{fmt, iter::Peekable, str::CharIndices};

/// Characters a function may contain, checked case-insensitively. Note the
/// absence of `y` and of whitespace.
pub const ALLOWED: &str = "abcdefghijklmnopqrstuvwxz1234567890()+-*/^%!";

pub const FREE_VAR: char = 'X';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BadChar {
    pub chr: char,
    pub at: usize,
}

impl fmt::Display for BadChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character '{}' at position {} is not allowed", self.chr, self.at)
    }
}

/// Character-class filter only; a passing expression may still be
/// ill-formed, which surfaces when the page evaluates it.
pub fn validate(expr: &str) -> Result<(), BadChar> {
    for (at, chr) in expr.char_indices() {
        if !ALLOWED.contains(chr.to_ascii_lowercase()) {
            return Err(BadChar { chr, at });
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegTyp {
    /// Lowercase run glued to a preceding letter or qualifier dot.
    Qualified,
    /// Lowercase run immediately followed by `(`.
    Call,
    /// Bare lowercase run, a named constant.
    Name,
    /// The free variable.
    Free,
    /// Any other single uppercase letter.
    Upper,
    /// Run of non-alphabetic characters, passed through verbatim.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seg<'src> {
    pub typ: SegTyp,
    pub text: &'src str,
    pub at: usize,
}

#[derive(Debug)]
pub struct Scanner<'src> {
    src: &'src str,
    cur: Peekable<CharIndices<'src>>,
    prev: Option<char>, // last character of the previous segment
}

impl<'src> Scanner<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            cur: src.char_indices().peekable(),
            prev: None,
        }
    }

    fn consume_run<P>(&mut self, start: usize, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        let mut end = start;
        while let Some(&(idx, chr)) = self.cur.peek() {
            if predicate(chr) {
                end = idx + chr.len_utf8();
                self.cur.next().unwrap(); // consume because we only peeked
            } else {
                break;
            }
        }
        &self.src[start..end]
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Seg<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let &(at, chr) = self.cur.peek()?;
        let prev = self.prev;

        let seg = if chr.is_ascii_lowercase() {
            let text = self.consume_run(at, |c| c.is_ascii_lowercase());
            let typ = if matches!(prev, Some(p) if p == '.' || p.is_ascii_alphabetic()) {
                SegTyp::Qualified
            } else if matches!(self.cur.peek(), Some(&(_, '('))) {
                SegTyp::Call
            } else {
                SegTyp::Name
            };
            Seg { typ, text, at }
        } else if chr.is_ascii_uppercase() {
            // variables are single letters, so every uppercase character is
            // its own segment
            self.cur.next().unwrap(); // consume because we only peeked
            let typ = if chr == FREE_VAR {
                SegTyp::Free
            } else {
                SegTyp::Upper
            };
            Seg {
                typ,
                text: &self.src[at..at + chr.len_utf8()],
                at,
            }
        } else {
            let text = self.consume_run(at, |c| !c.is_ascii_alphabetic());
            Seg {
                typ: SegTyp::Text,
                text,
                at,
            }
        };

        self.prev = seg.text.chars().last();
        Some(seg)
    }
}
