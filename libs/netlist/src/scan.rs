//! Low-level scanning over a logical line.
//!
//! [`Cursor`] is a backtracking view into a [`Substr`]: marking and
//! resetting are refcount bumps, so the PEG grammars can try alternatives
//! freely. Character-class scans go through `nom`.

use nom::bytes::complete::take_while;

use crate::Substr;

/// A backtracking cursor over one logical line.
#[derive(Clone, Debug)]
pub(crate) struct Cursor {
    rem: Substr,
}

impl Cursor {
    pub(crate) fn new(line: Substr) -> Self {
        Self { rem: line }
    }

    /// The unconsumed remainder.
    pub(crate) fn rest(&self) -> &str {
        &self.rem
    }

    pub(crate) fn at_end(&self) -> bool {
        self.rem.is_empty()
    }

    /// Saves the current position. Restoring is [`Cursor::reset`].
    pub(crate) fn mark(&self) -> Substr {
        self.rem.clone()
    }

    pub(crate) fn reset(&mut self, mark: Substr) {
        self.rem = mark;
    }

    /// The number of bytes consumed since `mark` was taken.
    pub(crate) fn consumed_since(&self, mark: &Substr) -> usize {
        mark.len() - self.rem.len()
    }

    /// The text consumed since `mark` was taken.
    pub(crate) fn span_since(&self, mark: &Substr) -> Substr {
        mark.substr(..self.consumed_since(mark))
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rem.chars().next()
    }

    pub(crate) fn take1(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rem = self.rem.substr(c.len_utf8()..);
        Some(c)
    }

    pub(crate) fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.take1();
            true
        } else {
            false
        }
    }

    /// Consumes `lit` exactly.
    pub(crate) fn eat_lit(&mut self, lit: &str) -> bool {
        if self.rem.starts_with(lit) {
            self.rem = self.rem.substr(lit.len()..);
            true
        } else {
            false
        }
    }

    /// Consumes `lit` case-insensitively, returning the matched source text
    /// in its original case.
    pub(crate) fn eat_lit_nocase(&mut self, lit: &str) -> Option<Substr> {
        match self.rem.as_str().get(..lit.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(lit) => {
                let cap = self.rem.substr(..lit.len());
                self.rem = self.rem.substr(lit.len()..);
                Some(cap)
            }
            _ => None,
        }
    }

    /// Zero-or-more characters satisfying `pred`.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Substr {
        let (rest, taken) = take_while::<_, _, ()>(pred)(self.rem.clone()).unwrap();
        self.rem = rest;
        taken
    }

    /// One-or-more characters satisfying `pred`.
    pub(crate) fn take_while1(&mut self, pred: impl Fn(char) -> bool) -> Option<Substr> {
        let taken = self.take_while(pred);
        if taken.is_empty() {
            None
        } else {
            Some(taken)
        }
    }

    /// Consumes and returns the entire remainder.
    pub(crate) fn rest_all(&mut self) -> Substr {
        let all = self.rem.clone();
        self.rem = self.rem.substr(self.rem.len()..);
        all
    }

    /// Required whitespace: one or more spaces or tabs.
    pub(crate) fn ws(&mut self) -> bool {
        self.take_while1(|c| c == ' ' || c == '\t').is_some()
    }

    /// Optional whitespace.
    pub(crate) fn opt_ws(&mut self) {
        self.take_while(|c| c == ' ' || c == '\t');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_marks_and_resets() {
        let mut cur = Cursor::new(Substr::from("abc def"));
        let m = cur.mark();
        assert!(cur.eat_lit("abc"));
        assert_eq!(cur.span_since(&m), "abc");
        cur.reset(m);
        assert_eq!(cur.rest(), "abc def");
    }

    #[test]
    fn nocase_literal_preserves_source_case() {
        let mut cur = Cursor::new(Substr::from(".Param x=1"));
        let cap = cur.eat_lit_nocase(".PARAM").unwrap();
        assert_eq!(cap, ".Param");
        assert_eq!(cur.rest(), " x=1");
    }

    #[test]
    fn take_while_splits() {
        let mut cur = Cursor::new(Substr::from("r1 a"));
        let word = cur.take_while1(|c| !c.is_whitespace()).unwrap();
        assert_eq!(word, "r1");
        assert!(cur.ws());
        assert_eq!(cur.rest(), "a");
    }
}
