//! The per-dialect netlist grammars.
//!
//! Each grammar is a PEG over one logical line, producing a flat vector of
//! classified tokens. The base (Xyce) grammar carries the shared universe
//! of device letters and directives; PSPICE and TSPICE compose with it by
//! trying their own top-level alternatives first and falling back to the
//! base line. HSPICE and Spectre are syntactically distinct and stand
//! alone. Composition is interface sharing: dialect modules call the base
//! module's rule functions directly, there is no inheritance.

pub mod hspice;
pub mod pspice;
pub mod spectre;
pub mod tspice;
pub mod xyce;

#[cfg(test)]
mod tests;

use crate::scan::Cursor;
use crate::{Substr, Token, TokenClass};

/// A dialect grammar over logical lines.
pub trait Grammar {
    /// Parses a complete logical line into classified tokens.
    ///
    /// PEG semantics: the whole line must be consumed; otherwise the line
    /// does not belong to this dialect's grammar and `None` is returned.
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>>;

    /// The start-of-line comment prefix used when a failed line is
    /// retained as a comment.
    fn comment_prefix(&self) -> &'static str;

    /// The dialect name used in retained-comment messages.
    fn dialect_name(&self) -> &'static str;

    /// Removes a trailing inline comment from `line`, if the grammar
    /// recognizes one, returning the retained prefix with trailing
    /// whitespace trimmed.
    ///
    /// The line is parsed with the full grammar so that comment characters
    /// inside expressions (`*`, `/`) are not mistaken for comments.
    fn strip_inline_comment(&self, line: &str) -> String {
        let sub = Substr::from(line);
        if let Some(tokens) = self.parse_line(&sub) {
            if let Some(comment) = tokens
                .iter()
                .find(|t| t.has_class(TokenClass::InlineComment))
            {
                if let Some(idx) = line.find(comment.value.as_str()) {
                    return line[..idx].trim_end().to_string();
                }
            }
        }
        line.trim_end().to_string()
    }
}

/// The lexical profile shared rules switch on.
///
/// PSPICE and TSPICE use the Xyce lexemes; HSPICE has its own delimiter
/// sets; Spectre shares the Xyce delimiters but stops identifiers at a
/// `//` comment opener.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Profile {
    Xyce,
    Hspice,
    Spectre,
}

/// Parser state for one logical line: a backtracking cursor plus the token
/// sink. Alternation helpers restore both on failure.
pub(crate) struct LineParser {
    pub(crate) cur: Cursor,
    pub(crate) toks: Vec<Token>,
    pub(crate) prof: Profile,
}

/// Runs `top` over `line` with PEG whole-input semantics.
pub(crate) fn run(
    line: &Substr,
    prof: Profile,
    top: impl FnOnce(&mut LineParser) -> bool,
) -> Option<Vec<Token>> {
    let mut p = LineParser {
        cur: Cursor::new(line.clone()),
        toks: Vec::new(),
        prof,
    };
    p.cur.opt_ws();
    if top(&mut p) {
        p.cur.opt_ws();
        if p.cur.at_end() {
            return Some(p.toks);
        }
    }
    None
}

impl LineParser {
    pub(crate) fn push(&mut self, value: Substr, classes: &[TokenClass]) {
        self.toks.push(Token::with_classes(value, classes.to_vec()));
    }

    /// Tries `f`; on failure restores the cursor and the token sink.
    pub(crate) fn attempt(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.cur.mark();
        let ntoks = self.toks.len();
        if f(self) {
            true
        } else {
            self.cur.reset(mark);
            self.toks.truncate(ntoks);
            false
        }
    }

    /// `-rule`: tries `f` and succeeds either way.
    pub(crate) fn opt(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.attempt(f);
        true
    }

    /// `*rule`. `f` must consume on success or this would never return.
    pub(crate) fn many0(&mut self, f: impl Fn(&mut Self) -> bool) -> bool {
        while self.attempt(&f) {}
        true
    }

    /// `+rule`.
    pub(crate) fn many1(&mut self, f: impl Fn(&mut Self) -> bool) -> bool {
        if !self.attempt(&f) {
            return false;
        }
        while self.attempt(&f) {}
        true
    }

    /// `!rule`: negative lookahead. Never consumes.
    pub(crate) fn not(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        !self.check(f)
    }

    /// `&rule`: positive lookahead. Never consumes.
    pub(crate) fn check(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.cur.mark();
        let ntoks = self.toks.len();
        let matched = f(self);
        self.cur.reset(mark);
        self.toks.truncate(ntoks);
        matched
    }

    /// Runs `f` and returns the span of source text it consumed.
    pub(crate) fn capture(&mut self, f: impl FnOnce(&mut Self) -> bool) -> Option<Substr> {
        let mark = self.cur.mark();
        let ntoks = self.toks.len();
        if f(self) {
            Some(self.cur.span_since(&mark))
        } else {
            self.cur.reset(mark);
            self.toks.truncate(ntoks);
            None
        }
    }

    pub(crate) fn ws(&mut self) -> bool {
        self.cur.ws()
    }

    pub(crate) fn opt_ws(&mut self) -> bool {
        self.cur.opt_ws();
        true
    }

    // LEXICAL RULES, PROFILE-SWITCHED

    fn ident_char(prof: Profile, c: char) -> bool {
        match prof {
            Profile::Xyce | Profile::Spectre => !c.is_whitespace() && !":;(){}[],=".contains(c),
            Profile::Hspice => !c.is_whitespace() && !"$:;(){}[],='*".contains(c),
        }
    }

    fn raw_ident_segment(&mut self) -> bool {
        let prof = self.prof;
        let mut any = false;
        loop {
            if prof != Profile::Xyce && self.cur.rest().starts_with("//") {
                break;
            }
            match self.cur.peek() {
                Some(c) if Self::ident_char(prof, c) => {
                    self.cur.take1();
                    any = true;
                }
                _ => break,
            }
        }
        any
    }

    /// An identifier, possibly with `:`-joined scope segments.
    pub(crate) fn identifier(&mut self) -> Option<Substr> {
        self.capture(|p| {
            if !p.raw_ident_segment() {
                return false;
            }
            while p.attempt(|p| p.cur.eat_char(':') && p.raw_ident_segment()) {}
            true
        })
    }

    /// An HSPICE node name: `.`-joined segments, no leading sign.
    pub(crate) fn node_identifier(&mut self) -> Option<Substr> {
        self.capture(|p| {
            match p.cur.peek() {
                Some(c) if !c.is_whitespace() && !"$*:;(){}[],='.+-\"".contains(c) => {
                    p.cur.take1();
                }
                _ => return false,
            }
            let seg = |c: char| !c.is_whitespace() && !"(),=\"'.".contains(c);
            p.cur.take_while(seg);
            while p.attempt(|p| p.cur.eat_char('.') && p.cur.take_while1(seg).is_some()) {}
            true
        })
    }

    /// A `{...}`-delimited expression, braces not nested.
    fn flat_brace_expression(&mut self) -> bool {
        self.cur.eat_char('{')
            && self
                .cur
                .take_while1(|c| {
                    c.is_ascii_alphanumeric() || ".+-/*(),_=<> \t!|$&?:~'".contains(c)
                })
                .is_some()
            && self.cur.eat_char('}')
    }

    /// A `{...}`-delimited expression with nested braces, or a
    /// quote-delimited expression.
    fn brace_expression(&mut self) -> bool {
        if self.cur.peek() == Some('\'') {
            return self.quoted_expression('\'');
        }
        if !self.cur.eat_char('{') {
            return false;
        }
        let mut parts = 0;
        loop {
            if self.cur.peek() == Some('{') {
                if !self.attempt(Self::brace_expression) {
                    break;
                }
                parts += 1;
            } else if self
                .cur
                .take_while1(|c| {
                    c.is_ascii_alphanumeric() || ".+-/*(),_=<> \t!|$&?:~'".contains(c)
                })
                .is_some()
            {
                parts += 1;
            } else {
                break;
            }
        }
        parts > 0 && self.cur.eat_char('}')
    }

    fn quoted_expression(&mut self, quote: char) -> bool {
        self.cur.eat_char(quote)
            && self
                .cur
                .take_while1(|c| c != quote && !"\r\n".contains(c))
                .is_some()
            && self.cur.eat_char(quote)
    }

    /// A balanced parenthesized expression fragment (HSPICE).
    fn paren_expression(&mut self) -> bool {
        let m = self.cur.mark();
        if !self.cur.eat_char('(') {
            return false;
        }
        let mut parts = 0;
        loop {
            if self.cur.peek() == Some('(') {
                if !self.paren_expression() {
                    break;
                }
                parts += 1;
            } else if self
                .cur
                .take_while1(|c| {
                    c.is_ascii_alphanumeric() || ".+/*^,_=<> \t'!|$&?:~-".contains(c)
                })
                .is_some()
            {
                parts += 1;
            } else {
                break;
            }
        }
        if parts > 0 && self.cur.eat_char(')') {
            true
        } else {
            self.cur.reset(m);
            false
        }
    }

    /// An undelimited HSPICE expression: starts on a restricted character
    /// set, continues greedily without whitespace.
    fn hspice_bare_expression(&mut self) -> bool {
        if self.attempt(Self::paren_expression) {
        } else {
            match self.cur.peek() {
                Some(c)
                    if c.is_ascii_alphanumeric() || ".+,_=<>!|&:~-".contains(c) =>
                {
                    self.cur.take1();
                }
                _ => return false,
            }
        }
        loop {
            if self.cur.peek() == Some('(') {
                if !self.attempt(Self::paren_expression) {
                    break;
                }
            } else if self
                .cur
                .take_while1(|c| {
                    c.is_ascii_alphanumeric() || ".+/*^,_=<>'!|$&?:~-".contains(c)
                })
                .is_none()
            {
                break;
            }
        }
        true
    }

    /// A delimited math expression per the active profile.
    pub(crate) fn math_expression(&mut self) -> Option<Substr> {
        match self.prof {
            Profile::Xyce | Profile::Spectre => self.capture(|p| {
                p.attempt(Self::flat_brace_expression) || p.quoted_expression('\'')
            }),
            Profile::Hspice => self.capture(|p| {
                p.attempt(|p| p.quoted_expression('\''))
                    || p.attempt(|p| p.quoted_expression('"'))
                    || p.hspice_bare_expression()
            }),
        }
    }

    /// A math expression that may nest braces (base dialects) or any
    /// delimited/bare form (HSPICE).
    pub(crate) fn composite_math_expression(&mut self) -> Option<Substr> {
        match self.prof {
            Profile::Xyce | Profile::Spectre => self.capture(Self::brace_expression),
            Profile::Hspice => self.math_expression(),
        }
    }

    /// An expression with no curly braces; used where the base grammar
    /// accepts a raw tail expression.
    pub(crate) fn no_curly_expression(&mut self) -> Option<Substr> {
        self.cur
            .take_while1(|c| c.is_ascii_alphanumeric() || ".+-/*(),_=<> \t!|$&:~".contains(c))
    }

    /// A (possibly quoted) filename.
    pub(crate) fn filename_text(&mut self) -> Option<Substr> {
        self.capture(|p| {
            let quote = match p.cur.peek() {
                Some(q @ ('"' | '\'')) => {
                    p.cur.take1();
                    Some(q)
                }
                _ => None,
            };
            if p.cur
                .take_while1(|c| c.is_ascii_alphanumeric() || ".\\/:_-".contains(c))
                .is_none()
            {
                return false;
            }
            if let Some(q) = quote {
                p.cur.eat_char(q);
            }
            true
        })
    }

    /// A numeric literal at the netlist level (HSPICE data rows and sweep
    /// values): optional sign, digits, optional exponent or SI suffix.
    pub(crate) fn number_text(&mut self) -> Option<Substr> {
        self.capture(|p| {
            let _ = p.cur.eat_char('-');
            let int = p.cur.take_while1(|c| c.is_ascii_digit()).is_some();
            if int {
                if p.cur.eat_char('.') {
                    p.cur.take_while(|c| c.is_ascii_digit());
                }
            } else if !(p.cur.eat_char('.')
                && p.cur.take_while1(|c| c.is_ascii_digit()).is_some())
            {
                return false;
            }
            let m = p.cur.mark();
            if matches!(p.cur.peek(), Some('e' | 'E')) {
                p.cur.take1();
                let _ = p.cur.eat_char('+') || p.cur.eat_char('-');
                if p.cur.take_while1(|c| c.is_ascii_digit()).is_none() {
                    p.cur.reset(m);
                }
            } else if matches!(p.cur.peek(), Some(c) if "afpnumkxg".contains(c.to_ascii_lowercase()))
            {
                p.cur.take1();
            }
            true
        })
    }

    // CLASSIFIED EMITTERS

    /// Emits an identifier with the given classes.
    pub(crate) fn ident_token(&mut self, classes: &[TokenClass]) -> bool {
        match self.identifier() {
            Some(value) => {
                self.push(value, classes);
                true
            }
            None => false,
        }
    }

    /// Emits `composite_math_expression | identifier` with the given
    /// classes. Most positional values use this shape.
    pub(crate) fn expr_or_ident_token(&mut self, classes: &[TokenClass]) -> bool {
        let value = match self.composite_math_expression() {
            Some(v) => v,
            None => match self.identifier() {
                Some(v) => v,
                None => return false,
            },
        };
        self.push(value, classes);
        true
    }

    /// Emits `identifier | math_expression` with the given classes
    /// (identifier preferred; used for model-or-value slots).
    pub(crate) fn ident_or_expr_token(&mut self, classes: &[TokenClass]) -> bool {
        let value = match self.identifier() {
            Some(v) => v,
            None => match self.math_expression() {
                Some(v) => v,
                None => return false,
            },
        };
        self.push(value, classes);
        true
    }

    /// Emits a case-insensitive keyword with the given classes; the token
    /// value keeps the source casing.
    pub(crate) fn keyword_token(&mut self, keyword: &str, classes: &[TokenClass]) -> bool {
        match self.cur.eat_lit_nocase(keyword) {
            Some(value) => {
                self.push(value, classes);
                true
            }
            None => false,
        }
    }

    /// Emits the first matching keyword from `keywords`.
    pub(crate) fn keyword_token_of(
        &mut self,
        keywords: &[&str],
        classes: &[TokenClass],
    ) -> bool {
        keywords.iter().any(|kw| self.keyword_token(kw, classes))
    }

    /// Consumes the rest of the line into a `REST_OF_LINE` token. Matches
    /// the empty remainder without emitting anything.
    pub(crate) fn rest_of_line_token(&mut self) -> bool {
        self.cur.opt_ws();
        let rest = self.cur.rest_all();
        if !rest.is_empty() {
            self.push(rest, &[TokenClass::RestOfLine]);
        }
        true
    }

    /// A start-of-line comment: any of `prefixes`, then everything else.
    pub(crate) fn comment_token(&mut self, prefixes: &[&str]) -> bool {
        if prefixes.iter().any(|pre| self.cur.rest().starts_with(pre)) {
            let value = self.cur.rest_all();
            self.push(value, &[TokenClass::Comment]);
            true
        } else {
            false
        }
    }

    /// An inline comment: any of `prefixes`, then everything else.
    pub(crate) fn inline_comment_token(&mut self, prefixes: &[&str]) -> bool {
        if prefixes.iter().any(|pre| self.cur.rest().starts_with(pre)) {
            let value = self.cur.rest_all();
            self.push(value, &[TokenClass::InlineComment]);
            true
        } else {
            false
        }
    }
}
