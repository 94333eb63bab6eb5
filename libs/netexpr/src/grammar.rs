//! Recursive-descent grammar for the expression sub-language.
//!
//! Precedence, low to high: `logical`, `relational`, `expression`, `term`,
//! `power`, `factor`; every level is a left-associative chain. Ternary
//! branches and call argument lists are captured as raw substrings so the
//! evaluator can re-enter them lazily.
//!
//! Parse failure is silent: [`parse`] returns `None` and the caller decides
//! how to react.

use crate::ast::{Expr, Operation};
use crate::ExprDialect;

/// Characters that may not begin an identifier (digits are also excluded).
const IDENT_DELIMS: &str = "$?:;(){}[],.= \t'*/+<>&|!-\"";
/// Characters that may not continue an identifier (`.` and digits may).
const IDENT_CONT_DELIMS: &str = "$?:;(){}[],= \t'*/+<>&|!-\"";

/// Characters allowed in a ternary condition or left branch, outside
/// parentheses. `?` and `:` are only allowed inside parenthesized groups.
const TERNARY_COND: &str = ".+/*_<>!= \t|$&~-";
/// Characters allowed in a ternary right branch, outside parentheses.
/// Arithmetic operators are included so the whole dead branch is captured
/// and never parsed when the condition takes the other arm.
const TERNARY_RIGHT: &str = ".+-/*_! \t|$&~";
/// Characters allowed in a call argument, outside parentheses.
const CALL_ARG: &str = ".+/*_<>!= \t|$&~?:-";
/// Characters allowed inside a parenthesized group.
const PAREN_INNER: &str = ",.+/*^_<>!= \t|$&?:~-";

/// Built-in constant names, matched exactly, longest first.
const BUILTIN_CONSTS: &[&str] = &[
    "M_LOG10E", "M_LOG2E", "M_LN10", "M_LN2", "M_PI_2", "M_PI_4", "M_PI", "M_E",
];

/// Built-in function names, matched case-insensitively, longest first.
const BUILTIN_FUNCS: &[&str] = &[
    "agauss", "aunif", "log10", "asin", "acos", "atan", "sinh", "cosh", "tanh", "sqrt", "exp",
    "log", "cos", "sin", "tan", "max", "min", "int", "abs", "sgn", "pow", "pwr",
];

/// Parses `input` as a complete expression statement, returning the root
/// node, or `None` if the input is not fully consumable.
pub fn parse(input: &str, dialect: ExprDialect) -> Option<Expr> {
    let mut p = ExprParser::new(input, dialect);
    let expr = p.start()?;
    p.skip_ws();
    if p.at_end() {
        Some(expr.into_root())
    } else {
        None
    }
}

struct ExprParser<'a> {
    src: &'a str,
    pos: usize,
    dialect: ExprDialect,
}

impl<'a> ExprParser<'a> {
    fn new(src: &'a str, dialect: ExprDialect) -> Self {
        Self {
            src,
            pos: 0,
            dialect,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn eat_str_nocase(&mut self, s: &str) -> bool {
        match self.rest().get(..s.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(s) => {
                self.pos += s.len();
                true
            }
            _ => false,
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn take_while1(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
        if self.pos > start {
            Some(&self.src[start..self.pos])
        } else {
            None
        }
    }

    // LEXICAL RULES

    fn is_ident_start(c: char) -> bool {
        !c.is_ascii_digit() && !c.is_whitespace() && !IDENT_DELIMS.contains(c)
    }

    fn is_ident_cont(c: char) -> bool {
        !c.is_whitespace() && !IDENT_CONT_DELIMS.contains(c)
    }

    fn identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if Self::is_ident_start(c) => {
                self.bump();
            }
            _ => return None,
        }
        while matches!(self.peek(), Some(c) if Self::is_ident_cont(c)) {
            self.bump();
        }
        Some(&self.src[start..self.pos])
    }

    fn digits(&mut self) -> bool {
        self.take_while1(|c| c.is_ascii_digit()).is_some()
    }

    /// A numeric literal: integer or decimal body, then an exponent or a
    /// dialect-specific SI suffix (with an ignored unit tail in the Spectre
    /// profile). The literal is captured unparsed, suffix retained.
    fn number(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.digits() {
            if self.eat('.') {
                self.digits();
            }
        } else {
            let m = self.mark();
            if !(self.eat('.') && self.digits()) {
                self.reset(m);
                return None;
            }
        }

        // Exponent, else suffix (and tail).
        let m = self.mark();
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            let _ = self.eat('+') || self.eat('-');
            if !self.digits() {
                self.reset(m);
            }
        } else {
            let (suffixes, tails): (&str, &str) = match self.dialect {
                ExprDialect::Hspice => ("afpnumkxg", ""),
                ExprDialect::Spectre => ("ptgmkafpnumck", "fhsv"),
            };
            let in_set = |set: &str, c: char| set.contains(c.to_ascii_lowercase());
            match self.peek() {
                Some(c) if in_set(suffixes, c) => {
                    self.bump();
                    if matches!(self.peek(), Some(t) if in_set(tails, t)) {
                        self.bump();
                    }
                }
                Some(c) if in_set(tails, c) => {
                    self.bump();
                }
                _ => {}
            }
        }
        Some(&self.src[start..self.pos])
    }

    /// A balanced parenthesized group with non-empty contents.
    fn paren_group(&mut self) -> bool {
        let m = self.mark();
        if !self.eat('(') {
            return false;
        }
        let mut parts = 0;
        loop {
            if self.peek() == Some('(') {
                if !self.paren_group() {
                    break;
                }
                parts += 1;
            } else if self
                .take_while1(|c| c.is_ascii_alphanumeric() || PAREN_INNER.contains(c))
                .is_some()
            {
                parts += 1;
            } else {
                break;
            }
        }
        if parts > 0 && self.eat(')') {
            true
        } else {
            self.reset(m);
            false
        }
    }

    /// Raw text made of parenthesized groups and chars from `extra`.
    fn raw_text(&mut self, extra: &str) -> Option<&'a str> {
        let start = self.pos;
        loop {
            if self.peek() == Some('(') {
                if !self.paren_group() {
                    break;
                }
            } else if self
                .take_while1(|c| c.is_ascii_alphanumeric() || extra.contains(c))
                .is_none()
            {
                break;
            }
        }
        if self.pos > start {
            Some(&self.src[start..self.pos])
        } else {
            None
        }
    }

    // GRAMMAR, PRECEDENCE LOW TO HIGH

    fn start(&mut self) -> Option<Expr> {
        let m = self.mark();
        if let Some(e) = self.assignment() {
            return Some(e);
        }
        self.reset(m);
        if let Some(e) = self.func_assignment() {
            return Some(e);
        }
        self.reset(m);
        if let Some(e) = self.logical() {
            return Some(e);
        }
        self.reset(m);
        self.skip_ws();
        if self.eat('\'') {
            let e = self.logical()?;
            self.skip_ws();
            if self.eat('\'') {
                return Some(e);
            }
        }
        self.reset(m);
        None
    }

    fn assignment(&mut self) -> Option<Expr> {
        let m = self.mark();
        self.skip_ws();
        let name = match self.identifier() {
            Some(n) => n.to_string(),
            None => {
                self.reset(m);
                return None;
            }
        };
        self.skip_ws();
        if !self.eat('=') || self.peek() == Some('=') {
            self.reset(m);
            return None;
        }
        self.skip_ws();
        let quoted = self.eat('\'');
        let rhs = match self.logical() {
            Some(r) => r,
            None => {
                self.reset(m);
                return None;
            }
        };
        if quoted {
            self.skip_ws();
            if !self.eat('\'') {
                self.reset(m);
                return None;
            }
        }
        Some(Expr::Assignment {
            name,
            rhs: Box::new(rhs),
        })
    }

    fn func_assignment(&mut self) -> Option<Expr> {
        let m = self.mark();
        self.skip_ws();
        let sig_start = self.pos;
        if self.identifier().is_none() {
            self.reset(m);
            return None;
        }
        self.skip_ws();
        if !self.eat('(') {
            self.reset(m);
            return None;
        }
        loop {
            self.skip_ws();
            if self.raw_text(CALL_ARG).is_none() {
                self.reset(m);
                return None;
            }
            self.skip_ws();
            if !self.eat(',') {
                break;
            }
        }
        if !self.eat(')') {
            self.reset(m);
            return None;
        }
        let signature = self.src[sig_start..self.pos].trim().to_string();
        self.skip_ws();
        if !self.eat('=') {
            self.reset(m);
            return None;
        }
        let body = self.rest().trim().to_string();
        self.pos = self.src.len();
        Some(Expr::FuncDef { signature, body })
    }

    fn logical(&mut self) -> Option<Expr> {
        self.bool_chain(&["||", "&&"], Self::relational)
    }

    fn relational(&mut self) -> Option<Expr> {
        self.bool_chain(&["!=", "==", ">=", "<=", ">", "<"], Self::expression)
    }

    fn bool_chain(
        &mut self,
        ops: &[&str],
        next: fn(&mut Self) -> Option<Expr>,
    ) -> Option<Expr> {
        let first = next(self)?;
        let mut rest = Vec::new();
        'chain: loop {
            let m = self.mark();
            self.skip_ws();
            for &op in ops {
                if self.eat_str(op) {
                    match next(self) {
                        Some(operand) => {
                            rest.push(Operation {
                                op: op.to_string(),
                                operand,
                            });
                            continue 'chain;
                        }
                        None => {
                            self.reset(m);
                            break 'chain;
                        }
                    }
                }
            }
            self.reset(m);
            break;
        }
        if rest.is_empty() {
            Some(first)
        } else {
            Some(Expr::Bool {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn expression(&mut self) -> Option<Expr> {
        self.binary_chain(&["+", "-"], Self::term)
    }

    fn term(&mut self) -> Option<Expr> {
        self.binary_chain(&["*", "/"], Self::power)
    }

    fn power(&mut self) -> Option<Expr> {
        self.binary_chain(&["**", "^"], Self::factor)
    }

    fn binary_chain(
        &mut self,
        ops: &[&str],
        next: fn(&mut Self) -> Option<Expr>,
    ) -> Option<Expr> {
        let first = next(self)?;
        let mut rest = Vec::new();
        'chain: loop {
            let m = self.mark();
            self.skip_ws();
            for &op in ops {
                if self.eat_str(op) {
                    match next(self) {
                        Some(operand) => {
                            rest.push(Operation {
                                op: op.to_string(),
                                operand,
                            });
                            continue 'chain;
                        }
                        None => {
                            self.reset(m);
                            break 'chain;
                        }
                    }
                }
            }
            self.reset(m);
            break;
        }
        if rest.is_empty() {
            Some(first)
        } else {
            Some(Expr::Binary {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn factor(&mut self) -> Option<Expr> {
        self.skip_ws();
        let m = self.mark();
        if let Some(e) = self.ternary() {
            return Some(e);
        }
        self.reset(m);
        if let Some(n) = self.number() {
            return Some(Expr::Number(n.to_string()));
        }
        self.reset(m);
        if let Some(e) = self.builtin() {
            return Some(e);
        }
        self.reset(m);
        if let Some(e) = self.func_call() {
            return Some(e);
        }
        self.reset(m);
        if let Some(v) = self.identifier() {
            return Some(Expr::Variable(v.to_string()));
        }
        self.reset(m);
        if self.eat('(') {
            if let Some(e) = self.logical() {
                self.skip_ws();
                if self.eat(')') {
                    return Some(e);
                }
            }
            self.reset(m);
        }
        if let Some(sign) = self.peek().filter(|&c| c == '-' || c == '+') {
            self.bump();
            if let Some(operand) = self.factor() {
                return Some(Expr::Unary {
                    sign,
                    operand: Box::new(operand),
                });
            }
            self.reset(m);
        }
        None
    }

    fn ternary(&mut self) -> Option<Expr> {
        let m = self.mark();
        let cond = match self.raw_text(TERNARY_COND) {
            Some(t) => t.to_string(),
            None => {
                self.reset(m);
                return None;
            }
        };
        if !self.eat('?') {
            self.reset(m);
            return None;
        }
        let left = match self.raw_text(TERNARY_COND) {
            Some(t) => t.to_string(),
            None => {
                self.reset(m);
                return None;
            }
        };
        if !self.eat(':') {
            self.reset(m);
            return None;
        }
        let right = match self.ternary_right() {
            Some(t) => t.to_string(),
            None => {
                self.reset(m);
                return None;
            }
        };
        Some(Expr::Ternary {
            cond: cond.trim().to_string(),
            left: left.trim().to_string(),
            right: right.trim().to_string(),
        })
    }

    fn ternary_right(&mut self) -> Option<&'a str> {
        self.raw_text(TERNARY_RIGHT)
    }

    fn builtin(&mut self) -> Option<Expr> {
        let start = self.pos;
        for name in BUILTIN_CONSTS {
            let m = self.mark();
            if self.eat_str(name) {
                if !matches!(self.peek(), Some(c) if Self::is_ident_cont(c)) {
                    return Some(Expr::BuiltIn(name.to_string()));
                }
                self.reset(m);
            }
        }
        let m = self.mark();
        if self.eat_str_nocase("pi") && !matches!(self.peek(), Some(c) if Self::is_ident_cont(c)) {
            return Some(Expr::BuiltIn(self.src[start..self.pos].to_string()));
        }
        self.reset(m);
        for name in BUILTIN_FUNCS {
            let m = self.mark();
            if self.eat_str_nocase(name) {
                if self.call_args() {
                    return Some(Expr::BuiltIn(self.src[start..self.pos].to_string()));
                }
                self.reset(m);
            }
        }
        None
    }

    fn func_call(&mut self) -> Option<Expr> {
        let start = self.pos;
        self.identifier()?;
        if self.call_args() {
            Some(Expr::FuncCall(self.src[start..self.pos].to_string()))
        } else {
            None
        }
    }

    /// `'(' arg (',' arg)* ')'` where each argument is raw text.
    fn call_args(&mut self) -> bool {
        let m = self.mark();
        self.skip_ws();
        if !self.eat('(') {
            self.reset(m);
            return false;
        }
        loop {
            self.skip_ws();
            if self.raw_text(CALL_ARG).is_none() {
                self.reset(m);
                return false;
            }
            self.skip_ws();
            if !self.eat(',') {
                break;
            }
        }
        if self.eat(')') {
            true
        } else {
            self.reset(m);
            false
        }
    }
}

/// Splits a call text such as `"f(a, g(b, c))"` into its name and argument
/// texts. Arguments are comma-split, rejoining pieces until parentheses
/// balance, so nested calls survive. Returns `None` for the argument list
/// when the text has no parenthesis at all (a bare constant name).
pub(crate) fn split_call_text(text: &str) -> (String, Option<Vec<String>>) {
    let t = text.trim();
    let open = match t.find('(') {
        Some(i) => i,
        None => return (t.to_string(), None),
    };
    let name = t[..open].trim().to_string();
    let inner = &t[open + 1..];
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    let mut args = Vec::new();
    let mut pending = String::new();
    for piece in inner.split(',') {
        if pending.is_empty() {
            pending.push_str(piece);
        } else {
            pending.push(',');
            pending.push_str(piece);
        }
        let opens = pending.matches('(').count();
        if opens > 0 && opens != pending.matches(')').count() {
            continue;
        }
        let arg = pending.trim();
        if !arg.is_empty() {
            args.push(arg.to_string());
        }
        pending.clear();
    }
    let tail = pending.trim();
    if !tail.is_empty() {
        args.push(tail.to_string());
    }
    (name, Some(args))
}
