//! The expression sub-language of the netlist translator.
//!
//! SPICE-family netlists embed an expression language in parameter
//! assignments, user function definitions, and device values:
//! arithmetic, boolean and ternary operators, engineering-notation numeric
//! literals (`10k`, `1.5u`), built-in math functions, and user-defined
//! functions with positional formals.
//!
//! This crate parses that language into an AST ([`Expr`]), evaluates it
//! against a mutable [`SymbolTable`] ([`process_input`]), and linearizes it
//! back into classified tokens for rewriting ([`print_tokens`]).
//!
//! The evaluator never fails; every unresolvable input reduces to a quiet
//! NaN. See [`resolve_params`] for the fixpoint loop that exploits this to
//! handle out-of-order parameter definitions.

#![warn(missing_docs)]

pub mod ast;
mod eval;
pub mod grammar;
mod print;
mod resolve;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

pub use ast::{Expr, Operation};
pub use grammar::parse;
pub use print::{print_tokens, ExprClass, ExprToken};
pub use resolve::{resolve_params, PendingParam, ResolveIssue};

/// The lexical profile used when parsing and evaluating expressions.
///
/// The HSPICE profile covers the HSPICE, PSPICE, TSPICE, and Xyce netlist
/// dialects; Spectre has its own numeric literal rules (a wider SI suffix
/// set plus ignored unit-tail letters).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExprDialect {
    /// SPICE-family numeric literals (suffixes `a f p n u m k x g`).
    #[default]
    Hspice,
    /// Spectre numeric literals (suffixes `P T G M K a f p n u m c k`,
    /// unit tails `f H s V`).
    Spectre,
}

/// An error parsing an [`ExprDialect`] from a string.
#[derive(Copy, Clone, Debug, Error)]
#[error("error parsing expression dialect")]
pub struct ParseExprDialectError;

impl Display for ExprDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hspice => write!(f, "hspice"),
            Self::Spectre => write!(f, "spectre"),
        }
    }
}

impl FromStr for ExprDialect {
    type Err = ParseExprDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hspice" | "pspice" | "tspice" | "xyce" => Ok(Self::Hspice),
            "spectre" => Ok(Self::Spectre),
            _ => Err(ParseExprDialectError),
        }
    }
}

/// The mutable symbol store for one evaluation session.
///
/// All three maps live for the duration of a translation run. Function
/// formals are positional: `function_formals["f"]` lists the formal names
/// of `f` in declaration order.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    /// Current numeric bindings.
    pub variables: HashMap<String, f64>,
    /// User function bodies, kept as unparsed source text.
    pub function_bodies: HashMap<String, String>,
    /// User function formal parameter names, in positional order.
    pub function_formals: HashMap<String, Vec<String>>,
    rng_state: u64,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            function_bodies: HashMap::new(),
            function_formals: HashMap::new(),
            rng_state: 0x9e37_79b9_7f4a_7c15,
        }
    }

    /// Binds `name` to a numeric value.
    pub fn define_var(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    /// Defines a user function with positional formals and an unparsed body.
    pub fn define_function(
        &mut self,
        name: impl Into<String>,
        formals: impl IntoIterator<Item = impl Into<String>>,
        body: impl Into<String>,
    ) {
        let name = name.into();
        self.function_formals
            .insert(name.clone(), formals.into_iter().map(Into::into).collect());
        self.function_bodies.insert(name, body.into());
    }

    /// A uniform sample in `[0, 1)`. xorshift64*, seeded per table, so a
    /// session's statistical built-ins are reproducible.
    pub(crate) fn next_uniform(&mut self) -> f64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }

    /// A standard normal sample (Box-Muller).
    pub(crate) fn next_normal(&mut self) -> f64 {
        let u1 = self.next_uniform().max(f64::MIN_POSITIVE);
        let u2 = self.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Parses and evaluates `input` against `table`.
///
/// Returns a quiet NaN for unparsable input, unresolved variables, or any
/// propagated NaN; it never fails. Assignments and function definitions
/// mutate `table` as a side effect and return the assigned value (or `0.0`
/// for definitions).
pub fn process_input(input: &str, dialect: ExprDialect, table: &mut SymbolTable) -> f64 {
    match grammar::parse(input, dialect) {
        Some(root) => eval::Evaluator::new(table, dialect).eval(&root),
        None => {
            tracing::debug!(input, "expression did not parse");
            f64::NAN
        }
    }
}

/// Removes one layer of `{}`, `''`, or `""` delimiters from an expression
/// as it appears in a netlist, returning the inner text.
pub fn strip_expr_delimiters(text: &str) -> &str {
    let t = text.trim();
    for (open, close) in [('{', '}'), ('\'', '\''), ('"', '"')] {
        if t.len() >= 2 && t.starts_with(open) && t.ends_with(close) {
            return t[1..t.len() - 1].trim();
        }
    }
    t
}
