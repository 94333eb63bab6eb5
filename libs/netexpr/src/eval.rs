//! Numeric reduction of expression ASTs against a symbol table.
//!
//! The evaluator never fails: unresolved variables, unparsable sub-texts,
//! and propagated NaN all reduce to a quiet NaN. Callers distinguish
//! "unresolved" from "zero" by checking for NaN.

use crate::ast::{Expr, Operation};
use crate::grammar::{self, split_call_text};
use crate::{ExprDialect, SymbolTable};

pub(crate) struct Evaluator<'a> {
    table: &'a mut SymbolTable,
    dialect: ExprDialect,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(table: &'a mut SymbolTable, dialect: ExprDialect) -> Self {
        Self { table, dialect }
    }

    pub(crate) fn eval(&mut self, expr: &Expr) -> f64 {
        match expr {
            Expr::Nil => f64::NAN,
            Expr::Number(lit) => parse_number_literal(lit, self.dialect),
            Expr::Variable(name) => self
                .table
                .variables
                .get(name)
                .copied()
                .unwrap_or(f64::NAN),
            Expr::Unary { sign, operand } => {
                let v = self.eval(operand);
                match sign {
                    '-' => -v,
                    _ => v,
                }
            }
            Expr::Binary { first, rest } => {
                let mut state = self.eval(first);
                for Operation { op, operand } in rest {
                    let rhs = self.eval(operand);
                    state = match op.as_str() {
                        "+" => state + rhs,
                        "-" => state - rhs,
                        "*" => state * rhs,
                        "/" => state / rhs,
                        _ => state.powf(rhs),
                    };
                }
                state
            }
            Expr::Bool { first, rest } => {
                let mut state = self.eval(first);
                for Operation { op, operand } in rest {
                    if state.is_nan() {
                        return f64::NAN;
                    }
                    let rhs = self.eval(operand);
                    if rhs.is_nan() {
                        return f64::NAN;
                    }
                    let truth = match op.as_str() {
                        "||" => state != 0.0 || rhs != 0.0,
                        "&&" => state != 0.0 && rhs != 0.0,
                        "!=" => state != rhs,
                        "==" => state == rhs,
                        ">=" => state >= rhs,
                        "<=" => state <= rhs,
                        ">" => state > rhs,
                        _ => state < rhs,
                    };
                    state = if truth { 1.0 } else { 0.0 };
                }
                state
            }
            Expr::Ternary { cond, left, right } => {
                let c = self.eval_text(cond);
                if c.is_nan() {
                    f64::NAN
                } else if c == 0.0 {
                    self.eval_text(right)
                } else {
                    self.eval_text(left)
                }
            }
            Expr::Assignment { name, rhs } => {
                let value = self.eval(rhs);
                tracing::trace!(%name, value, "parameter assignment");
                self.table.variables.insert(name.clone(), value);
                value
            }
            Expr::FuncDef { signature, body } => {
                let (name, formals) = split_call_text(signature);
                let formals = formals.unwrap_or_default();
                tracing::trace!(%name, ?formals, "function definition");
                self.table.function_bodies.insert(name.clone(), body.clone());
                self.table.function_formals.insert(name, formals);
                0.0
            }
            Expr::FuncCall(text) => self.eval_func_call(text),
            Expr::BuiltIn(text) => self.eval_builtin(text),
            Expr::Root(inner) => self.eval(inner),
        }
    }

    /// Re-enters the grammar on a captured substring. Lazy branches and
    /// call arguments come through here.
    fn eval_text(&mut self, text: &str) -> f64 {
        match grammar::parse(text, self.dialect) {
            Some(root) => self.eval(&root),
            None => {
                tracing::debug!(text, "expression fragment did not parse");
                f64::NAN
            }
        }
    }

    /// Calls a user-defined function.
    ///
    /// Arguments are evaluated in the caller's scope before the callee's
    /// formals are installed. Whatever happens afterwards, the caller's
    /// bindings for the formal names are restored on exit, including the
    /// absence of a binding.
    fn eval_func_call(&mut self, text: &str) -> f64 {
        let (name, args) = split_call_text(text);
        let args = match args {
            Some(args) => args,
            None => return f64::NAN,
        };
        let (formals, body) = match (
            self.table.function_formals.get(&name),
            self.table.function_bodies.get(&name),
        ) {
            (Some(f), Some(b)) => (f.clone(), b.clone()),
            _ => {
                tracing::debug!(%name, "call of undefined function");
                return f64::NAN;
            }
        };

        let values: Vec<f64> = args.iter().map(|a| self.eval_text(a)).collect();

        let mut saved: Vec<(String, Option<f64>)> = Vec::with_capacity(formals.len());
        for (formal, value) in formals.iter().zip(values.iter()) {
            saved.push((formal.clone(), self.table.variables.get(formal).copied()));
            self.table.variables.insert(formal.clone(), *value);
        }

        let result = if values.iter().any(|v| v.is_nan()) {
            f64::NAN
        } else {
            self.eval_text(&body)
        };

        for (formal, old) in saved {
            match old {
                Some(v) => {
                    self.table.variables.insert(formal, v);
                }
                None => {
                    self.table.variables.remove(&formal);
                }
            }
        }
        result
    }

    fn eval_builtin(&mut self, text: &str) -> f64 {
        let (name, args) = split_call_text(text);
        let args = match args {
            None => return builtin_constant(&name),
            Some(args) => args,
        };
        let values: Vec<f64> = args.iter().map(|a| self.eval_text(a)).collect();
        if values.iter().any(|v| v.is_nan()) {
            return f64::NAN;
        }
        let arg = |i: usize| values.get(i).copied().unwrap_or(f64::NAN);
        match name.to_ascii_lowercase().as_str() {
            "exp" => arg(0).exp(),
            "log" => arg(0).ln(),
            "log10" => arg(0).log10(),
            "sin" => arg(0).sin(),
            "cos" => arg(0).cos(),
            "tan" => arg(0).tan(),
            "asin" => arg(0).asin(),
            "acos" => arg(0).acos(),
            "atan" => arg(0).atan(),
            "sinh" => arg(0).sinh(),
            "cosh" => arg(0).cosh(),
            "tanh" => arg(0).tanh(),
            "sqrt" => arg(0).sqrt(),
            "abs" => arg(0).abs(),
            "int" => arg(0).trunc(),
            "min" => arg(0).min(arg(1)),
            "max" => arg(0).max(arg(1)),
            "pow" => arg(0).powf(arg(1).trunc()),
            "pwr" => {
                let mag = arg(0).abs().powf(arg(1));
                if arg(0) < 0.0 {
                    -mag
                } else {
                    mag
                }
            }
            "sgn" => {
                if arg(0) < 0.0 {
                    -1.0
                } else if arg(0) > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            "agauss" => {
                let variation = if values.len() >= 3 {
                    arg(1) / arg(2)
                } else {
                    arg(1)
                };
                arg(0) + variation * self.table.next_normal()
            }
            "aunif" => {
                let variation = if values.len() >= 3 {
                    arg(1) / arg(2)
                } else {
                    arg(1)
                };
                arg(0) + variation * (2.0 * self.table.next_uniform() - 1.0)
            }
            other => {
                tracing::debug!(name = other, "unknown built-in");
                f64::NAN
            }
        }
    }
}

fn builtin_constant(name: &str) -> f64 {
    use std::f64::consts;
    match name.to_ascii_uppercase().as_str() {
        "PI" | "M_PI" => consts::PI,
        "M_E" => consts::E,
        "M_LOG2E" => consts::LOG2_E,
        "M_LOG10E" => consts::LOG10_E,
        "M_LN2" => consts::LN_2,
        "M_LN10" => consts::LN_10,
        "M_PI_2" => consts::FRAC_PI_2,
        "M_PI_4" => consts::FRAC_PI_4,
        _ => f64::NAN,
    }
}

/// Converts a numeric literal to a double, applying the SI suffix table and
/// (in the Spectre profile) discarding a trailing unit letter.
///
/// `u` means 1e-6 and `x` means 1e6; the remaining letters follow standard
/// engineering notation. Letters outside the table (`T`, `c`) are ignored
/// numerically.
pub(crate) fn parse_number_literal(lit: &str, dialect: ExprDialect) -> f64 {
    let mut s = lit.trim();

    if dialect == ExprDialect::Spectre && s.len() > 1 {
        if let Some(last) = s.chars().last() {
            let tail = match last.to_ascii_lowercase() {
                'h' | 's' | 'v' => true,
                // 'f' alone is femto; it is a unit tail only after a suffix.
                'f' => s
                    .chars()
                    .rev()
                    .nth(1)
                    .is_some_and(|p| p.is_ascii_alphabetic()),
                _ => false,
            };
            if tail {
                s = &s[..s.len() - 1];
            }
        }
    }

    let exponent = s.chars().last().and_then(|c| match c.to_ascii_lowercase() {
        'a' => Some(-18),
        'f' => Some(-15),
        'p' => Some(-12),
        'n' => Some(-9),
        'u' => Some(-6),
        'm' => Some(-3),
        'k' => Some(3),
        'x' => Some(6),
        'g' => Some(9),
        _ => None,
    });

    let (body, exp) = match exponent {
        Some(e) => (&s[..s.len() - 1], e),
        None => (s.trim_end_matches(|c: char| c.is_ascii_alphabetic()), 0),
    };
    body.trim()
        .parse::<f64>()
        .map(|v| v * 10f64.powi(exp))
        .unwrap_or(f64::NAN)
}
