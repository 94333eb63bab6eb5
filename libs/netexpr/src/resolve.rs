//! Fixpoint resolution of out-of-order parameter definitions.
//!
//! Netlists routinely reference parameters before they are defined, so a
//! single evaluation pass leaves NaN holes. The resolver re-evaluates the
//! NaN set until it stops shrinking, then reports the stragglers.

use std::fmt::Display;

use diagnostics::{Diagnostic, IssueSet};

use crate::{strip_expr_delimiters, ExprDialect, SymbolTable};

/// A parameter assignment awaiting numeric resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingParam {
    /// The parameter name.
    pub name: String,
    /// The right-hand side text, possibly `{}`- or quote-delimited.
    pub rhs: String,
}

impl PendingParam {
    /// Creates a pending parameter assignment.
    pub fn new(name: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rhs: rhs.into(),
        }
    }
}

/// A parameter that stayed NaN once resolution reached a fixpoint.
#[derive(Clone, Debug)]
pub struct ResolveIssue {
    /// The parameter name.
    pub name: String,
    /// The unresolvable right-hand side.
    pub rhs: String,
}

impl Display for ResolveIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parameter `{}` did not resolve to a number: {}",
            self.name, self.rhs
        )
    }
}

impl Diagnostic for ResolveIssue {}

/// Evaluates `params` against `table` until the set of NaN results
/// stabilizes. Parameters that resolve are stored in `table.variables`;
/// parameters still NaN at the fixpoint are reported to `issues` and left
/// unbound. Returns the number of parameters resolved.
pub fn resolve_params(
    params: &[PendingParam],
    dialect: ExprDialect,
    table: &mut SymbolTable,
    issues: &mut IssueSet<ResolveIssue>,
) -> usize {
    let mut unresolved: Vec<&PendingParam> = params.iter().collect();
    let mut resolved = 0;
    loop {
        let before = unresolved.len();
        let mut still = Vec::new();
        for param in unresolved {
            let rhs = strip_expr_delimiters(&param.rhs);
            let value = crate::process_input(rhs, dialect, table);
            if value.is_nan() {
                still.push(param);
            } else {
                table.variables.insert(param.name.clone(), value);
                resolved += 1;
            }
        }
        unresolved = still;
        if unresolved.is_empty() || unresolved.len() == before {
            break;
        }
    }
    for param in unresolved {
        issues.add(ResolveIssue {
            name: param.name.clone(),
            rhs: param.rhs.clone(),
        });
    }
    resolved
}
