//! Issue collection for a netlist translation run.
//!
//! Nothing in the translator aborts on a bad input line: lines the grammar
//! cannot place are rewritten as comments, and parameters that never
//! resolve stay NaN. What happened is recorded here instead. An issue is
//! emitted through `tracing` the moment it is recorded, at the level
//! matching its severity, and kept so the driver can count and re-render
//! issues once the run finishes.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// An issue worth reporting to the user of a translation run.
pub trait Diagnostic: Debug + Display {
    /// How serious the issue is.
    ///
    /// Defaults to [`Severity::Warning`], the common case for retained
    /// lines and unresolved parameters.
    fn severity(&self) -> Severity {
        Severity::default()
    }
}

/// Severity of a recorded issue.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    /// Worth knowing; requires no action.
    Info,
    /// The input was altered (a line was retained as a comment, a
    /// parameter stayed unresolved) but translation continued.
    #[default]
    Warning,
    /// The translation itself misbehaved, e.g. a comment fallback that
    /// did not parse.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The issues recorded during one translation run, oldest first.
#[derive(Clone, Debug)]
pub struct IssueSet<T> {
    issues: Vec<T>,
}

impl<T> IssueSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// The recorded issues, in the order they happened.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.issues.iter()
    }

    /// The number of recorded issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl<T: Diagnostic> IssueSet<T> {
    /// Records `issue`, logging it at the `tracing` level matching its
    /// severity.
    pub fn add(&mut self, issue: T) {
        match issue.severity() {
            Severity::Info => tracing::info!("{issue}"),
            Severity::Warning => tracing::warn!("{issue}"),
            Severity::Error => tracing::error!("{issue}"),
        }
        self.issues.push(issue);
    }

    /// How many recorded issues carry the given severity.
    pub fn count_of(&self, severity: Severity) -> usize {
        self.iter().filter(|i| i.severity() == severity).count()
    }

    /// The number of warnings recorded.
    pub fn num_warnings(&self) -> usize {
        self.count_of(Severity::Warning)
    }

    /// The number of errors recorded.
    pub fn num_errors(&self) -> usize {
        self.count_of(Severity::Error)
    }

    /// Returns `true` if any warning has been recorded.
    pub fn has_warning(&self) -> bool {
        self.num_warnings() > 0
    }

    /// Returns `true` if any error has been recorded.
    pub fn has_error(&self) -> bool {
        self.num_errors() > 0
    }
}

impl<T> Default for IssueSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Diagnostic> Display for IssueSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in self.issues.iter() {
            writeln!(f, "{}: {}", issue.severity(), issue)?;
        }
        Ok(())
    }
}
