//! Multi-dialect SPICE netlist tokenizer.
//!
//! The translator core for SPICE-family circuit descriptions. Input is a
//! netlist in one of five source dialects (HSPICE, PSPICE, TSPICE,
//! Spectre, or the shared Xyce base); output is a stream of classified
//! tokens that downstream tooling consumes to emit a normalized netlist.
//!
//! Data flows bytes → physical lines → logical lines → per-dialect grammar
//! → one [`ParsedLine`] per statement. A line the grammar cannot place is
//! never fatal: the driver rewrites it as a dialect comment and keeps
//! going, recording a warning.
//!
//! Parameter values that must be numerically resolved during translation
//! (`.PARAM X=Y+3`) go through the expression sub-language in the
//! [`netexpr`] crate, re-exported here as [`expr`].
//!
//! ```
//! use netlist::{Dialect, Parser, TokenClass};
//!
//! let parsed = Parser::parse(Dialect::Xyce, "test circuit\nR1 a b 10k\n").unwrap();
//! let resistor = &parsed.lines[1];
//! assert_eq!(resistor.tokens[0].value, "R");
//! assert_eq!(resistor.tokens[0].classes, vec![TokenClass::DeviceId]);
//! ```

#![warn(missing_docs)]

pub mod driver;
pub mod grammar;
pub mod reader;
mod scan;
mod substr;
mod token;

pub use netexpr as expr;

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

pub use driver::{LineIssue, ParsedLine, ParsedNetlist, Parser, ParserError};
pub use grammar::hspice::HspiceGrammar;
pub use grammar::pspice::PspiceGrammar;
pub use grammar::spectre::SpectreGrammar;
pub use grammar::tspice::TspiceGrammar;
pub use grammar::xyce::XyceGrammar;
pub use grammar::Grammar;
pub use reader::{LogicalLine, NetlistLineReader, ReaderError};
pub use substr::{Substr, SubstrCharIndices, SubstrChars};
pub use token::{ParseTokenClassError, Token, TokenClass};

/// The netlist dialect to parse.
///
/// PSPICE and TSPICE fall back to the Xyce base grammar when their own
/// rules do not match; HSPICE and Spectre stand alone.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub enum Dialect {
    /// Synopsys HSPICE.
    Hspice,
    /// OrCAD/Cadence PSPICE.
    Pspice,
    /// Tanner T-Spice.
    Tspice,
    /// Cadence Spectre.
    Spectre,
    /// The base dialect shared by the SPICE family.
    ///
    /// Selected by default.
    #[default]
    Xyce,
}

/// An error parsing a [`Dialect`] from a string.
#[derive(Copy, Clone, Debug, Error)]
#[error("error parsing netlist dialect")]
pub struct ParseDialectError;

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hspice => write!(f, "hspice"),
            Self::Pspice => write!(f, "pspice"),
            Self::Tspice => write!(f, "tspice"),
            Self::Spectre => write!(f, "spectre"),
            Self::Xyce => write!(f, "xyce"),
        }
    }
}

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hspice" => Ok(Self::Hspice),
            "pspice" => Ok(Self::Pspice),
            "tspice" => Ok(Self::Tspice),
            "spectre" => Ok(Self::Spectre),
            "xyce" => Ok(Self::Xyce),
            _ => Err(ParseDialectError),
        }
    }
}

impl Dialect {
    /// The grammar implementing this dialect.
    pub fn grammar(&self) -> Box<dyn Grammar> {
        match self {
            Self::Hspice => Box::new(HspiceGrammar),
            Self::Pspice => Box::new(PspiceGrammar),
            Self::Tspice => Box::new(TspiceGrammar),
            Self::Spectre => Box::new(SpectreGrammar),
            Self::Xyce => Box::new(XyceGrammar),
        }
    }

    /// The expression-language profile used for parameter evaluation in
    /// this dialect.
    pub fn expr_dialect(&self) -> netexpr::ExprDialect {
        match self {
            Self::Spectre => netexpr::ExprDialect::Spectre,
            _ => netexpr::ExprDialect::Hspice,
        }
    }
}
