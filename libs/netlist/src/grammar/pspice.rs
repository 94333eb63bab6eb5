//! The PSPICE grammar.
//!
//! Extends the base grammar by delegation: PSPICE-specific directives are
//! tried first and everything else falls through to the base netlist line.
//! PSPICE's additions are mostly in the output layer (`.PROBE`, richer
//! output-variable forms with brackets and `alias(...)`) plus a catalogue
//! of directives the translator retains verbatim.

use crate::grammar::{run, xyce, Grammar, LineParser, Profile};
use crate::{Substr, Token, TokenClass};

use TokenClass::*;

/// The PSPICE netlist grammar.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PspiceGrammar;

impl Grammar for PspiceGrammar {
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>> {
        run(line, Profile::Xyce, pspice_start)
    }

    fn comment_prefix(&self) -> &'static str {
        "*"
    }

    fn dialect_name(&self) -> &'static str {
        "PSPICE"
    }
}

fn pspice_start(p: &mut LineParser) -> bool {
    p.attempt(|p| directive(p) && xyce::trailing_inline_comment(p)) || xyce::netlist_line(p)
}

fn directive(p: &mut LineParser) -> bool {
    p.attempt(probe64_dir)
        || p.attempt(lib_dir)
        || p.attempt(options_dir)
        || p.attempt(print_dir)
        || p.attempt(probe_dir)
        || p.attempt(temp_dir)
        || p.attempt(tran_dir)
        || p.attempt(nodeset_dir)
        || p.attempt(unsupported_dir)
}

fn directive_type(p: &mut LineParser, keyword: &str) -> bool {
    p.keyword_token(keyword, &[DirectiveType])
}

/// Output variables admit device-terminal suffixes (`VB`, `ID`, ...),
/// square-bracketed nodes, and `alias(...)` wrappers.
fn output_variable(p: &mut LineParser) -> bool {
    match p.capture(output_variable_expression) {
        Some(value) => {
            p.push(value, &[OutputVariable]);
            true
        }
        None => false,
    }
}

fn output_variable_expression(p: &mut LineParser) -> bool {
    // Two-node form first so `V(a,b)` is not split by the suffix forms.
    if p.attempt(|p| {
        p.cur.eat_lit_nocase("V").is_some()
            && p.cur.eat_char('(')
            && p.opt(|p| p.cur.eat_char('['))
            && p.identifier().is_some()
            && p.cur.eat_char(',')
            && p.identifier().is_some()
            && p.opt(|p| p.cur.eat_char(']'))
            && p.cur.eat_char(')')
    }) {
        return true;
    }
    const PREFIXES: &[&str] = &[
        "NOISE", "VBE", "VB", "VD", "VG", "VS", "VA", "IB", "ID", "IG", "IS", "IA", "V", "I",
        "D", "W", "N",
    ];
    for prefix in PREFIXES {
        if p.attempt(|p| p.cur.eat_lit_nocase(prefix).is_some() && output_variable_node(p)) {
            return true;
        }
    }
    // Lead currents: I<digit>(node).
    p.attempt(|p| {
        p.cur.eat_lit_nocase("I").is_some()
            && p.cur.take_while1(|c| c.is_ascii_digit()).is_some()
            && output_variable_node(p)
    })
}

/// `( [ node ] )` where the node may be wrapped in `alias(...)`; the alias
/// wrapper is a schematic-capture artifact and is not classified.
fn output_variable_node(p: &mut LineParser) -> bool {
    if !p.cur.eat_char('(') {
        return false;
    }
    p.opt(|p| p.cur.eat_char('['));
    let inner = p.attempt(|p| {
        p.opt_ws();
        p.cur.eat_lit_nocase("ALIAS").is_some()
            && p.cur.eat_char('(')
            && p.opt_ws()
            && p.identifier().is_some()
            && p.opt_ws()
            && p.cur.eat_char(')')
            && p.opt_ws()
    }) || p.attempt(|p| {
        p.opt_ws();
        p.identifier().is_some() && p.opt_ws()
    });
    if !inner {
        return false;
    }
    p.opt(|p| p.cur.eat_char(']'));
    p.cur.eat_char(')')
}

fn lib_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".LIB") && p.ws() && xyce::filename_token(p)
}

fn options_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".OPTIONS") && p.many1(|p| p.ws() && xyce::param_value_pair(p))
    }) || p.attempt(|p| {
        directive_type(p, ".OPTIONS") && p.ws() && p.ident_token(&[DefaultParamName])
    })
}

fn print_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PRINT")
        && p.ws()
        && xyce::analysis_type(p)
        && p.many0(|p| {
            p.ws() && p.not(output_variable) && xyce::param_value_pair(p)
        })
        && p.many1(|p| p.ws() && output_variable(p))
}

fn probe_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PROBE")
        && p.opt(|p| p.keyword_token("/CSDF", &[ParamValue]))
        && p.many0(|p| p.ws() && output_variable(p))
}

fn probe64_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PROBE64") && p.many0(|p| p.ws() && output_variable(p))
}

fn temp_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".TEMP") && p.many0(|p| p.ws() && p.expr_or_ident_token(&[ListParamValue]))
}

fn tran_dir(p: &mut LineParser) -> bool {
    (p.keyword_token(".TRAN", &[DirectiveType]) || p.keyword_token(".TR", &[DirectiveType]))
        && p.opt(|p| p.keyword_token("/OP", &[ParamValue]))
        && p.ws()
        && p.expr_or_ident_token(&[PrintStepValue])
        && p.ws()
        && p.expr_or_ident_token(&[FinalTimeValue])
        && p.opt(|p| {
            p.ws()
                && p.expr_or_ident_token(&[StartTimeValue])
                && p.opt(|p| p.ws() && p.expr_or_ident_token(&[StepCeilingValue]))
        })
}

/// `.NODESET` with optional square brackets around node names.
fn nodeset_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".NODESET")
        && p.many1(|p| {
            p.attempt(|p| {
                if !p.ws() {
                    return false;
                }
                p.opt(|p| p.keyword_token("V", &[Voltage]));
                p.opt_ws();
                p.opt(|p| p.cur.eat_char('('));
                p.opt_ws();
                p.opt(|p| p.cur.eat_char('['));
                p.opt_ws();
                if !p.ident_token(&[GeneralNode]) {
                    return false;
                }
                p.opt_ws();
                p.opt(|p| p.cur.eat_char(']'));
                p.opt_ws();
                p.opt(|p| p.cur.eat_char(')'));
                p.opt_ws();
                p.opt(|p| p.cur.eat_char('='));
                p.opt_ws();
                p.expr_or_ident_token(&[GeneralValue])
            })
        })
}

/// Directives retained verbatim for the downstream translator.
fn unsupported_dir(p: &mut LineParser) -> bool {
    const TYPES: &[&str] = &[
        ".ALIASES",
        ".AUTOCONVERGE",
        ".DISTRIBUTION",
        ".ENDALIASES",
        ".LOADBIAS",
        ".MC",
        ".NOISE",
        ".PLOT",
        ".SAVEBIAS",
        ".STIMULUS",
        ".TEXT",
        ".TF",
        ".VECTOR",
        ".WATCH",
        ".WCASE",
    ];
    for ty in TYPES {
        if p.attempt(|p| directive_type(p, ty) && p.rest_of_line_token()) {
            return true;
        }
    }
    false
}
