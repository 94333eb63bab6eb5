//! The TSPICE (Tanner) grammar.
//!
//! Extends the base grammar by delegation. TSPICE renames `.SUBCKT`/`.ENDS`
//! to `.MACRO`/`.EOM`, reworks several analysis directives, uses `;` as an
//! additional comment leader, and carries a long tail of Tanner-only
//! directives that are retained verbatim.

use crate::grammar::{run, xyce, Grammar, LineParser, Profile};
use crate::{Substr, Token, TokenClass};

use TokenClass::*;

/// The TSPICE netlist grammar.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TspiceGrammar;

impl Grammar for TspiceGrammar {
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>> {
        run(line, Profile::Xyce, tspice_start)
    }

    fn comment_prefix(&self) -> &'static str {
        "*"
    }

    fn dialect_name(&self) -> &'static str {
        "TSPICE"
    }
}

pub(crate) const COMMENT_PREFIXES: &[&str] = &[";", "*", "$"];
pub(crate) const INLINE_COMMENT_PREFIXES: &[&str] = &[";", "$"];

fn tspice_start(p: &mut LineParser) -> bool {
    p.attempt(|p| p.comment_token(COMMENT_PREFIXES))
        || p.attempt(|p| {
            directive(p)
                && p.opt(|p| {
                    p.opt_ws();
                    p.inline_comment_token(INLINE_COMMENT_PREFIXES)
                })
        })
        || xyce::netlist_line(p)
}

fn directive(p: &mut LineParser) -> bool {
    p.attempt(lib_dir)
        || p.attempt(subckt_dir)
        || p.attempt(ends_dir)
        || p.attempt(ac_dir)
        || p.attempt(dc_dir)
        || p.attempt(ic_dir)
        || p.attempt(nodeset_dir)
        || p.attempt(print_dir)
        || p.attempt(four_dir)
        || p.attempt(options_dir)
        || p.attempt(measure_dir)
        || p.attempt(step_dir)
        || p.attempt(unsupported_dir)
        || p.attempt(xyce::directive)
}

fn directive_type(p: &mut LineParser, keyword: &str) -> bool {
    p.keyword_token(keyword, &[DirectiveType])
}

fn analysis_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(&["DC", "AC", "TRAN", "NOISE"], &[AnalysisType])
}

fn measurement_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(
        &[
            "AVG",
            "AMAX",
            "AMIN",
            "DERIVATIVE",
            "ERR1",
            "ERR2",
            "ERR3",
            "ERR",
            "FIND",
            "INTEGRAL",
            "MAX",
            "MIN",
            "PP",
            "RMS",
            "TARG",
            "TRIG",
            "WHEN",
        ],
        &[AnalysisType],
    )
}

/// TSPICE output variables: terminal-suffixed probes (`id(m1)`,
/// `q4(x1)`), noise shorthands, waveform expressions quoting `time()` or
/// `frequency()`, and bare identifiers.
fn output_variable(p: &mut LineParser) -> bool {
    if let Some(value) = p.capture(output_variable_expression) {
        p.push(value, &[OutputVariable]);
        return true;
    }
    p.ident_token(&[OutputVariable])
}

fn output_variable_expression(p: &mut LineParser) -> bool {
    const PREFIXES: &[&str] = &["IDB", "II", "IM", "IR", "IP", "VM", "VR", "VI", "VP", "VDB", "DN"];
    for prefix in PREFIXES {
        if p.attempt(|p| p.cur.eat_lit_nocase(prefix).is_some() && probe_args(p)) {
            return true;
        }
    }
    // Terminal-subscripted probes: i/q followed by a terminal letter or
    // lead digit.
    if p.attempt(|p| {
        (p.cur.eat_lit_nocase("I").is_some() || p.cur.eat_lit_nocase("Q").is_some())
            && p.cur
                .take_while1(|c| "BbCcDdEeGgNnPpSs1234".contains(c))
                .is_some()
            && probe_args(p)
    }) {
        return true;
    }
    for prefix in ["I", "P", "Q", "V"] {
        if p.attempt(|p| p.cur.eat_lit_nocase(prefix).is_some() && probe_args(p)) {
            return true;
        }
    }
    for word in ["INOISE", "ONOISE"] {
        if p.attempt(|p| {
            p.cur.eat_lit_nocase(word).is_some()
                && p.opt(|p| {
                    p.cur.eat_char('(')
                        && p.opt_ws()
                        && (p.cur.eat_lit_nocase("DB").is_some()
                            || p.cur.eat_lit_nocase("TOT").is_some())
                        && p.opt_ws()
                        && p.cur.eat_char(')')
                })
        }) {
            return true;
        }
    }
    if p.cur.eat_lit_nocase("TRANSFER").is_some() {
        return true;
    }
    // Quoted waveform expressions referencing time() or frequency().
    p.attempt(|p| {
        if !p.cur.eat_char('\'') {
            return false;
        }
        let body = p.cur.take_while(|c| c != '\'');
        let known = body.contains("time()") || body.contains("frequency()");
        known && p.cur.eat_char('\'')
    })
}

fn probe_args(p: &mut LineParser) -> bool {
    if !p.cur.eat_char('(') {
        return false;
    }
    p.opt_ws();
    if p.identifier().is_none() {
        return false;
    }
    p.opt(|p| {
        p.opt_ws();
        p.cur.eat_char(',') && p.opt_ws() && p.identifier().is_some()
    });
    p.opt_ws();
    p.cur.eat_char(')')
}

fn lib_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".LIB") && p.ws() && xyce::filename_token(p)
}

fn subckt_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".SUBCKT") || directive_type(p, ".MACRO"))
        && p.ws()
        && p.ident_token(&[DeviceName])
        && p.many1(|p| {
            p.ws()
                && p.not(xyce::param_value_pair)
                && p.not(xyce::params_set_type)
                && p.expr_or_ident_token(&[SubcktDirectiveParamValue])
        })
        && p.opt(|p| p.ws() && xyce::params_set_type(p))
        && p.many0(|p| p.ws() && xyce::param_value_pair(p))
}

fn ends_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".ENDS") || directive_type(p, ".EOM"))
        && p.opt(|p| p.ws() && xyce::param_value_token(p, &[ParamValue]))
}

/// Xyce supports only the LIN/DEC/OCT sweep; anything else rides along as
/// rest-of-line so the translator can warn.
fn ac_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".AC")
            && p.ws()
            && xyce::sweep_type(p)
            && p.ws()
            && p.ident_token(&[PointsValue])
            && p.ws()
            && p.ident_token(&[StartFreqValue])
            && p.ws()
            && p.ident_token(&[EndFreqValue])
            && p.rest_of_line_token()
    }) || p.attempt(|p| directive_type(p, ".AC") && p.rest_of_line_token())
}

fn dc_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".DC")
        && p.ws()
        && p.ident_token(&[FreqValue])
        && p.many0(|p| p.ws() && output_variable(p))
        && p.rest_of_line_token()
}

fn ic_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".IC")
            && p.many1(|p| {
                p.attempt(|p| {
                    if !p.ws() {
                        return false;
                    }
                    p.opt(|p| p.keyword_token("V", &[Voltage]));
                    p.opt_ws();
                    p.opt(|p| p.cur.eat_char('('));
                    p.opt_ws();
                    if !p.ident_token(&[GeneralNode]) {
                        return false;
                    }
                    p.opt_ws();
                    // Inductor-current form names two nodes.
                    p.opt(|p| {
                        p.cur.eat_char(',') && p.opt_ws() && p.ident_token(&[GeneralNode])
                    });
                    p.opt(|p| p.cur.eat_char(')'));
                    p.opt_ws();
                    if !p.cur.eat_char('=') {
                        return false;
                    }
                    p.opt_ws();
                    if !p.expr_or_ident_token(&[GeneralValue]) {
                        return false;
                    }
                    p.opt(|p| p.cur.eat_char(','));
                    true
                })
            })
    }) || p.attempt(|p| directive_type(p, ".IC") && p.rest_of_line_token())
}

/// TSPICE allows several node assignments per line, comma-separated.
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
                if !p.ident_token(&[GeneralNode]) {
                    return false;
                }
                p.opt_ws();
                p.opt(|p| p.cur.eat_char(')'));
                p.opt_ws();
                p.opt(|p| p.cur.eat_char('='));
                p.opt_ws();
                if !p.expr_or_ident_token(&[GeneralValue]) {
                    return false;
                }
                p.opt_ws();
                p.opt(|p| p.cur.eat_char(','));
                true
            })
        })
}

fn print_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PRINT")
        && p.ws()
        && analysis_type(p)
        && p.many0(|p| p.ws() && xyce::param_value_pair(p))
        && p.many0(|p| p.ws() && output_variable(p))
}

fn four_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".FOUR")
        && p.ws()
        && p.ident_token(&[FreqValue])
        && p.many0(|p| p.ws() && output_variable(p))
        && p.many0(|p| p.ws() && xyce::param_value_pair(p))
}

fn options_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".OPTIONS") && p.many1(|p| p.ws() && xyce::param_value_pair(p))
}

fn measure_dir(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        (directive_type(p, ".MEASURE") || directive_type(p, ".MEAS"))
            && p.ws()
            && analysis_type(p)
            && p.ws()
            && p.ident_token(&[ResultNameValue])
    };
    p.attempt(|p| {
        header(p)
            && p.many1(|p| {
                p.ws()
                    && measurement_type(p)
                    && p.many1(|p| {
                        p.ws()
                            && output_variable(p)
                            && p.opt(|p| {
                                p.cur.eat_char('=') && xyce::param_value_token(p, &[ParamValue])
                            })
                    })
            })
            && p.many0(|p| p.ws() && xyce::param_value_pair(p))
    }) || p.attempt(|p| {
        header(p)
            && p.ws()
            && measurement_type(p)
            && p.ws()
            && xyce::param_value_token(p, &[ParamValue])
            && p.ws()
            && measurement_type(p)
            && output_variable(p)
            && p.many0(|p| p.ws() && xyce::param_value_pair(p))
    })
}

fn step_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".STEP")
            && p.many1(|p| p.ws() && p.expr_or_ident_token(&[SweepParamValue]))
    }) || p.attempt(|p| directive_type(p, ".STEP") && p.rest_of_line_token())
}

/// Tanner-only directives retained verbatim.
fn unsupported_dir(p: &mut LineParser) -> bool {
    const TYPES: &[&str] = &[
        ".ACMODEL",
        ".ALTER",
        ".ASSERT",
        ".CHECKPOINT",
        ".CONNECT",
        ".DATA",
        ".ENDDATA",
        ".DEL LIB",
        ".ELSEIF",
        ".ELSE",
        ".ENDIF",
        ".GRIDSIZE",
        ".HDL",
        ".IF",
        ".LOAD",
        ".MALIAS",
        ".OPTGOAL",
        ".OPTIMIZE",
        ".PARAMLIMITS",
        ".POWER",
        ".PROBE",
        ".PROTECT",
        ".SAVEBIAS",
        ".TABLE",
        ".TEMP",
        ".TF",
        ".UNPROTECT",
        ".VECTOR",
        ".VRANGE",
        ".WARN",
    ];
    for ty in TYPES {
        if p.attempt(|p| directive_type(p, ty) && p.rest_of_line_token()) {
            return true;
        }
    }
    false
}
