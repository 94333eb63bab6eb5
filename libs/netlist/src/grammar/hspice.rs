//! The HSPICE grammar.
//!
//! Stands alone: HSPICE has its own delimiter sets (quotes and stars are
//! not identifier characters, node names join segments with `.`), quoted
//! and bare expression forms, `.DATA` blocks whose bodies are raw numeric
//! rows, and `.IF/.ELSEIF/.ELSE/.ENDIF` conditionals. Device shapes match
//! the base grammar and are invoked from it with the HSPICE lexical
//! profile.

use crate::grammar::{run, xyce, Grammar, LineParser, Profile};
use crate::{Substr, Token, TokenClass};

use TokenClass::*;

/// The HSPICE netlist grammar.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HspiceGrammar;

impl Grammar for HspiceGrammar {
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>> {
        run(line, Profile::Hspice, netlist_line)
    }

    fn comment_prefix(&self) -> &'static str {
        "*"
    }

    fn dialect_name(&self) -> &'static str {
        "HSPICE"
    }
}

pub(crate) const COMMENT_PREFIXES: &[&str] = &["*", "//"];
pub(crate) const INLINE_COMMENT_PREFIXES: &[&str] = &["$", "*", "//"];

fn netlist_line(p: &mut LineParser) -> bool {
    p.attempt(|p| p.comment_token(COMMENT_PREFIXES))
        || p.attempt(|p| {
            (p.attempt(data_line) || p.attempt(xyce::analog_device) || p.attempt(directive))
                && p.opt(|p| {
                    p.opt_ws();
                    p.inline_comment_token(INLINE_COMMENT_PREFIXES)
                })
        })
}

/// A row of a `.DATA` block: bare numbers, nothing else.
fn data_line(p: &mut LineParser) -> bool {
    data_param_value(p) && p.many0(|p| p.ws() && data_param_value(p))
}

fn data_param_value(p: &mut LineParser) -> bool {
    match p.number_text() {
        Some(value) => {
            p.push(value, &[DataParamValue]);
            true
        }
        None => false,
    }
}

fn directive(p: &mut LineParser) -> bool {
    p.attempt(ac_dir)
        || p.attempt(data_dir)
        || p.attempt(xyce::dcvolt_dir)
        || p.attempt(dc_dir)
        || p.attempt(eom_dir)
        || p.attempt(|p| directive_type(p, ".ENDS") && opt_ends_value(p))
        || p.attempt(|p| directive_type(p, ".ENDL") && p.opt(|p| p.ws() && p.ident_token(&[LibEntry])))
        || p.attempt(|p| directive_type(p, ".ENDDATA"))
        || p.attempt(|p| directive_type(p, ".ENDIF"))
        || p.attempt(|p| directive_type(p, ".END"))
        || p.attempt(|p| {
            directive_type(p, ".GLOBAL_PARAM") && p.many1(|p| p.ws() && xyce::param_value_pair(p))
        })
        || p.attempt(|p| {
            directive_type(p, ".GLOBAL") && p.many0(|p| p.ws() && p.ident_token(&[GeneralNode]))
        })
        || p.attempt(|p| directive_type(p, ".HB") && p.ws() && p.ident_token(&[FundFreqValue]))
        || p.attempt(|p| {
            (directive_type(p, ".INCLUDE") || directive_type(p, ".INC"))
                && p.ws()
                && xyce::filename_token(p)
        })
        || p.attempt(ic_dir)
        || p.attempt(lib_dir)
        || p.attempt(|p| directive_type(p, ".LIN") && p.many0(|p| p.ws() && xyce::param_value_pair(p)))
        || p.attempt(measure_dir)
        || p.attempt(|p| xyce::model_dir(p))
        || p.attempt(xyce::four_dir)
        || p.attempt(nodeset_dir)
        || p.attempt(options_dir)
        || p.attempt(|p| directive_type(p, ".OP"))
        || p.attempt(print_dir)
        || p.attempt(param_dir)
        || p.attempt(|p| directive_type(p, ".SAVE") && p.many0(|p| p.ws() && xyce::param_value_pair(p)))
        || p.attempt(subckt_dir)
        || p.attempt(temp_dir)
        || p.attempt(tran_dir)
        || p.attempt(if_dir)
        || p.attempt(elseif_dir)
        || p.attempt(|p| directive_type(p, ".ELSE"))
}

fn directive_type(p: &mut LineParser, keyword: &str) -> bool {
    p.keyword_token(keyword, &[DirectiveType])
}

fn opt_ends_value(p: &mut LineParser) -> bool {
    p.opt(|p| p.ws() && xyce::param_value_token(p, &[ParamValue]))
}

fn data_table_name(p: &mut LineParser) -> bool {
    p.ident_token(&[DataTableName])
}

fn ac_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".AC")
            && p.ws()
            && p.cur.eat_lit_nocase("DATA").is_some()
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && data_table_name(p)
    }) || p.attempt(|p| {
        directive_type(p, ".AC")
            && p.ws()
            && xyce::sweep_type(p)
            && p.ws()
            && p.ident_token(&[PointsValue])
            && p.ws()
            && p.ident_token(&[StartFreqValue])
            && p.ws()
            && p.ident_token(&[EndFreqValue])
    })
}

fn data_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".DATA")
        && p.ws()
        && data_table_name(p)
        && p.many0(|p| p.ws() && p.ident_token(&[DataParamName]))
}

fn sweep_param(p: &mut LineParser) -> bool {
    p.ident_token(&[SweepParamValue])
}

fn sweep_value(p: &mut LineParser) -> bool {
    match p.number_text() {
        Some(value) => {
            p.push(value, &[SweepParamValue]);
            true
        }
        None => false,
    }
}

/// Silently consumes `KEYWORD [=]` before a sweep value.
fn sweep_kw(p: &mut LineParser, keyword: &str) -> bool {
    p.opt(|p| {
        p.cur.eat_lit_nocase(keyword).is_some()
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
    })
}

fn sweep_range(p: &mut LineParser) -> bool {
    sweep_kw(p, "START")
        && sweep_value(p)
        && p.ws()
        && sweep_kw(p, "STOP")
        && sweep_value(p)
        && p.ws()
        && sweep_kw(p, "STEP")
        && sweep_value(p)
}

fn dc_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".DC")
            && p.ws()
            && p.cur.eat_lit_nocase("DATA").is_some()
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && data_table_name(p)
    }) || p.attempt(|p| {
        // `param start stop step [SWEEP param [DEC|OCT|LIN] start stop step]`
        directive_type(p, ".DC")
            && p.ws()
            && sweep_param(p)
            && p.ws()
            && p.not(xyce::sweep_type)
            && sweep_range(p)
            && p.opt(|p| {
                p.ws()
                    && p.cur.eat_lit_nocase("SWEEP").is_some()
                    && p.ws()
                    && sweep_param(p)
                    && p.ws()
                    && (p.attempt(|p| {
                        xyce::sweep_type(p)
                            && p.ws()
                            && sweep_value(p)
                            && p.ws()
                            && sweep_value(p)
                            && p.ws()
                            && sweep_value(p)
                    }) || sweep_range(p))
            })
    }) || p.attempt(|p| {
        directive_type(p, ".DC")
            && p.ws()
            && sweep_param(p)
            && p.ws()
            && xyce::sweep_type(p)
            && p.ws()
            && sweep_value(p)
            && p.ws()
            && sweep_value(p)
            && p.ws()
            && sweep_value(p)
    })
}

fn eom_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".EOM") && opt_ends_value(p)
}

fn ic_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".INITCOND") || directive_type(p, ".IC")) && xyce::node_value_items(p)
}

fn nodeset_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".NODESET") && xyce::node_value_items(p)
}

fn lib_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".LIB")
            && p.ws()
            && xyce::filename_token(p)
            && p.ws()
            && p.ident_token(&[LibEntry])
    }) || p.attempt(|p| directive_type(p, ".LIB") && p.ws() && p.ident_token(&[LibEntry]))
}

fn if_cond(p: &mut LineParser) -> bool {
    match p.math_expression() {
        Some(value) => {
            p.push(value, &[ConditionalStatement]);
            true
        }
        None => false,
    }
}

fn if_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".IF") && p.ws() && if_cond(p)
}

fn elseif_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".ELSEIF") && p.ws() && if_cond(p)
}

fn measure_dir(p: &mut LineParser) -> bool {
    xyce::measure_dir(p)
}

fn options_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".OPTIONS") || directive_type(p, ".OPTION"))
        && p.many0(|p| p.ws() && xyce::param_value_pair(p))
}

/// `.PARAM` admits both plain pairs and function definitions
/// (`f(a, b) = 'expr'`).
fn param_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PARAM")
        && p.many0(|p| {
            p.ws()
                && (p.attempt(function_expression) || xyce::param_value_pair(p))
                && p.opt(|p| p.cur.eat_char(','))
        })
}

fn function_expression(p: &mut LineParser) -> bool {
    p.ident_token(&[FuncNameValue])
        && p.opt_ws()
        && p.cur.eat_char('(')
        && p.opt(|p| {
            p.opt_ws();
            if !p.ident_token(&[FuncArgValue]) {
                return false;
            }
            p.many0(|p| {
                p.opt_ws();
                p.cur.eat_char(',') && p.opt_ws() && p.ident_token(&[FuncArgValue])
            });
            p.opt_ws();
            true
        })
        && p.cur.eat_char(')')
        && p.opt_ws()
        && p.cur.eat_char('=')
        && p.opt_ws()
        && func_expression_token(p)
}

fn func_expression_token(p: &mut LineParser) -> bool {
    match p.math_expression() {
        Some(value) => {
            p.push(value, &[FuncExpression]);
            true
        }
        None => false,
    }
}

/// `.PRINT`/`.PROBE` with `PAR('expr')` output expressions.
fn print_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".PRINT") || directive_type(p, ".PROBE"))
        && p.ws()
        && xyce::analysis_type(p)
        && p.many0(|p| {
            p.ws() && (p.attempt(par_output) || xyce::output_variable(p))
        })
}

fn par_output(p: &mut LineParser) -> bool {
    // An optional `name =` prefix is consumed without classification;
    // only the expression inside PAR(...) is an output variable.
    p.opt(|p| {
        p.identifier().is_some() && p.opt_ws() && p.cur.eat_char('=') && p.opt_ws()
    });
    if p.cur.eat_lit_nocase("PAR").is_none() || !p.cur.eat_char('(') {
        return false;
    }
    let ok = match p.math_expression() {
        Some(value) => {
            p.push(value, &[OutputVariable]);
            true
        }
        None => false,
    };
    ok && p.cur.eat_char(')')
}

fn subckt_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".SUBCKT") || directive_type(p, ".MACRO"))
        && p.ws()
        && p.ident_token(&[DeviceName])
        && p.opt_ws()
        && p.opt(|p| p.cur.eat_char('('))
        && p.many1(|p| {
            p.opt_ws();
            p.not(xyce::param_value_pair) && subckt_directive_param_value(p)
        })
        && p.opt_ws()
        && p.opt(|p| p.cur.eat_char(')'))
        && p.many0(|p| {
            p.opt_ws();
            xyce::param_value_pair(p)
        })
}

fn subckt_directive_param_value(p: &mut LineParser) -> bool {
    match p.node_identifier() {
        Some(value) => {
            p.push(value, &[SubcktDirectiveParamValue]);
            true
        }
        None => false,
    }
}

fn temp_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".TEMPERATURE") || directive_type(p, ".TEMP"))
        && p.many0(|p| p.ws() && p.expr_or_ident_token(&[ListParamValue]))
}

fn tran_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".TRAN") || directive_type(p, ".TR"))
        && p.ws()
        && p.expr_or_ident_token(&[PrintStepValue])
        && p.ws()
        && p.expr_or_ident_token(&[FinalTimeValue])
        && p.opt(|p| {
            p.ws()
                && p.not(|p| p.keyword_token("UIC", &[UicValue]))
                && p.cur.eat_lit_nocase("START").is_some()
                && p.cur.eat_char('=')
                && p.expr_or_ident_token(&[StartTimeValue])
        })
        && p.opt(|p| p.ws() && p.keyword_token("UIC", &[UicValue]))
        && p.opt(|p| {
            p.ws()
                && p.cur.eat_lit_nocase("SWEEP").is_some()
                && p.ws()
                && p.cur.eat_lit_nocase("DATA").is_some()
                && p.opt_ws()
                && p.cur.eat_char('=')
                && p.opt_ws()
                && data_table_name(p)
        })
}
