//! The Spectre grammar.
//!
//! Syntactically distinct from the SPICE family: device statements read
//! `name (node node ...) master param=value ...` with the master named by a
//! keyword rather than a letter prefix, blocks are delimited by curly
//! braces, and comments open with `//`. Statement keywords the translator
//! does not model are retained verbatim as rest-of-line.
//!
//! Statistics blocks are not handled here; the driver comments them out
//! before the grammar ever sees them, tracking nested braces in its
//! `bracket_count` state.

use crate::grammar::{run, Grammar, LineParser, Profile};
use crate::{Substr, Token, TokenClass};

use TokenClass::*;

/// The Spectre netlist grammar.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SpectreGrammar;

impl Grammar for SpectreGrammar {
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>> {
        run(line, Profile::Spectre, spectre_line)
    }

    fn comment_prefix(&self) -> &'static str {
        "//"
    }

    fn dialect_name(&self) -> &'static str {
        "Spectre"
    }
}

pub(crate) const COMMENT_PREFIXES: &[&str] = &["//", "*"];
pub(crate) const INLINE_COMMENT_PREFIXES: &[&str] = &["//"];

fn spectre_line(p: &mut LineParser) -> bool {
    p.attempt(|p| p.comment_token(COMMENT_PREFIXES))
        || p.attempt(|p| {
            (p.attempt(directive) || p.attempt(device))
                && p.opt(|p| {
                    p.opt_ws();
                    p.inline_comment_token(INLINE_COMMENT_PREFIXES)
                })
        })
        || p.attempt(|p| {
            line_fragment(p) && p.opt_ws() && p.inline_comment_token(INLINE_COMMENT_PREFIXES)
        })
}

/// Raw text up to a `//` comment; only valid when the comment follows.
fn line_fragment(p: &mut LineParser) -> bool {
    let m = p.cur.mark();
    loop {
        if p.cur.rest().starts_with("//") || p.cur.at_end() {
            break;
        }
        p.cur.take1();
    }
    let frag = p.cur.span_since(&m);
    if frag.trim().is_empty() {
        return false;
    }
    p.push(frag, &[RestOfLine]);
    true
}

// TERMINALS

/// A statement keyword must not run into a longer identifier.
fn keyword(p: &mut LineParser, kw: &str, classes: &[TokenClass]) -> bool {
    p.attempt(|p| {
        if !p.keyword_token(kw, classes) {
            return false;
        }
        p.not(|p| p.identifier().is_some())
    })
}

/// Consumes a keyword without emitting a token.
fn silent_keyword(p: &mut LineParser, kw: &str) -> bool {
    p.attempt(|p| p.cur.eat_lit_nocase(kw).is_some() && p.not(|p| p.identifier().is_some()))
}

fn devname(p: &mut LineParser) -> bool {
    p.ident_token(&[DeviceName])
}

fn general_node(p: &mut LineParser) -> bool {
    p.ident_token(&[GeneralNode])
}

fn math_op(p: &mut LineParser) -> bool {
    if p.cur.rest().starts_with("//") {
        return false;
    }
    p.cur.take_while1(|c| "+-/*,!=<>?:|&".contains(c)).is_some()
}

fn math_component(p: &mut LineParser) -> bool {
    if p.attempt(paren_group) {
        return true;
    }
    let _ = p.cur.eat_char('+') || p.cur.eat_char('-');
    p.cur
        .take_while1(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        .is_some()
}

fn paren_group(p: &mut LineParser) -> bool {
    if !p.cur.eat_char('(') {
        return false;
    }
    let mut parts = 0;
    loop {
        if p.cur.peek() == Some('(') {
            if !p.attempt(paren_group) {
                break;
            }
            parts += 1;
        } else if p
            .cur
            .take_while1(|c| c.is_ascii_alphanumeric() || ".+-/*,_=<> \t!|$&?:".contains(c))
            .is_some()
        {
            parts += 1;
        } else {
            break;
        }
    }
    parts > 0 && p.cur.eat_char(')')
}

/// An undelimited expression: components joined by operators, whitespace
/// tolerated around the operators.
fn math_text(p: &mut LineParser) -> Option<Substr> {
    p.capture(|p| {
        if !math_component(p) {
            return false;
        }
        while p.attempt(|p| {
            p.opt_ws();
            math_op(p) && {
                p.opt_ws();
                math_component(p)
            }
        }) {}
        true
    })
}

/// `[ v v v ]` array parameter values.
fn bracket_param(p: &mut LineParser) -> Option<Substr> {
    p.capture(|p| {
        if !p.cur.eat_char('[') {
            return false;
        }
        if !p.many1(|p| {
            p.opt_ws();
            p.cur
                .take_while1(|c| c.is_ascii_alphanumeric() || ".+-/*()_".contains(c))
                .is_some()
        }) {
            return false;
        }
        p.opt_ws();
        p.cur.eat_char(']')
    })
}

fn param_value(p: &mut LineParser) -> bool {
    if let Some(value) = bracket_param(p) {
        p.push(value, &[ParamValue]);
        return true;
    }
    if let Some(value) = math_text(p) {
        p.push(value, &[ParamValue]);
        return true;
    }
    p.ident_token(&[ParamValue])
}

fn transient_ref_name(p: &mut LineParser) -> bool {
    if let Some(value) = math_text(p) {
        p.push(value, &[TransRefName]);
        return true;
    }
    p.ident_token(&[TransRefName])
}

pub(crate) fn param_value_pair(p: &mut LineParser) -> bool {
    // `wave = [ t v t v ... ]`
    p.attempt(|p| {
        p.keyword_token("wave", &[ParamName])
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && p.cur.eat_char('[')
            && p.many1(|p| {
                p.opt_ws();
                transient_ref_name(p)
            })
            && p.opt_ws()
            && p.cur.eat_char(']')
    }) || p.attempt(|p| {
        p.ident_token(&[ParamName])
            && p.opt_ws()
            && p.not(|p| p.inline_comment_token(INLINE_COMMENT_PREFIXES))
            && p.cur.eat_char('=')
            && p.opt_ws()
            && param_value(p)
            && p.opt(|p| p.cur.eat_char(',') && param_value(p))
    })
}

fn named_params_tail(p: &mut LineParser) -> bool {
    p.many0(|p| p.ws() && param_value_pair(p))
}

// DEVICES

fn device(p: &mut LineParser) -> bool {
    p.attempt(bsource)
        || p.attempt(|p| two_node_device(p, "capacitor"))
        || p.attempt(|p| two_node_device(p, "resistor"))
        || p.attempt(|p| two_node_device(p, "inductor"))
        || p.attempt(mutual_inductor)
        || p.attempt(|p| two_node_device(p, "diode"))
        || p.attempt(|p| three_node_device(p, "gaas"))
        || p.attempt(|p| three_node_device(p, "jfet"))
        || p.attempt(tline)
        || p.attempt(|p| controlled_source(p, "vcvs"))
        || p.attempt(|p| controlled_source(p, "vccs"))
        || p.attempt(port)
        || p.attempt(|p| controlled_source(p, "pvcvs"))
        || p.attempt(|p| controlled_source(p, "pvccs"))
        || p.attempt(|p| independent_source(p, "vsource"))
        || p.attempt(|p| independent_source(p, "isource"))
        || p.attempt(unknown_device)
}

/// Node lists are parenthesized or bare; both whitespace-separated.
fn node_list(p: &mut LineParser, classes: &[&[TokenClass]]) -> bool {
    p.attempt(|p| {
        p.opt_ws();
        if !p.cur.eat_char('(') {
            return false;
        }
        p.opt_ws();
        for (i, node) in classes.iter().enumerate() {
            if i > 0 && !p.ws() {
                return false;
            }
            if !p.ident_token(node) {
                return false;
            }
        }
        p.opt_ws();
        p.cur.eat_char(')')
    }) || p.attempt(|p| {
        for node in classes {
            if !p.ws() {
                return false;
            }
            if !p.ident_token(node) {
                return false;
            }
        }
        true
    })
}

fn two_node_device(p: &mut LineParser, master: &str) -> bool {
    devname(p)
        && node_list(p, &[&[PosNode], &[NegNode]])
        && p.ws()
        && keyword(p, master, &[DeviceId])
        && named_params_tail(p)
}

fn three_node_device(p: &mut LineParser, master: &str) -> bool {
    devname(p)
        && node_list(p, &[&[DrainNode], &[GateNode], &[SourceNode]])
        && p.ws()
        && keyword(p, master, &[DeviceId])
        && named_params_tail(p)
}

fn tline(p: &mut LineParser) -> bool {
    devname(p)
        && node_list(
            p,
            &[
                &[APortPosNode],
                &[APortNegNode],
                &[BPortPosNode],
                &[BPortNegNode],
            ],
        )
        && p.ws()
        && keyword(p, "tline", &[DeviceId])
        && named_params_tail(p)
}

fn controlled_source(p: &mut LineParser, master: &str) -> bool {
    devname(p)
        && node_list(
            p,
            &[
                &[PosNode],
                &[NegNode],
                &[PosControlNode],
                &[NegControlNode],
            ],
        )
        && p.ws()
        && keyword(p, master, &[DeviceId])
        && p.many0(|p| {
            p.ws()
                && (p.attempt(|p| {
                    silent_keyword(p, "gain")
                        && p.opt_ws()
                        && p.cur.eat_char('=')
                        && p.opt_ws()
                        && p.ident_token(&[GainValue])
                }) || param_value_pair(p))
        })
}

fn independent_source(p: &mut LineParser, master: &str) -> bool {
    devname(p)
        && node_list(p, &[&[PosNode], &[NegNode]])
        && p.ws()
        && keyword(p, master, &[DeviceId])
        && p.many0(|p| p.ws() && source_inst_param(p))
}

fn source_inst_param(p: &mut LineParser) -> bool {
    let eq = |p: &mut LineParser| {
        p.opt_ws();
        p.cur.eat_char('=') && p.opt_ws()
    };
    p.attempt(|p| {
        silent_keyword(p, "type") && eq(p) && p.keyword_token("dc", &[DcValue])
    }) || p.attempt(|p| {
        silent_keyword(p, "dc") && eq(p) && p.expr_or_ident_token(&[DcValueValue])
    }) || p.attempt(|p| {
        silent_keyword(p, "mag") && eq(p) && p.ident_token(&[AcMagValue])
    }) || p.attempt(|p| {
        silent_keyword(p, "phase") && eq(p) && p.ident_token(&[AcPhaseValue])
    }) || param_value_pair(p)
}

fn port(p: &mut LineParser) -> bool {
    devname(p)
        && p.attempt(|p| {
            p.opt_ws();
            p.cur.eat_char('(')
                && p.opt_ws()
                && p.ident_token(&[PosNode])
                && p.ws()
                && p.ident_token(&[NegNode])
                && p.opt_ws()
                && p.cur.eat_char(')')
        })
        && p.ws()
        && keyword(p, "port", &[DeviceId])
        && named_params_tail(p)
}

fn bsource(p: &mut LineParser) -> bool {
    devname(p)
        && node_list(p, &[&[PosNode], &[NegNode]])
        && p.ws()
        && keyword(p, "bsource", &[DirectiveType])
        && p.ws()
        && (p.keyword_token("i", &[Current]) || p.keyword_token("v", &[Voltage]))
        && p.opt_ws()
        && p.cur.eat_char('=')
        && p.opt_ws()
        && match math_text(p) {
            Some(value) => {
                p.push(value, &[Expression]);
                true
            }
            None => false,
        }
}

fn mutual_inductor(p: &mut LineParser) -> bool {
    devname(p)
        && p.ws()
        && keyword(p, "mutual_inductor", &[DeviceId])
        && p.many0(|p| {
            p.ws()
                && (p.attempt(|p| {
                    coupled_inductor_ref(p)
                        && p.opt_ws()
                        && p.cur.eat_char('=')
                        && p.opt_ws()
                        && p.ident_token(&[ControlDeviceName])
                }) || p.attempt(|p| {
                    silent_keyword(p, "coupling")
                        && p.opt_ws()
                        && p.cur.eat_char('=')
                        && p.opt_ws()
                        && coupling_value(p)
                }))
        })
}

/// `ind<N>` references to the coupled inductors.
fn coupled_inductor_ref(p: &mut LineParser) -> bool {
    match p.capture(|p| {
        p.cur.eat_lit_nocase("ind").is_some() && p.cur.take_while1(|c| c.is_ascii_digit()).is_some()
    }) {
        Some(value) => {
            p.push(value, &[ControlDevice]);
            true
        }
        None => false,
    }
}

fn coupling_value(p: &mut LineParser) -> bool {
    if let Some(value) = math_text(p) {
        p.push(value, &[CouplingValue]);
        return true;
    }
    p.ident_token(&[CouplingValue])
}

/// Any other `name (nodes) master params` statement: nodes are kept with
/// the `UNKNOWN_NODE` class and the master with `MODEL_NAME`.
fn unknown_device(p: &mut LineParser) -> bool {
    if p.check(subckt_header) {
        return false;
    }
    p.attempt(|p| {
        if !(devname(p) && {
            p.opt_ws();
            p.cur.eat_char('(')
        }) {
            return false;
        }
        p.opt_ws();
        if !p.many1(|p| p.ident_token(&[UnknownNode]) && p.opt_ws()) {
            return false;
        }
        if !p.cur.eat_char(')') {
            return false;
        }
        p.ws() && p.ident_token(&[ModelName]) && named_params_tail(p)
    }) || p.attempt(|p| {
        // Bare node list: identifiers are nodes until the one followed by
        // a parameter pair or the end of the line, which is the master.
        if !devname(p) {
            return false;
        }
        if !p.many1(|p| {
            p.ws()
                && p.not(|p| {
                    p.identifier().is_some()
                        && (p.check(|p| p.ws() && param_value_pair(p)) || {
                            p.opt_ws();
                            p.cur.at_end()
                        })
                })
                && p.ident_token(&[UnknownNode])
        }) {
            return false;
        }
        p.ws() && p.ident_token(&[ModelName]) && named_params_tail(p)
    })
}

// DIRECTIVES

fn directive(p: &mut LineParser) -> bool {
    p.attempt(ac_dir)
        || p.attempt(binned_model_dir)
        || p.attempt(else_if_dir)
        || p.attempt(else_dir)
        || p.attempt(delimiter_open_dir)
        || p.attempt(delimiter_close_dir)
        || p.attempt(dc_dir)
        || p.attempt(|p| rest_dir(p, "modelParameter"))
        || p.attempt(section_dir)
        || p.attempt(endsection_dir)
        || p.attempt(func_dir)
        || p.attempt(func_expr_dir)
        || p.attempt(global_dir)
        || p.attempt(model_dir)
        || p.attempt(param_dir)
        || p.attempt(ends_dir)
        || p.attempt(if_dir)
        || p.attempt(include_dir)
        || p.attempt(|p| rest_dir(p, "endlibrary"))
        || p.attempt(|p| rest_dir(p, "library"))
        || p.attempt(tran_dir)
        || p.attempt(save_dir)
        || p.attempt(simulator_dir)
        || p.attempt(subckt_dir)
        || p.attempt(unsupported_dir)
}

fn rest_dir(p: &mut LineParser, kw: &str) -> bool {
    keyword(p, kw, &[DirectiveType]) && p.rest_of_line_token()
}

fn binned_model_dir(p: &mut LineParser) -> bool {
    match p.cur.take_while1(|c| c.is_ascii_digit()) {
        Some(value) => {
            p.push(value, &[BinnedModelName]);
            p.opt_ws();
            p.cur.eat_char(':') && p.many1(|p| p.ws() && param_value_pair(p))
        }
        None => false,
    }
}

fn delimiter_open(p: &mut LineParser) -> bool {
    match p.cur.eat_lit("{") {
        true => {
            p.push(Substr::from("{"), &[BlockDelimiter]);
            true
        }
        false => false,
    }
}

fn delimiter_close(p: &mut LineParser) -> bool {
    match p.cur.eat_lit("}") {
        true => {
            p.push(Substr::from("}"), &[BlockDelimiter]);
            true
        }
        false => false,
    }
}

fn delimiter_open_dir(p: &mut LineParser) -> bool {
    delimiter_open(p)
        && p.not(|p| {
            p.opt_ws();
            func_expr_dir(p)
        })
}

fn delimiter_close_dir(p: &mut LineParser) -> bool {
    delimiter_close(p)
}

fn if_cond(p: &mut LineParser) -> bool {
    match math_text(p) {
        Some(value) => {
            p.push(value, &[ConditionalStatement]);
            true
        }
        None => false,
    }
}

fn if_dir(p: &mut LineParser) -> bool {
    keyword(p, "if", &[DirectiveType])
        && p.many1(|p| p.ws() && if_cond(p))
        && p.opt(|p| {
            p.opt_ws();
            delimiter_open(p)
        })
}

fn else_if_dir(p: &mut LineParser) -> bool {
    delimiter_close(p)
        && p.opt_ws()
        && keyword(p, "else", &[DirectiveType])
        && p.ws()
        && keyword(p, "if", &[DirectiveType])
        && p.many1(|p| p.ws() && if_cond(p))
        && p.opt(|p| {
            p.opt_ws();
            delimiter_open(p)
        })
}

fn else_dir(p: &mut LineParser) -> bool {
    delimiter_close(p)
        && p.opt_ws()
        && keyword(p, "else", &[DirectiveType])
        && p.opt(|p| {
            p.opt_ws();
            delimiter_open(p)
        })
}

/// `real f(real a, real b) { return expr }`, the body optionally spilling
/// onto its own lines.
fn func_dir(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        keyword(p, "real", &[DirectiveType])
            && p.ws()
            && p.ident_token(&[FuncNameValue])
            && p.opt_ws()
            && p.cur.eat_char('(')
            && p.opt_ws()
            && silent_keyword(p, "real")
            && p.ws()
            && p.ident_token(&[FuncArgValue])
            && p.many0(|p| {
                p.opt_ws();
                p.cur.eat_char(',')
                    && p.opt_ws()
                    && silent_keyword(p, "real")
                    && p.ws()
                    && p.ident_token(&[FuncArgValue])
            })
            && p.opt_ws()
            && p.cur.eat_char(')')
    };
    p.attempt(|p| {
        header(p)
            && p.opt_ws()
            && delimiter_open(p)
            && p.opt_ws()
            && silent_keyword(p, "return")
            && p.ws()
            && func_expression(p)
            && p.opt_ws()
            && delimiter_close(p)
    }) || p.attempt(|p| {
        header(p)
            && p.opt(|p| {
                p.opt_ws();
                delimiter_open(p)
            })
    })
}

fn func_expression(p: &mut LineParser) -> bool {
    match math_text(p) {
        Some(value) => {
            p.push(value, &[FuncExpression]);
            true
        }
        None => false,
    }
}

/// A stray `return expr` line inside a function block.
fn func_expr_dir(p: &mut LineParser) -> bool {
    p.opt(|p| delimiter_open(p) && p.opt_ws());
    if !(silent_keyword(p, "return") && p.ws() && func_expression(p)) {
        return false;
    }
    p.opt(|p| {
        p.opt_ws();
        delimiter_close(p)
    });
    true
}

fn global_dir(p: &mut LineParser) -> bool {
    keyword(p, "global", &[DirectiveType]) && p.many0(|p| p.ws() && general_node(p))
}

fn model_dir(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        keyword(p, "model", &[DirectiveType])
            && p.ws()
            && p.ident_token(&[ModelName])
            && p.ws()
            && p.ident_token(&[ModelType])
    };
    p.attempt(|p| {
        header(p) && p.opt_ws() && delimiter_open(p)
    }) || p.attempt(|p| header(p) && named_params_tail(p))
}

fn param_dir(p: &mut LineParser) -> bool {
    keyword(p, "parameters", &[DirectiveType])
        && p.many1(|p| {
            p.ws() && param_value_pair(p) && p.opt(|p| p.cur.eat_char(','))
        })
}

fn ends_dir(p: &mut LineParser) -> bool {
    keyword(p, "ends", &[DirectiveType]) && p.opt(|p| p.ws() && param_value(p))
}

fn include_dir(p: &mut LineParser) -> bool {
    keyword(p, "include", &[DirectiveType])
        && p.ws()
        && p.opt(|p| p.cur.eat_char('"'))
        && filename_token(p)
        && p.opt(|p| p.cur.eat_char('"'))
        && p.opt(|p| {
            p.ws()
                && silent_keyword(p, "section")
                && p.cur.eat_char('=')
                && p.opt_ws()
                && p.ident_token(&[LibEntry])
        })
}

fn filename_token(p: &mut LineParser) -> bool {
    match p
        .cur
        .take_while1(|c| c.is_ascii_alphanumeric() || ".\\/:_-".contains(c))
    {
        Some(value) => {
            p.push(value, &[Filename]);
            true
        }
        None => false,
    }
}

fn section_dir(p: &mut LineParser) -> bool {
    keyword(p, "section", &[DirectiveType])
        && p.ws()
        && p.ident_token(&[LibEntry])
        && p.opt(|p| p.ws() && p.rest_of_line_token())
}

fn endsection_dir(p: &mut LineParser) -> bool {
    keyword(p, "endsection", &[DirectiveType]) && p.opt(|p| p.ws() && p.ident_token(&[LibEntry]))
}

/// Subcircuits: `[inline] subckt name ( nodes )`, parameters on a
/// following `parameters` line or after the node list.
fn subckt_header(p: &mut LineParser) -> bool {
    p.opt(|p| p.cur.eat_lit_nocase("inline").is_some() && p.ws());
    keyword(p, "subckt", &[DirectiveType])
}

fn subckt_dir(p: &mut LineParser) -> bool {
    subckt_header(p)
        && p.ws()
        && devname(p)
        && p.opt(|p| {
            if !p.ws() {
                return false;
            }
            p.opt(|p| p.cur.eat_char('(') && p.opt_ws());
            if !p.many1(|p| {
                p.opt_ws();
                subckt_directive_param_value(p)
            }) {
                return false;
            }
            p.opt_ws();
            p.opt(|p| p.cur.eat_char(')'));
            true
        })
        && p.opt(|p| {
            p.ws() && params_set_type(p) && p.many1(|p| p.ws() && param_value_pair(p))
        })
}

fn subckt_directive_param_value(p: &mut LineParser) -> bool {
    p.ident_token(&[SubcktDirectiveParamValue])
}

/// `parameters` as a positional/named separator; the token value is
/// normalized to the family-wide `PARAMS:` spelling.
fn params_set_type(p: &mut LineParser) -> bool {
    if p.cur.eat_lit_nocase("parameters").is_some() {
        p.push(Substr::from("PARAMS:"), &[ParamsHeader]);
        true
    } else {
        false
    }
}

// ANALYSES

fn ac_dir(p: &mut LineParser) -> bool {
    analysis_name(p)
        && p.ws()
        && keyword(p, "ac", &[DirectiveType])
        && p.many0(|p| p.ws() && (p.attempt(ac_param_value_pair) || param_value_pair(p)))
}

/// The analysis instance name carries no classification of its own.
fn analysis_name(p: &mut LineParser) -> bool {
    p.identifier().is_some()
}

fn ac_param_value_pair(p: &mut LineParser) -> bool {
    let eq = |p: &mut LineParser| {
        p.opt_ws();
        p.cur.eat_char('=') && p.opt_ws()
    };
    p.attempt(|p| {
        (p.keyword_token("dec", &[SweepType]) || p.keyword_token("lin", &[SweepType]))
            && eq(p)
            && p.ident_token(&[PointsValue])
    }) || p.attempt(|p| {
        silent_keyword(p, "start") && eq(p) && p.ident_token(&[StartFreqValue])
    }) || p.attempt(|p| {
        silent_keyword(p, "stop") && eq(p) && p.ident_token(&[EndFreqValue])
    })
}

fn dc_dir(p: &mut LineParser) -> bool {
    analysis_name(p)
        && p.ws()
        && keyword(p, "dc", &[DirectiveType])
        && p.many1(|p| p.ws() && dc_inst_param(p))
}

fn dc_inst_param(p: &mut LineParser) -> bool {
    let eq = |p: &mut LineParser| {
        p.opt_ws();
        p.cur.eat_char('=') && p.opt_ws()
    };
    p.attempt(|p| silent_keyword(p, "dev") && eq(p) && p.ident_token(&[DcSweepDev]))
        || p.attempt(|p| silent_keyword(p, "param") && eq(p) && p.ident_token(&[DcSweepParam]))
        || p.attempt(|p| silent_keyword(p, "start") && eq(p) && p.ident_token(&[DcSweepStart]))
        || p.attempt(|p| silent_keyword(p, "stop") && eq(p) && p.ident_token(&[DcSweepStop]))
        || p.attempt(|p| silent_keyword(p, "step") && eq(p) && p.ident_token(&[DcSweepStep]))
        || param_value_pair(p)
}

fn tran_dir(p: &mut LineParser) -> bool {
    keyword(p, "tran", &[DirectiveType])
        && p.ws()
        && keyword(p, "tran", &[DirectiveType])
        && named_params_tail(p)
}

fn save_dir(p: &mut LineParser) -> bool {
    keyword(p, "save", &[DirectiveType]) && p.many0(|p| p.ws() && p.ident_token(&[OutputVariable]))
}

fn simulator_dir(p: &mut LineParser) -> bool {
    keyword(p, "simulator", &[DirectiveType]) && p.ws() && param_value_pair(p)
}

/// Analyses and controls the translator retains verbatim.
fn unsupported_dir(p: &mut LineParser) -> bool {
    const TYPES: &[&str] = &[
        "altergroup",
        "alter",
        "analogmodel",
        "checklimit",
        "checkpoint",
        "check",
        "constants",
        "convergence",
        "cosim",
        "dcmatch",
        "designParamVals",
        "element",
        "encryption",
        "envlp",
        "expressions",
        "finalTimeOP",
        "functions",
        "hbac",
        "hbnoise",
        "hbsp",
        "hb",
        "ibis",
        "ic",
        "info",
        "keywords",
        "loadpull",
        "memory",
        "montecarlo",
        "nodeset",
        "noise",
        "options",
        "outputParameter",
        "pac",
        "param_limits",
        "paramset",
        "pdisto",
        "pnoise",
        "primitives",
        "psp",
        "pss",
        "pstb",
        "pxf",
        "pz",
        "qpac",
        "qpnoise",
        "qpsp",
        "qpss",
        "qpxf",
        "reliability",
        "rfmemory",
        "saveOptions",
        "savestate",
        "sens",
        "set",
        "shell",
        "simulatorOptions",
        "smiconfig",
        "spectrerf",
        "sp",
        "stb",
        "stitch",
        "subckts",
        "sweep",
        "tdr",
        "uti",
        "vector",
        "veriloga",
        "xf",
    ];
    for ty in TYPES {
        if p.attempt(|p| keyword(p, ty, &[DirectiveType]) && p.rest_of_line_token()) {
            return true;
        }
    }
    false
}
