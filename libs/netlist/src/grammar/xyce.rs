//! The base netlist grammar.
//!
//! Covers the shared universe of SPICE device letters and directives. The
//! PSPICE and TSPICE grammars delegate to the rule functions here; every
//! rule is therefore a free function over [`LineParser`] rather than a
//! method of the grammar type.
//!
//! The central disambiguation rule: positional slots (model names, areas,
//! gains, couplings) are consumed only while the lookahead is *not* a
//! `name=value` pair. This "positional-until-named" pattern repeats across
//! every device.

use crate::grammar::{run, Grammar, LineParser, Profile};
use crate::{Substr, Token, TokenClass};

/// The base (Xyce) netlist grammar.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct XyceGrammar;

impl Grammar for XyceGrammar {
    fn parse_line(&self, line: &Substr) -> Option<Vec<Token>> {
        run(line, Profile::Xyce, netlist_line)
    }

    fn comment_prefix(&self) -> &'static str {
        "*"
    }

    fn dialect_name(&self) -> &'static str {
        "Xyce"
    }
}

pub(crate) const COMMENT_PREFIXES: &[&str] = &["*", "#"];
pub(crate) const INLINE_COMMENT_PREFIXES: &[&str] = &[";", "$"];

use TokenClass::*;

// TOP LEVEL

pub(crate) fn netlist_line(p: &mut LineParser) -> bool {
    p.attempt(|p| p.comment_token(COMMENT_PREFIXES))
        || p.attempt(|p| {
            (p.attempt(analog_device) || p.attempt(directive)) && trailing_inline_comment(p)
        })
}

pub(crate) fn trailing_inline_comment(p: &mut LineParser) -> bool {
    p.opt(|p| {
        p.opt_ws();
        p.inline_comment_token(INLINE_COMMENT_PREFIXES)
    })
}

// SHARED TERMINALS

/// `name = value`, whitespace allowed around the equals sign.
pub(crate) fn param_value_pair(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        p.ident_token(&[ParamName])
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && param_value_token(p, &[ParamValue])
    })
}

/// `composite_math_expression | param_with_comma`, pushed with `classes`.
pub(crate) fn param_value_token(p: &mut LineParser, classes: &[TokenClass]) -> bool {
    if let Some(value) = p.composite_math_expression() {
        p.push(value, classes);
        return true;
    }
    match param_with_comma_text(p) {
        Some(value) => {
            p.push(value, classes);
            true
        }
        None => false,
    }
}

/// An identifier, or a comma-joined identifier list that stops before the
/// next `name=value` pair.
fn param_with_comma_text(p: &mut LineParser) -> Option<Substr> {
    p.capture(|p| {
        if p.identifier().is_none() {
            return false;
        }
        p.many0(|p| {
            p.attempt(|p| {
                p.opt_ws();
                if !(p.cur.eat_char(',') && p.opt_ws() && p.identifier().is_some()) {
                    return false;
                }
                // Do not swallow the name of a following pair.
                p.not(|p| {
                    p.opt_ws();
                    p.cur.eat_char('=')
                })
            })
        })
    })
}

/// `PARAMS:` separator between positional values and named parameters.
pub(crate) fn params_set_type(p: &mut LineParser) -> bool {
    p.keyword_token("PARAMS:", &[ParamsHeader])
}

fn voltage_type(p: &mut LineParser) -> bool {
    p.keyword_token("V", &[Voltage])
}

fn current_type(p: &mut LineParser) -> bool {
    p.keyword_token("I", &[Current])
}

/// One-or-more `.IC`-family node entries.
pub(crate) fn node_value_items(p: &mut LineParser) -> bool {
    p.many1(node_value_item)
}

/// A single `[V](node)[=]value` entry in `.IC`-family directives.
fn node_value_item(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.ws() {
            return false;
        }
        p.opt(voltage_type);
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
        p.expr_or_ident_token(&[GeneralValue])
    })
}

// OUTPUT VARIABLES

/// `V(a)`, `V(a,b)`, `VM/VR/VI/VP/VDB(...)`, `I(...)`, `I2(...)`,
/// `N/W/P(...)`, a brace expression, or a bare identifier.
pub(crate) fn output_variable(p: &mut LineParser) -> bool {
    if let Some(value) = p.capture(output_variable_expression) {
        p.push(value, &[OutputVariable]);
        return true;
    }
    if let Some(value) = p.composite_math_expression() {
        p.push(value, &[OutputVariable]);
        return true;
    }
    p.ident_token(&[OutputVariable])
}

fn output_variable_expression(p: &mut LineParser) -> bool {
    const PREFIXES: &[&str] = &[
        "VDB", "VM", "VR", "VI", "VP", "IDB", "IM", "IR", "II", "IP", "V", "I", "N", "W", "P",
    ];
    for prefix in PREFIXES {
        if p.attempt(|p| p.cur.eat_lit_nocase(prefix).is_some() && output_variable_args(p)) {
            return true;
        }
    }
    // Lead currents: I<digit>(device).
    p.attempt(|p| {
        p.cur.eat_lit_nocase("I").is_some()
            && p.cur.take_while1(|c| c.is_ascii_digit()).is_some()
            && output_variable_args(p)
    })
}

fn output_variable_args(p: &mut LineParser) -> bool {
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

// TRANSIENT SOURCE FUNCTIONS

fn transient_func_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(&["PULSE", "SIN", "EXP", "PWL", "SFFM"], &[TransFuncType])
}

fn transient_ref_name(p: &mut LineParser) -> bool {
    p.expr_or_ident_token(&[TransRefName])
}

fn simple_trans(p: &mut LineParser, keyword: &str) -> bool {
    p.attempt(|p| {
        if !p.keyword_token(keyword, &[TransFuncType]) {
            return false;
        }
        p.opt_ws();
        p.opt(|p| p.cur.eat_char('('));
        p.opt_ws();
        if !p.many1(|p| {
            transient_ref_name(p) && p.opt_ws()
        }) {
            return false;
        }
        p.opt(|p| p.cur.eat_char(')'));
        true
    })
}

fn pwl_trans(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.keyword_token("PWL", &[TransFuncType]) {
            return false;
        }
        // Parenthesized time/value pairs.
        if p.attempt(|p| {
            p.many1(|p| {
                p.opt_ws();
                p.cur.eat_char('(')
                    && p.opt_ws()
                    && transient_ref_name(p)
                    && p.opt_ws()
                    && p.cur.eat_char(',')
                    && p.opt_ws()
                    && transient_ref_name(p)
                    && p.opt_ws()
                    && p.cur.eat_char(')')
            })
        }) {
            return true;
        }
        // Flat list, commas optional.
        p.opt_ws();
        p.opt(|p| p.cur.eat_char('('));
        p.opt_ws();
        if !p.many1(|p| {
            transient_ref_name(p) && {
                p.opt_ws();
                p.opt(|p| p.cur.eat_char(',') && p.opt_ws());
                true
            }
        }) {
            return false;
        }
        p.opt(|p| p.cur.eat_char(')'));
        true
    })
}

pub(crate) fn transient(p: &mut LineParser) -> bool {
    pwl_trans(p)
        || simple_trans(p, "PULSE")
        || simple_trans(p, "SIN")
        || simple_trans(p, "EXP")
        || simple_trans(p, "SFFM")
}

/// One element of an independent source specification: a transient
/// function, a `DC`/`AC` group, or a bare value.
pub(crate) fn transient_or_ac_dc(p: &mut LineParser) -> bool {
    if p.attempt(transient) {
        return true;
    }
    if p.attempt(|p| {
        p.keyword_token("DC", &[DcValue])
            && p.attempt(|p| {
                p.opt_ws();
                p.cur.eat_char('=') && p.opt_ws() && p.expr_or_ident_token(&[DcValueValue])
            })
    }) {
        return true;
    }
    if p.attempt(|p| {
        p.keyword_token("DC", &[DcValue]) && p.ws() && p.expr_or_ident_token(&[DcValueValue])
    }) {
        return true;
    }
    if p.attempt(|p| {
        p.keyword_token("AC", &[AcValue])
            && p.ws()
            && p.ident_token(&[AcMagValue])
            && p.opt(|p| {
                p.ws()
                    && p.not(transient_func_type)
                    && p.not(|p| p.keyword_token("DC", &[DcValue]))
                    && p.ident_token(&[AcPhaseValue])
            })
    }) {
        return true;
    }
    p.attempt(|p| {
        p.not(|p| p.keyword_token("AC", &[AcValue]) && p.ws())
            && p.not(transient_func_type)
            && p.expr_or_ident_token(&[DcValueValue])
    })
}

// EXPRESSION-VALUED SOURCE SHAPES

fn expression_token(p: &mut LineParser) -> bool {
    match p.composite_math_expression() {
        Some(value) => {
            p.push(value, &[Expression]);
            true
        }
        None => false,
    }
}

fn no_curly_expression_token(p: &mut LineParser) -> bool {
    match p.no_curly_expression() {
        Some(value) => {
            p.push(value, &[Expression]);
            true
        }
        None => false,
    }
}

/// `POLY(n)`.
pub(crate) fn poly(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        p.keyword_token("POLY", &[Poly])
            && p.cur.eat_char('(')
            && param_value_token(p, &[ParamValue])
            && p.cur.eat_char(')')
    })
}

fn poly_param_value(p: &mut LineParser) -> bool {
    p.expr_or_ident_token(&[PolyParamValue])
}

/// `TABLE {expr} = (x, y) (x, y) ...`
pub(crate) fn table(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.keyword_token("TABLE", &[Table]) {
            return false;
        }
        p.opt_ws();
        if !expression_token(p) {
            return false;
        }
        p.opt(|p| {
            p.opt_ws();
            p.cur.eat_char('=')
        });
        if !p.many1(|p| {
            p.opt_ws();
            p.cur.eat_char('(')
                && p.opt(|p| {
                    p.opt_ws();
                    p.cur.eat_char('(')
                })
                && p.opt_ws()
                && p.expr_or_ident_token(&[TableParamValue])
                && p.opt_ws()
                && p.opt(|p| p.cur.eat_char(','))
                && p.opt_ws()
                && p.expr_or_ident_token(&[TableParamValue])
                && p.opt_ws()
                && p.cur.eat_char(')')
        }) {
            return false;
        }
        p.opt(|p| {
            p.opt_ws();
            p.cur.eat_char(')')
        });
        true
    })
}

/// `VALUE = {expr}` and its undelimited variants.
pub(crate) fn value_expression(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.keyword_token("VALUE", &[ValueKeyword]) {
            return false;
        }
        p.opt_ws();
        p.opt(|p| p.cur.eat_char('=') && p.opt_ws());
        expression_token(p) || no_curly_expression_token(p)
    })
}

/// `CONTROL [=] expr` for the generic switch.
fn control_expression(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.keyword_token("CONTROL", &[Control]) {
            return false;
        }
        p.opt_ws();
        p.opt(|p| p.cur.eat_char('=') && p.opt_ws());
        expression_token(p)
    })
}

/// `V|I = {expr}` or `V|I = {TABLE ...}` for behavioral sources.
fn abm_expression(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !(voltage_type(p) || current_type(p)) {
            return false;
        }
        p.opt_ws();
        if !p.cur.eat_char('=') {
            return false;
        }
        p.opt_ws();
        if p.attempt(|p| {
            p.cur.eat_char('{')
                && p.opt_ws()
                && table(p)
                && p.opt_ws()
                && p.cur.eat_char('}')
        }) {
            return true;
        }
        expression_token(p)
    })
}

// DEVICES

/// `<letter><name>` opener: the device letter becomes `DEVICE_ID` and the
/// remainder of the word, if any, becomes `DEVICE_NAME`.
fn dev_type(p: &mut LineParser, letter: &str) -> bool {
    p.keyword_token(letter, &[DeviceId]) && p.opt(|p| p.ident_token(&[DeviceName]))
}

fn named_params_tail(p: &mut LineParser) -> bool {
    p.many0(|p| p.ws() && param_value_pair(p))
}

/// `!param_value_pair` guard before a positional slot.
fn positional(p: &mut LineParser) -> bool {
    p.not(param_value_pair)
}

fn model_or_value(p: &mut LineParser) -> bool {
    p.ident_or_expr_token(&[ModelName, Value])
}

fn on_or_off(p: &mut LineParser) -> bool {
    p.keyword_token("ON", &[On]) || p.keyword_token("OFF", &[Off])
}

pub(crate) fn analog_device(p: &mut LineParser) -> bool {
    p.attempt(bjt)
        || p.attempt(capacitor)
        || p.attempt(digital_dev)
        || p.attempt(diode)
        || p.attempt(generic_switch)
        || p.attempt(current_ctrl_current_src)
        || p.attempt(current_ctrl_switch)
        || p.attempt(current_ctrl_voltage_src)
        || p.attempt(indep_current_src)
        || p.attempt(indep_voltage_src)
        || p.attempt(inductor)
        || p.attempt(jfet)
        || p.attempt(lossless_trans_line)
        || p.attempt(lossy_trans_line)
        || p.attempt(mesfet)
        || p.attempt(mosfet)
        || p.attempt(mutual_inductor)
        || p.attempt(non_linear_dep_src)
        || p.attempt(port)
        || p.attempt(resistor)
        || p.attempt(subcircuit)
        || p.attempt(voltage_ctrl_current_src)
        || p.attempt(voltage_ctrl_switch)
        || p.attempt(voltage_ctrl_voltage_src)
}

fn bjt(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        dev_type(p, "Q")
            && p.ws()
            && p.ident_token(&[CollectorNode])
            && p.ws()
            && p.ident_token(&[BaseNode])
            && p.ws()
            && p.ident_token(&[EmitterNode])
    };
    let body = |p: &mut LineParser| {
        // Seven-terminal form.
        p.attempt(|p| {
            header(p)
                && p.ws()
                && p.ident_token(&[SubstrateNode])
                && p.ws()
                && p.ident_token(&[CollectorPrimeNode])
                && p.ws()
                && p.ident_token(&[BasePrimeNode])
                && p.ws()
                && p.ident_token(&[EmitterPrimeNode])
                && p.ws()
                && p.ident_token(&[ModelName])
        }) || p.attempt(|p| {
            header(p)
                && p.ws()
                && p.ident_token(&[SubstrateNode])
                && p.ws()
                && p.ident_token(&[ModelName])
                && p.ws()
                && positional(p)
                && p.expr_or_ident_token(&[AreaValue])
        }) || p.attempt(|p| {
            // VBIC self-heating variant with a thermal node.
            header(p)
                && p.ws()
                && p.ident_token(&[ThermalNode])
                && p.ws()
                && p.keyword_token("VBIC", &[VbicModel])
                && p.ident_token(&[VbicModelName])
        }) || p.attempt(|p| {
            header(p)
                && p.ws()
                && p.cur.eat_char('[')
                && p.ident_token(&[SubstrateNode])
                && p.cur.eat_char(']')
                && p.ws()
                && p.ident_token(&[ModelName])
                && p.opt(|p| {
                    p.ws() && positional(p) && p.expr_or_ident_token(&[AreaValue])
                })
        }) || p.attempt(|p| {
            header(p)
                && p.ws()
                && p.ident_token(&[ModelName])
                && p.opt(|p| {
                    p.ws() && positional(p) && p.expr_or_ident_token(&[AreaValue])
                })
        })
    };
    body(p) && named_params_tail(p)
}

fn capacitor(p: &mut LineParser) -> bool {
    dev_type(p, "C")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && named_params_tail(p)
}

fn digital_dev(p: &mut LineParser) -> bool {
    p.keyword_token("Y", &[DeviceId])
        && p.ident_token(&[DigDevType])
        && p.ws()
        && p.ident_token(&[DeviceName])
        && p.many1(|p| {
            p.ws() && positional(p) && p.ident_token(&[ModelName, GeneralNode])
        })
        && named_params_tail(p)
}

fn diode(p: &mut LineParser) -> bool {
    dev_type(p, "D")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.ws()
        && positional(p)
        && p.ident_token(&[ModelName])
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && named_params_tail(p)
}

fn generic_switch(p: &mut LineParser) -> bool {
    p.keyword_token("SW", &[DeviceId])
        && p.opt(|p| p.ident_token(&[DeviceName]))
        && p.ws()
        && p.ident_token(&[PosSwitchNode])
        && p.ws()
        && p.ident_token(&[NegSwitchNode])
        && p.ws()
        && p.ident_token(&[ModelName])
        && p.opt(|p| p.ws() && on_or_off(p))
        && p.ws()
        && control_expression(p)
}

fn current_ctrl_current_src(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        dev_type(p, "F")
            && p.ws()
            && p.ident_token(&[PosNode])
            && p.ws()
            && p.ident_token(&[NegNode])
            && p.ws()
    };
    p.attempt(|p| header(p) && poly(p) && p.many1(|p| p.ws() && poly_param_value(p)))
        || p.attempt(|p| {
            header(p)
                && p.expr_or_ident_token(&[ControlParamValue])
                && p.ws()
                && p.ident_token(&[GainValue])
        })
}

fn current_ctrl_switch(p: &mut LineParser) -> bool {
    dev_type(p, "W")
        && p.ws()
        && p.ident_token(&[PosSwitchNode])
        && p.ws()
        && p.ident_token(&[NegSwitchNode])
        && p.ws()
        && p.expr_or_ident_token(&[ControlParamValue])
        && p.ws()
        && p.ident_token(&[ModelName])
        && p.opt(|p| p.ws() && on_or_off(p))
}

fn current_ctrl_voltage_src(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        dev_type(p, "H")
            && p.ws()
            && p.ident_token(&[PosNode])
            && p.ws()
            && p.ident_token(&[NegNode])
            && p.ws()
    };
    p.attempt(|p| header(p) && poly(p) && p.many1(|p| p.ws() && poly_param_value(p)))
        || p.attempt(|p| header(p) && value_expression(p))
        || p.attempt(|p| header(p) && table(p))
        || p.attempt(|p| {
            header(p)
                && p.expr_or_ident_token(&[ControlParamValue])
                && p.ws()
                && p.ident_token(&[GainValue])
        })
}

fn indep_src(p: &mut LineParser, letter: &str) -> bool {
    dev_type(p, letter)
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.many0(|p| p.ws() && transient_or_ac_dc(p))
}

fn indep_current_src(p: &mut LineParser) -> bool {
    indep_src(p, "I")
}

fn indep_voltage_src(p: &mut LineParser) -> bool {
    indep_src(p, "V")
}

fn inductor(p: &mut LineParser) -> bool {
    dev_type(p, "L")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.ws()
        && model_or_value(p)
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && named_params_tail(p)
}

fn jfet(p: &mut LineParser) -> bool {
    dev_type(p, "J")
        && p.ws()
        && p.ident_token(&[DrainNode])
        && p.ws()
        && p.ident_token(&[GateNode])
        && p.ws()
        && p.ident_token(&[SourceNode])
        && p.ws()
        && p.ident_token(&[ModelName])
        && p.opt(|p| {
            p.ws() && positional(p) && param_value_token(p, &[ParamValue])
        })
        && named_params_tail(p)
}

fn trans_line_ports(p: &mut LineParser) -> bool {
    p.ident_token(&[APortPosNode])
        && p.ws()
        && p.ident_token(&[APortNegNode])
        && p.ws()
        && p.ident_token(&[BPortPosNode])
        && p.ws()
        && p.ident_token(&[BPortNegNode])
}

fn lossless_trans_line(p: &mut LineParser) -> bool {
    p.keyword_token("T", &[DeviceId])
        && p.ident_token(&[DeviceName])
        && p.ws()
        && trans_line_ports(p)
        && named_params_tail(p)
}

fn lossy_trans_line(p: &mut LineParser) -> bool {
    p.keyword_token("O", &[DeviceId])
        && p.ident_token(&[DeviceName])
        && p.ws()
        && trans_line_ports(p)
        && p.opt(|p| p.ws() && p.ident_token(&[ModelName]))
}

fn mesfet(p: &mut LineParser) -> bool {
    dev_type(p, "Z")
        && p.ws()
        && p.ident_token(&[DrainNode])
        && p.ws()
        && p.ident_token(&[GateNode])
        && p.ws()
        && p.ident_token(&[SourceNode])
        && p.ws()
        && p.ident_token(&[ModelName])
        && named_params_tail(p)
}

fn standalone_param(p: &mut LineParser) -> bool {
    p.keyword_token("TNODEOUT", &[StandaloneParam])
}

fn mosfet_tail(p: &mut LineParser) -> bool {
    p.many0(|p| p.ws() && (standalone_param(p) || param_value_pair(p)))
}

fn mosfet(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        dev_type(p, "M")
            && p.ws()
            && p.ident_token(&[DrainNode])
            && p.ws()
            && p.ident_token(&[GateNode])
            && p.ws()
            && p.ident_token(&[SourceNode])
            && p.ws()
            && p.ident_token(&[SubstrateNode])
    };
    // Trailing body/thermal node count varies; try the longest template
    // first and let the `!param_value_pair` guard pick the model slot.
    p.attempt(|p| {
        header(p)
            && p.ws()
            && p.ident_token(&[ExternalBodyContactNode])
            && p.ws()
            && p.ident_token(&[InternalBodyContactNode])
            && p.ws()
            && p.ident_token(&[TemperatureNode])
            && p.ws()
            && positional(p)
            && p.ident_token(&[ModelName])
            && mosfet_tail(p)
    }) || p.attempt(|p| {
        header(p)
            && p.ws()
            && p.ident_token(&[ExternalBodyContactNode])
            && p.ws()
            && p.ident_token(&[InternalBodyContactNode])
            && p.ws()
            && positional(p)
            && p.ident_token(&[ModelName])
            && mosfet_tail(p)
    }) || p.attempt(|p| {
        header(p)
            && p.ws()
            && p.ident_token(&[ExternalBodyContactNode])
            && p.ws()
            && positional(p)
            && p.ident_token(&[ModelName])
            && mosfet_tail(p)
    }) || p.attempt(|p| {
        header(p) && p.ws() && positional(p) && p.ident_token(&[ModelName]) && named_params_tail(p)
    })
}

fn mutual_inductor(p: &mut LineParser) -> bool {
    dev_type(p, "K")
        && p.many1(|p| {
            p.ws()
                && p.keyword_token("L", &[ControlDevice])
                && p.opt(|p| p.ident_token(&[ControlDeviceName]))
        })
        && p.ws()
        && p.opt(|p| {
            // Optional `K=` prefix on the coupling value.
            p.cur.eat_lit_nocase("K").is_some() && p.opt_ws() && p.cur.eat_char('=') && p.opt_ws()
        })
        && p.ident_token(&[CouplingValue])
        && p.opt(|p| p.ws() && p.ident_token(&[ModelName]))
}

fn non_linear_dep_src(p: &mut LineParser) -> bool {
    dev_type(p, "B")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.ws()
        && abm_expression(p)
}

/// Port parameters admit one-to-several values per key, `=` and commas
/// optional between them.
fn port_param_pair(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        if !p.ident_token(&[ParamName]) {
            return false;
        }
        p.opt_ws();
        p.opt(|p| p.cur.eat_char('=') && p.opt_ws());
        if !param_value_token(p, &[ParamValue]) {
            return false;
        }
        p.many0(|p| {
            p.opt_ws();
            (p.cur.eat_char(',') || p.cur.eat_char('='))
                && p.opt_ws()
                && param_value_token(p, &[ParamValue])
        });
        true
    })
}

fn port(p: &mut LineParser) -> bool {
    dev_type(p, "P")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && p.many0(|p| p.ws() && port_param_pair(p))
}

fn resistor(p: &mut LineParser) -> bool {
    dev_type(p, "R")
        && p.ws()
        && p.ident_token(&[PosNode])
        && p.ws()
        && p.ident_token(&[NegNode])
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && p.opt(|p| p.ws() && positional(p) && model_or_value(p))
        && named_params_tail(p)
}

fn subcircuit(p: &mut LineParser) -> bool {
    dev_type(p, "X")
        && p.many1(|p| {
            p.ws()
                && positional(p)
                && p.not(params_set_type)
                && p.expr_or_ident_token(&[SubcktDeviceParamValue])
        })
        && p.opt(|p| p.ws() && params_set_type(p))
        && named_params_tail(p)
}

fn voltage_ctrl_src(p: &mut LineParser, letter: &str, gain_class: TokenClass) -> bool {
    let header = |p: &mut LineParser| {
        dev_type(p, letter)
            && p.ws()
            && p.ident_token(&[PosNode])
            && p.ws()
            && p.ident_token(&[NegNode])
            && p.ws()
    };
    p.attempt(|p| header(p) && poly(p) && p.many1(|p| p.ws() && poly_param_value(p)))
        || p.attempt(|p| header(p) && value_expression(p))
        || p.attempt(|p| header(p) && table(p))
        || p.attempt(|p| {
            header(p)
                && p.ident_token(&[PosControlNode])
                && p.ws()
                && p.ident_token(&[NegControlNode])
                && p.ws()
                && p.ident_token(&[gain_class])
        })
}

fn voltage_ctrl_current_src(p: &mut LineParser) -> bool {
    voltage_ctrl_src(p, "G", TransconductanceValue)
}

fn voltage_ctrl_voltage_src(p: &mut LineParser) -> bool {
    voltage_ctrl_src(p, "E", GainValue)
}

fn voltage_ctrl_switch(p: &mut LineParser) -> bool {
    dev_type(p, "S")
        && p.ws()
        && p.ident_token(&[PosSwitchNode])
        && p.ws()
        && p.ident_token(&[NegSwitchNode])
        && p.ws()
        && p.ident_token(&[PosControlNode])
        && p.ws()
        && p.ident_token(&[NegControlNode])
        && p.ws()
        && p.ident_token(&[ModelName])
        && p.opt(|p| p.ws() && on_or_off(p))
}

// DIRECTIVES

pub(crate) fn directive(p: &mut LineParser) -> bool {
    p.attempt(ac_dir)
        || p.attempt(dcvolt_dir)
        || p.attempt(dc_dir)
        || p.attempt(ends_dir)
        || p.attempt(endl_dir)
        || p.attempt(end_dir)
        || p.attempt(func_dir)
        || p.attempt(global_param_dir)
        || p.attempt(global_dir)
        || p.attempt(hb_dir)
        || p.attempt(inc_dir)
        || p.attempt(ic_dir)
        || p.attempt(lib_dir)
        || p.attempt(lin_dir)
        || p.attempt(measure_dir)
        || p.attempt(model_dir)
        || p.attempt(four_dir)
        || p.attempt(nodeset_dir)
        || p.attempt(options_dir)
        || p.attempt(op_dir)
        || p.attempt(preprocess_dir)
        || p.attempt(print_dir)
        || p.attempt(param_dir)
        || p.attempt(save_dir)
        || p.attempt(sens_dir)
        || p.attempt(step_dir)
        || p.attempt(subckt_dir)
        || p.attempt(tran_dir)
        || p.attempt(mor_dir)
        || p.attempt(mpde_dir)
}

fn directive_type(p: &mut LineParser, keyword: &str) -> bool {
    p.keyword_token(keyword, &[DirectiveType])
}

pub(crate) fn sweep_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(&["LIN", "DEC", "OCT"], &[SweepType])
}

fn ac_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".AC")
        && p.ws()
        && sweep_type(p)
        && p.ws()
        && p.ident_token(&[PointsValue])
        && p.ws()
        && p.ident_token(&[StartFreqValue])
        && p.ws()
        && p.ident_token(&[EndFreqValue])
}

fn dc_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".DC") && p.many0(|p| p.ws() && p.expr_or_ident_token(&[SweepParamValue]))
}

pub(crate) fn dcvolt_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".DCVOLT") && p.many1(node_value_item)
}

fn end_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".END")
}

fn ends_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".ENDS") && p.opt(|p| p.ws() && param_value_token(p, &[ParamValue]))
}

fn endl_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".ENDL") && p.opt(|p| p.ws() && p.ident_token(&[LibEntry]))
}

pub(crate) fn four_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".FOUR")
        && p.ws()
        && p.ident_token(&[FreqValue])
        && p.many0(|p| p.ws() && output_variable(p))
}

fn func_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".FUNC")
        && p.ws()
        && p.ident_token(&[FuncNameValue])
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
        && p.ws()
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

fn global_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".GLOBAL") && p.many0(|p| p.ws() && p.ident_token(&[GeneralNode]))
}

fn global_param_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".GLOBAL_PARAM") && p.many1(|p| p.ws() && param_value_pair(p))
}

fn hb_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".HB") && p.ws() && p.ident_token(&[FundFreqValue])
}

fn ic_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".INITCOND") || directive_type(p, ".IC")) && p.many0(node_value_item)
}

fn inc_dir(p: &mut LineParser) -> bool {
    (directive_type(p, ".INCLUDE") || directive_type(p, ".INC")) && p.ws() && filename_token(p)
}

pub(crate) fn filename_token(p: &mut LineParser) -> bool {
    match p.filename_text() {
        Some(value) => {
            p.push(value, &[Filename]);
            true
        }
        None => false,
    }
}

fn lib_dir(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        directive_type(p, ".LIB")
            && p.ws()
            && filename_token(p)
            && p.ws()
            && p.ident_token(&[LibEntry])
    }) || p.attempt(|p| directive_type(p, ".LIB") && p.ws() && p.ident_token(&[LibEntry]))
}

fn lin_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".LIN") && p.many0(|p| p.ws() && param_value_pair(p))
}

pub(crate) fn measurement_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(
        &[
            "AVG",
            "DERIVATIVE",
            "DERIV",
            "DUTY",
            "ERROR",
            "EQN",
            "FREQ",
            "FOUR",
            "INTEG",
            "MAX",
            "MIN",
            "OFF_TIME",
            "ON_TIME",
            "PARAM",
            "PP",
            "RMS",
            "TRIG",
        ],
        &[AnalysisType],
    )
}

fn measurement_qualifier(p: &mut LineParser) -> bool {
    p.keyword_token_of(&["AT", "FILE", "TARG", "WHEN"], &[MeasureQualifier])
}

fn variable_expr_or_value(p: &mut LineParser) -> bool {
    if let Some(value) = p.capture(output_variable_expression) {
        p.push(value, &[VariableExprOrValue]);
        return true;
    }
    if let Some(value) = p.math_expression() {
        p.push(value, &[VariableExprOrValue]);
        return true;
    }
    p.ident_token(&[VariableExprOrValue])
}

fn measure_param_value_pair(p: &mut LineParser) -> bool {
    p.attempt(|p| {
        p.ident_token(&[MeasureParamName])
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && measure_param_value(p)
    })
}

fn measure_param_value(p: &mut LineParser) -> bool {
    if let Some(value) = p.math_expression() {
        p.push(value, &[MeasureParamValue]);
        return true;
    }
    p.ident_token(&[MeasureParamValue])
}

pub(crate) fn analysis_type(p: &mut LineParser) -> bool {
    p.keyword_token_of(
        &["DC", "AC", "TRAN", "TR", "SENS", "HOMOTOPY", "MPDE", "HB"],
        &[AnalysisType],
    )
}

pub(crate) fn measure_dir(p: &mut LineParser) -> bool {
    let header = |p: &mut LineParser| {
        (directive_type(p, ".MEASURE") || directive_type(p, ".MEAS"))
            && p.ws()
            && analysis_type(p)
            && p.ws()
            && p.ident_token(&[ResultNameValue])
            && p.ws()
            && measurement_type(p)
    };
    p.attempt(|p| {
        header(p)
            && p.opt_ws()
            && p.cur.eat_char('=')
            && p.opt_ws()
            && variable_expr_or_value(p)
    }) || p.attempt(|p| {
        header(p)
            && p.ws()
            && variable_expr_or_value(p)
            && p.opt(|p| p.cur.eat_char('=') && variable_expr_or_value(p))
            && p.many0(|p| p.ws() && measure_param_value_pair(p))
            && p.opt(|p| {
                p.ws()
                    && measurement_qualifier(p)
                    && p.ws()
                    && variable_expr_or_value(p)
                    && p.opt(|p| p.cur.eat_char('=') && variable_expr_or_value(p))
                    && p.many0(|p| p.ws() && measure_param_value_pair(p))
            })
    })
}

pub(crate) fn model_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".MODEL")
        && p.ws()
        && p.ident_token(&[ModelName])
        && p.ws()
        && p.ident_token(&[ModelType])
        && p.opt_ws()
        && p.opt(|p| p.cur.eat_char('('))
        && p.opt_ws()
        && p.opt(param_value_pair)
        && p.many0(|p| {
            p.opt(|p| {
                p.opt_ws();
                p.cur.eat_char(',')
            });
            p.ws() && param_value_pair(p)
        })
        && p.opt(|p| {
            p.opt_ws();
            p.cur.eat_char(')')
        })
}

fn nodeset_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".NODESET") && p.many1(node_value_item)
}

fn options_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".OPTIONS")
        && p.ws()
        && p.ident_token(&[OptionPkgTypeValue])
        && p.many0(|p| p.ws() && param_value_pair(p))
}

fn op_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".OP")
}

pub(crate) fn param_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PARAM")
        && p.many1(|p| {
            p.ws() && param_value_pair(p) && p.opt(|p| p.cur.eat_char(','))
        })
}

fn preprocess_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PREPROCESS")
        && p.ws()
        && p.keyword_token_of(
            &["ADDRESISTORS", "REMOVEUNUSED", "REPLACEGROUND"],
            &[PreprocessKeyword],
        )
        && p.many1(|p| p.ws() && p.expr_or_ident_token(&[ListParamValue]))
}

fn print_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".PRINT")
        && p.ws()
        && analysis_type(p)
        && p.many0(|p| p.ws() && param_value_pair(p))
        && p.many0(|p| p.ws() && output_variable(p))
}

fn save_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".SAVE") && p.many0(|p| p.ws() && param_value_pair(p))
}

fn sens_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".SENS") && p.many0(|p| p.ws() && param_value_pair(p))
}

fn step_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".STEP") && p.many0(|p| p.ws() && p.expr_or_ident_token(&[SweepParamValue]))
}

pub(crate) fn subckt_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".SUBCKT")
        && p.ws()
        && p.ident_token(&[DeviceName])
        && p.many1(|p| {
            p.ws()
                && p.not(param_value_pair)
                && p.not(params_set_type)
                && p.expr_or_ident_token(&[SubcktDirectiveParamValue])
        })
        && p.opt(|p| p.ws() && params_set_type(p))
        && p.many0(|p| p.ws() && param_value_pair(p))
}

pub(crate) fn tran_dir(p: &mut LineParser) -> bool {
    let reserved = |p: &mut LineParser| {
        p.keyword_token("NOOP", &[NoopValue])
            || p.keyword_token("UIC", &[UicValue])
            || p.keyword_token("SCHEDULE", &[ScheduleType])
    };
    (directive_type(p, ".TRAN") || directive_type(p, ".TR"))
        && p.ws()
        && p.expr_or_ident_token(&[PrintStepValue])
        && p.ws()
        && p.expr_or_ident_token(&[FinalTimeValue])
        && p.opt(|p| {
            p.ws()
                && p.not(reserved)
                && p.expr_or_ident_token(&[StartTimeValue])
                && p.opt(|p| {
                    p.ws() && p.not(reserved) && p.expr_or_ident_token(&[StepCeilingValue])
                })
        })
        && p.opt(|p| p.ws() && p.keyword_token("NOOP", &[NoopValue]))
        && p.opt(|p| p.ws() && p.keyword_token("UIC", &[UicValue]))
        && p.opt(|p| {
            p.ws()
                && p.keyword_token("SCHEDULE", &[ScheduleType])
                && p.opt_ws()
                && p.cur.eat_char('(')
                && p.many0(|p| {
                    p.opt_ws();
                    p.expr_or_ident_token(&[ScheduleParamValue]) && {
                        p.opt_ws();
                        p.opt(|p| p.cur.eat_char(','));
                        true
                    }
                })
                && p.opt_ws()
                && p.cur.eat_char(')')
        })
}

fn mor_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".MOR") && p.rest_of_line_token()
}

fn mpde_dir(p: &mut LineParser) -> bool {
    directive_type(p, ".MPDE") && p.rest_of_line_token()
}
