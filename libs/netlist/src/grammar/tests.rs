use crate::grammar::hspice::HspiceGrammar;
use crate::grammar::pspice::PspiceGrammar;
use crate::grammar::spectre::SpectreGrammar;
use crate::grammar::tspice::TspiceGrammar;
use crate::grammar::xyce::XyceGrammar;
use crate::grammar::Grammar;
use crate::{Substr, TokenClass};

use TokenClass::*;

/// Parses `line` and renders the result as `(value, primary class)` pairs.
fn toks(grammar: &dyn Grammar, line: &str) -> Vec<(String, TokenClass)> {
    let parsed = grammar
        .parse_line(&Substr::from(line))
        .unwrap_or_else(|| panic!("line did not parse: {line}"));
    parsed
        .into_iter()
        .map(|t| (t.value.to_string(), t.classes[0]))
        .collect()
}

fn classes(grammar: &dyn Grammar, line: &str) -> Vec<TokenClass> {
    toks(grammar, line).into_iter().map(|(_, c)| c).collect()
}

fn rejects(grammar: &dyn Grammar, line: &str) {
    assert!(
        grammar.parse_line(&Substr::from(line)).is_none(),
        "line should not parse: {line}"
    );
}

// XYCE

#[test]
fn xyce_resistor_positional_value() {
    let g = XyceGrammar;
    let parsed = g.parse_line(&Substr::from("R1 a b 10k")).unwrap();
    let rendered: Vec<(String, Vec<TokenClass>)> = parsed
        .into_iter()
        .map(|t| (t.value.to_string(), t.classes))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("R".to_string(), vec![DeviceId]),
            ("1".to_string(), vec![DeviceName]),
            ("a".to_string(), vec![PosNode]),
            ("b".to_string(), vec![NegNode]),
            ("10k".to_string(), vec![ModelName, Value]),
        ]
    );
}

#[test]
fn xyce_capacitor_with_params() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "C3 n1 n2 1p ic=0"),
        vec![
            ("C".into(), DeviceId),
            ("3".into(), DeviceName),
            ("n1".into(), PosNode),
            ("n2".into(), NegNode),
            ("1p".into(), ModelName),
            ("ic".into(), ParamName),
            ("0".into(), ParamValue),
        ]
    );
}

#[test]
fn xyce_mosfet_four_terminal() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "M1 d g s b nmos l=1u w=2u"),
        vec![
            ("M".into(), DeviceId),
            ("1".into(), DeviceName),
            ("d".into(), DrainNode),
            ("g".into(), GateNode),
            ("s".into(), SourceNode),
            ("b".into(), SubstrateNode),
            ("nmos".into(), ModelName),
            ("l".into(), ParamName),
            ("1u".into(), ParamValue),
            ("w".into(), ParamName),
            ("2u".into(), ParamValue),
        ]
    );
}

#[test]
fn xyce_bjt_with_area() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "Q2 c b e npn 1.5"),
        vec![
            ("Q".into(), DeviceId),
            ("2".into(), DeviceName),
            ("c".into(), CollectorNode),
            ("b".into(), BaseNode),
            ("e".into(), EmitterNode),
            ("npn".into(), ModelName),
            ("1.5".into(), AreaValue),
        ]
    );
}

#[test]
fn xyce_diode_and_jfet() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, "D1 anode cathode dmod"),
        vec![DeviceId, DeviceName, PosNode, NegNode, ModelName]
    );
    assert_eq!(
        classes(&g, "J5 d g s jmod"),
        vec![DeviceId, DeviceName, DrainNode, GateNode, SourceNode, ModelName]
    );
}

#[test]
fn xyce_vsource_dc_ac() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "V1 in 0 DC 5 AC 1 90"),
        vec![
            ("V".into(), DeviceId),
            ("1".into(), DeviceName),
            ("in".into(), PosNode),
            ("0".into(), NegNode),
            ("DC".into(), DcValue),
            ("5".into(), DcValueValue),
            ("AC".into(), AcValue),
            ("1".into(), AcMagValue),
            ("90".into(), AcPhaseValue),
        ]
    );
}

#[test]
fn xyce_vsource_pulse() {
    let g = XyceGrammar;
    let rendered = toks(&g, "V2 a 0 PULSE(0 1 1n 1n 1n 5n 10n)");
    assert_eq!(rendered[4], ("PULSE".into(), TransFuncType));
    assert_eq!(
        rendered[5..].iter().map(|(_, c)| *c).collect::<Vec<_>>(),
        vec![TransRefName; 7]
    );
}

#[test]
fn xyce_isource_pwl_pairs() {
    let g = XyceGrammar;
    let rendered = toks(&g, "I1 a 0 PWL (0,0) (1n,1m)");
    assert_eq!(rendered[4], ("PWL".into(), TransFuncType));
    assert_eq!(rendered.len(), 9);
}

#[test]
fn xyce_subckt_call_params_header() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "X1 a b mysub PARAMS: w=1"),
        vec![
            ("X".into(), DeviceId),
            ("1".into(), DeviceName),
            ("a".into(), SubcktDeviceParamValue),
            ("b".into(), SubcktDeviceParamValue),
            ("mysub".into(), SubcktDeviceParamValue),
            ("PARAMS:".into(), ParamsHeader),
            ("w".into(), ParamName),
            ("1".into(), ParamValue),
        ]
    );
}

#[test]
fn xyce_subckt_call_plain() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, "Xinv in out inv w=2"),
        vec![
            DeviceId,
            DeviceName,
            SubcktDeviceParamValue,
            SubcktDeviceParamValue,
            SubcktDeviceParamValue,
            ParamName,
            ParamValue,
        ]
    );
}

#[test]
fn xyce_controlled_sources() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, "E1 p n cp cn 2.0"),
        vec![
            DeviceId,
            DeviceName,
            PosNode,
            NegNode,
            PosControlNode,
            NegControlNode,
            GainValue,
        ]
    );
    assert_eq!(
        classes(&g, "G1 p n cp cn 1m"),
        vec![
            DeviceId,
            DeviceName,
            PosNode,
            NegNode,
            PosControlNode,
            NegControlNode,
            TransconductanceValue,
        ]
    );
}

#[test]
fn xyce_vcvs_value_expression() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "E3 p n VALUE = {V(a)*2}"),
        vec![
            ("E".into(), DeviceId),
            ("3".into(), DeviceName),
            ("p".into(), PosNode),
            ("n".into(), NegNode),
            ("VALUE".into(), ValueKeyword),
            ("{V(a)*2}".into(), Expression),
        ]
    );
}

#[test]
fn xyce_vcvs_poly() {
    let g = XyceGrammar;
    let rendered = toks(&g, "E2 p n POLY(2) 1 2 3");
    assert_eq!(rendered[4], ("POLY".into(), Poly));
    assert_eq!(rendered[5], ("2".into(), ParamValue));
    assert_eq!(
        rendered[6..].iter().map(|(_, c)| *c).collect::<Vec<_>>(),
        vec![PolyParamValue; 3]
    );
}

#[test]
fn xyce_behavioral_source() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "B1 p n V={V(x)+1}"),
        vec![
            ("B".into(), DeviceId),
            ("1".into(), DeviceName),
            ("p".into(), PosNode),
            ("n".into(), NegNode),
            ("V".into(), Voltage),
            ("{V(x)+1}".into(), Expression),
        ]
    );
}

#[test]
fn xyce_mutual_inductor() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "K1 L1 L2 0.95"),
        vec![
            ("K".into(), DeviceId),
            ("1".into(), DeviceName),
            ("L".into(), ControlDevice),
            ("1".into(), ControlDeviceName),
            ("L".into(), ControlDevice),
            ("2".into(), ControlDeviceName),
            ("0.95".into(), CouplingValue),
        ]
    );
}

#[test]
fn xyce_transmission_lines_and_switches() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, "T1 a1 a2 b1 b2 Z0=50"),
        vec![
            DeviceId,
            DeviceName,
            APortPosNode,
            APortNegNode,
            BPortPosNode,
            BPortNegNode,
            ParamName,
            ParamValue,
        ]
    );
    assert_eq!(
        classes(&g, "S1 p n cp cn smod ON"),
        vec![
            DeviceId,
            DeviceName,
            PosSwitchNode,
            NegSwitchNode,
            PosControlNode,
            NegControlNode,
            ModelName,
            On,
        ]
    );
}

#[test]
fn xyce_param_directive_with_expression() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, ".PARAM X = {2*Y+1}"),
        vec![
            (".PARAM".into(), DirectiveType),
            ("X".into(), ParamName),
            ("{2*Y+1}".into(), ParamValue),
        ]
    );
}

#[test]
fn xyce_analysis_directives() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, ".AC LIN 10 1k 10meg"),
        vec![DirectiveType, SweepType, PointsValue, StartFreqValue, EndFreqValue]
    );
    assert_eq!(
        classes(&g, ".TRAN 1n 10n"),
        vec![DirectiveType, PrintStepValue, FinalTimeValue]
    );
    assert_eq!(
        classes(&g, ".TRAN 1n 10n 0 0.1n UIC"),
        vec![
            DirectiveType,
            PrintStepValue,
            FinalTimeValue,
            StartTimeValue,
            StepCeilingValue,
            UicValue,
        ]
    );
    assert_eq!(
        classes(&g, ".DC vin 0 5 0.1"),
        vec![DirectiveType, SweepParamValue, SweepParamValue, SweepParamValue, SweepParamValue]
    );
    assert_eq!(classes(&g, ".OP"), vec![DirectiveType]);
    assert_eq!(classes(&g, ".END"), vec![DirectiveType]);
}

#[test]
fn xyce_model_directive() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, ".MODEL mname nmos (level=1 vto=0.5)"),
        vec![
            (".MODEL".into(), DirectiveType),
            ("mname".into(), ModelName),
            ("nmos".into(), ModelType),
            ("level".into(), ParamName),
            ("1".into(), ParamValue),
            ("vto".into(), ParamName),
            ("0.5".into(), ParamValue),
        ]
    );
}

#[test]
fn xyce_subckt_directive() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, ".SUBCKT inv in out PARAMS: w=1"),
        vec![
            DirectiveType,
            DeviceName,
            SubcktDirectiveParamValue,
            SubcktDirectiveParamValue,
            ParamsHeader,
            ParamName,
            ParamValue,
        ]
    );
    assert_eq!(
        classes(&g, ".ENDS inv"),
        vec![DirectiveType, ParamValue]
    );
}

#[test]
fn xyce_print_and_output_variables() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, ".PRINT TRAN V(1) I(V2) VDB(out,ref)"),
        vec![
            (".PRINT".into(), DirectiveType),
            ("TRAN".into(), AnalysisType),
            ("V(1)".into(), OutputVariable),
            ("I(V2)".into(), OutputVariable),
            ("VDB(out,ref)".into(), OutputVariable),
        ]
    );
}

#[test]
fn xyce_func_directive() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, ".FUNC f(a,b) {a*b}"),
        vec![
            (".FUNC".into(), DirectiveType),
            ("f".into(), FuncNameValue),
            ("a".into(), FuncArgValue),
            ("b".into(), FuncArgValue),
            ("{a*b}".into(), FuncExpression),
        ]
    );
}

#[test]
fn xyce_ic_and_include() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, ".IC V(n1)=1 V(n2)=0"),
        vec![
            DirectiveType,
            Voltage,
            GeneralNode,
            GeneralValue,
            Voltage,
            GeneralNode,
            GeneralValue,
        ]
    );
    assert_eq!(
        toks(&g, ".INCLUDE \"models.lib\""),
        vec![
            (".INCLUDE".into(), DirectiveType),
            ("\"models.lib\"".into(), Filename),
        ]
    );
    assert_eq!(
        classes(&g, ".LIB models.lib fast"),
        vec![DirectiveType, Filename, LibEntry]
    );
}

#[test]
fn xyce_measure_directive() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, ".MEASURE TRAN res MAX V(out)"),
        vec![
            DirectiveType,
            AnalysisType,
            ResultNameValue,
            AnalysisType,
            VariableExprOrValue,
        ]
    );
}

#[test]
fn xyce_inline_comment() {
    let g = XyceGrammar;
    let rendered = toks(&g, "R1 a b 1k ; trailing note");
    assert_eq!(
        rendered.last().unwrap(),
        &("; trailing note".to_string(), InlineComment)
    );
    assert_eq!(
        g.strip_inline_comment("R1 a b 1k ; trailing note"),
        "R1 a b 1k"
    );
}

#[test]
fn xyce_comment_line() {
    let g = XyceGrammar;
    assert_eq!(
        toks(&g, "* any text at all"),
        vec![("* any text at all".into(), Comment)]
    );
}

#[test]
fn xyce_rejects_garbage() {
    let g = XyceGrammar;
    rejects(&g, "??? unrecognizable garbage");
    rejects(&g, ".NOTADIRECTIVE foo");
}

#[test]
fn xyce_rest_of_line_directives() {
    let g = XyceGrammar;
    assert_eq!(
        classes(&g, ".MOR options go here"),
        vec![DirectiveType, RestOfLine]
    );
}

// HSPICE

#[test]
fn hspice_data_rows() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, "1.0 2.5 3e-3"),
        vec![DataParamValue, DataParamValue, DataParamValue]
    );
    assert_eq!(
        classes(&g, ".DATA tab vgs vds"),
        vec![DirectiveType, DataTableName, DataParamName, DataParamName]
    );
    assert_eq!(classes(&g, ".ENDDATA"), vec![DirectiveType]);
}

#[test]
fn hspice_param_function_definition() {
    let g = HspiceGrammar;
    assert_eq!(
        toks(&g, ".PARAM f(a,b)='a*b'"),
        vec![
            (".PARAM".into(), DirectiveType),
            ("f".into(), FuncNameValue),
            ("a".into(), FuncArgValue),
            ("b".into(), FuncArgValue),
            ("'a*b'".into(), FuncExpression),
        ]
    );
}

#[test]
fn hspice_quoted_device_value() {
    let g = HspiceGrammar;
    assert_eq!(
        toks(&g, "R1 a b 'w*2'"),
        vec![
            ("R".into(), DeviceId),
            ("1".into(), DeviceName),
            ("a".into(), PosNode),
            ("b".into(), NegNode),
            ("'w*2'".into(), ModelName),
        ]
    );
}

#[test]
fn hspice_conditionals() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, ".IF (corner==1)"),
        vec![DirectiveType, ConditionalStatement]
    );
    assert_eq!(
        classes(&g, ".ELSEIF (corner==2)"),
        vec![DirectiveType, ConditionalStatement]
    );
    assert_eq!(classes(&g, ".ELSE"), vec![DirectiveType]);
    assert_eq!(classes(&g, ".ENDIF"), vec![DirectiveType]);
}

#[test]
fn hspice_subckt_with_parens() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, ".SUBCKT inv (in out) w=1"),
        vec![
            DirectiveType,
            DeviceName,
            SubcktDirectiveParamValue,
            SubcktDirectiveParamValue,
            ParamName,
            ParamValue,
        ]
    );
    assert_eq!(classes(&g, ".MACRO buf a b"),
        vec![DirectiveType, DeviceName, SubcktDirectiveParamValue, SubcktDirectiveParamValue]);
    assert_eq!(classes(&g, ".EOM"), vec![DirectiveType]);
}

#[test]
fn hspice_data_driven_analyses() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, ".AC DATA=tab"),
        vec![DirectiveType, DataTableName]
    );
    assert_eq!(
        classes(&g, ".TRAN 1n 10n SWEEP DATA=tab"),
        vec![DirectiveType, PrintStepValue, FinalTimeValue, DataTableName]
    );
    assert_eq!(
        classes(&g, ".DC vin 0 5 0.1"),
        vec![
            DirectiveType,
            SweepParamValue,
            SweepParamValue,
            SweepParamValue,
            SweepParamValue,
        ]
    );
}

#[test]
fn hspice_option_and_temp() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, ".OPTION scale=1u"),
        vec![DirectiveType, ParamName, ParamValue]
    );
    assert_eq!(
        classes(&g, ".OPTIONS post=1 scale=1u"),
        vec![DirectiveType, ParamName, ParamValue, ParamName, ParamValue]
    );
    assert_eq!(
        classes(&g, ".TEMP 27 85"),
        vec![DirectiveType, ListParamValue, ListParamValue]
    );
}

#[test]
fn hspice_print_with_par() {
    let g = HspiceGrammar;
    assert_eq!(
        classes(&g, ".PROBE TRAN V(out) PAR('v(out)/v(in)')"),
        vec![DirectiveType, AnalysisType, OutputVariable, OutputVariable]
    );
}

#[test]
fn hspice_inline_comments() {
    let g = HspiceGrammar;
    let rendered = toks(&g, "C1 a b 1p $ trailing");
    assert_eq!(rendered.last().unwrap().1, InlineComment);
    assert_eq!(g.strip_inline_comment("C1 a b 1p $ trailing"), "C1 a b 1p");
    assert_eq!(
        toks(&g, "// a comment line"),
        vec![("// a comment line".into(), Comment)]
    );
}

// PSPICE

#[test]
fn pspice_falls_back_to_base() {
    let g = PspiceGrammar;
    assert_eq!(
        classes(&g, "R1 a b 10k"),
        vec![DeviceId, DeviceName, PosNode, NegNode, ModelName]
    );
}

#[test]
fn pspice_probe_directives() {
    let g = PspiceGrammar;
    assert_eq!(
        toks(&g, ".PROBE V([out]) I(R1)"),
        vec![
            (".PROBE".into(), DirectiveType),
            ("V([out])".into(), OutputVariable),
            ("I(R1)".into(), OutputVariable),
        ]
    );
    assert_eq!(
        classes(&g, ".PROBE/CSDF V(out)"),
        vec![DirectiveType, ParamValue, OutputVariable]
    );
    assert_eq!(
        classes(&g, ".PROBE64 VB(q3)"),
        vec![DirectiveType, OutputVariable]
    );
}

#[test]
fn pspice_alias_output() {
    let g = PspiceGrammar;
    assert_eq!(
        classes(&g, ".PROBE V(alias(net5))"),
        vec![DirectiveType, OutputVariable]
    );
}

#[test]
fn pspice_tran_op() {
    let g = PspiceGrammar;
    assert_eq!(
        classes(&g, ".TRAN/OP 1n 100n"),
        vec![DirectiveType, ParamValue, PrintStepValue, FinalTimeValue]
    );
}

#[test]
fn pspice_unsupported_directives() {
    let g = PspiceGrammar;
    assert_eq!(
        classes(&g, ".MC 10 TRAN V(out) YMAX"),
        vec![DirectiveType, RestOfLine]
    );
    assert_eq!(classes(&g, ".TEMP 27"), vec![DirectiveType, ListParamValue]);
}

// TSPICE

#[test]
fn tspice_macro_aliases() {
    let g = TspiceGrammar;
    assert_eq!(
        classes(&g, ".MACRO mysub a b"),
        vec![
            DirectiveType,
            DeviceName,
            SubcktDirectiveParamValue,
            SubcktDirectiveParamValue,
        ]
    );
    assert_eq!(classes(&g, ".EOM"), vec![DirectiveType]);
}

#[test]
fn tspice_semicolon_comment() {
    let g = TspiceGrammar;
    assert_eq!(
        toks(&g, "; a tanner comment"),
        vec![("; a tanner comment".into(), Comment)]
    );
}

#[test]
fn tspice_rest_of_line_directives() {
    let g = TspiceGrammar;
    assert_eq!(
        classes(&g, ".PROBE everything"),
        vec![DirectiveType, RestOfLine]
    );
    assert_eq!(
        classes(&g, ".ALTER second pass"),
        vec![DirectiveType, RestOfLine]
    );
}

#[test]
fn tspice_base_device_fallback() {
    let g = TspiceGrammar;
    assert_eq!(
        classes(&g, "M1 d g s b nmos w=1"),
        vec![
            DeviceId,
            DeviceName,
            DrainNode,
            GateNode,
            SourceNode,
            SubstrateNode,
            ModelName,
            ParamName,
            ParamValue,
        ]
    );
}

#[test]
fn tspice_measure() {
    let g = TspiceGrammar;
    assert_eq!(
        classes(&g, ".MEASURE TRAN res MAX v(out)"),
        vec![
            DirectiveType,
            AnalysisType,
            ResultNameValue,
            AnalysisType,
            OutputVariable,
        ]
    );
}

// SPECTRE

#[test]
fn spectre_parenthesized_capacitor() {
    let g = SpectreGrammar;
    assert_eq!(
        toks(&g, "C1 (cc out) capacitor c=1pF"),
        vec![
            ("C1".into(), DeviceName),
            ("cc".into(), PosNode),
            ("out".into(), NegNode),
            ("capacitor".into(), DeviceId),
            ("c".into(), ParamName),
            ("1pF".into(), ParamValue),
        ]
    );
}

#[test]
fn spectre_bare_resistor() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "r1 1 0 resistor r=1k"),
        vec![DeviceName, PosNode, NegNode, DeviceId, ParamName, ParamValue]
    );
}

#[test]
fn spectre_vsource() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "v1 (vdd 0) vsource dc=1.8 mag=1"),
        vec![DeviceName, PosNode, NegNode, DeviceId, DcValueValue, AcMagValue]
    );
}

#[test]
fn spectre_parameters_directive() {
    let g = SpectreGrammar;
    assert_eq!(
        toks(&g, "parameters freq=1G vdd=1.8"),
        vec![
            ("parameters".into(), DirectiveType),
            ("freq".into(), ParamName),
            ("1G".into(), ParamValue),
            ("vdd".into(), ParamName),
            ("1.8".into(), ParamValue),
        ]
    );
}

#[test]
fn spectre_unknown_device_paren() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "m1 (d g s b) mymodel w=1u l=90n"),
        vec![
            DeviceName,
            UnknownNode,
            UnknownNode,
            UnknownNode,
            UnknownNode,
            ModelName,
            ParamName,
            ParamValue,
            ParamName,
            ParamValue,
        ]
    );
}

#[test]
fn spectre_unknown_device_bare() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "x1 a b myblock"),
        vec![DeviceName, UnknownNode, UnknownNode, ModelName]
    );
}

#[test]
fn spectre_subckt_block() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "subckt inv (in out)"),
        vec![
            DirectiveType,
            DeviceName,
            SubcktDirectiveParamValue,
            SubcktDirectiveParamValue,
        ]
    );
    assert_eq!(
        classes(&g, "inline subckt buf (a y)"),
        vec![
            DirectiveType,
            DeviceName,
            SubcktDirectiveParamValue,
            SubcktDirectiveParamValue,
        ]
    );
    assert_eq!(classes(&g, "ends inv"), vec![DirectiveType, ParamValue]);
}

#[test]
fn spectre_model_forms() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "model nch bsim4 vth0=0.4"),
        vec![DirectiveType, ModelName, ModelType, ParamName, ParamValue]
    );
    assert_eq!(
        classes(&g, "model res2 resistor {"),
        vec![DirectiveType, ModelName, ModelType, BlockDelimiter]
    );
}

#[test]
fn spectre_binned_model_line() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "1: lmin=0.1 lmax=0.3"),
        vec![BinnedModelName, ParamName, ParamValue, ParamName, ParamValue]
    );
}

#[test]
fn spectre_if_blocks() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "if (corner == 1) {"),
        vec![DirectiveType, ConditionalStatement, BlockDelimiter]
    );
    assert_eq!(
        classes(&g, "} else {"),
        vec![BlockDelimiter, DirectiveType, BlockDelimiter]
    );
    assert_eq!(classes(&g, "}"), vec![BlockDelimiter]);
}

#[test]
fn spectre_analyses() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "sweep1 ac start=1 stop=1G dec=10"),
        vec![DirectiveType, StartFreqValue, EndFreqValue, SweepType, PointsValue]
    );
    assert_eq!(
        classes(&g, "tran tran stop=10n"),
        vec![DirectiveType, DirectiveType, ParamName, ParamValue]
    );
    assert_eq!(
        classes(&g, "dc1 dc param=vdd start=0 stop=1.8 step=0.1"),
        vec![
            DirectiveType,
            DcSweepParam,
            DcSweepStart,
            DcSweepStop,
            DcSweepStep,
        ]
    );
}

#[test]
fn spectre_library_structure() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "library mylib"),
        vec![DirectiveType, RestOfLine]
    );
    assert_eq!(
        classes(&g, "section tt"),
        vec![DirectiveType, LibEntry]
    );
    assert_eq!(classes(&g, "endsection tt"), vec![DirectiveType, LibEntry]);
    assert_eq!(
        classes(&g, "include \"models.scs\" section=tt"),
        vec![DirectiveType, Filename, LibEntry]
    );
}

#[test]
fn spectre_function_definition() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "real f(real a, real b) { return a + b }"),
        vec![
            DirectiveType,
            FuncNameValue,
            FuncArgValue,
            FuncArgValue,
            BlockDelimiter,
            FuncExpression,
            BlockDelimiter,
        ]
    );
}

#[test]
fn spectre_save_and_global() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "save out in"),
        vec![DirectiveType, OutputVariable, OutputVariable]
    );
    assert_eq!(
        classes(&g, "global 0 vdd"),
        vec![DirectiveType, GeneralNode, GeneralNode]
    );
    assert_eq!(
        classes(&g, "simulator lang=spectre"),
        vec![DirectiveType, ParamName, ParamValue]
    );
}

#[test]
fn spectre_unsupported_analysis() {
    let g = SpectreGrammar;
    assert_eq!(
        classes(&g, "montecarlo seed=1 numruns=10 {"),
        vec![DirectiveType, RestOfLine]
    );
}

#[test]
fn spectre_comments() {
    let g = SpectreGrammar;
    assert_eq!(
        toks(&g, "// top comment"),
        vec![("// top comment".into(), Comment)]
    );
    let rendered = toks(&g, "r1 1 0 resistor r=1k // note");
    assert_eq!(rendered.last().unwrap().1, InlineComment);
    assert_eq!(
        g.strip_inline_comment("r1 1 0 resistor r=1k // note"),
        "r1 1 0 resistor r=1k"
    );
}

#[test]
fn spectre_rejects_garbage() {
    let g = SpectreGrammar;
    rejects(&g, "}{ ((");
}
