//! The closed vocabulary of semantic token classes, and the tokens that
//! carry them.
//!
//! Every token emitted by a dialect grammar carries one or more candidate
//! classes. Multiple classes express deliberate ambiguity: an identifier in
//! a position where the grammar cannot yet decide whether it names a model
//! or is a positional value carries both `MODEL_NAME` and `VALUE`, and the
//! downstream consumer (which holds the device schemas) resolves it.
//!
//! The class set is closed; adding a class is a schema change. Serialized
//! names are the stable uppercase identifiers returned by
//! [`TokenClass::as_str`].

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::Substr;

macro_rules! token_classes {
    ($($variant:ident => $name:literal,)*) => {
        /// A semantic tag attached to an emitted token.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[allow(missing_docs)]
        pub enum TokenClass {
            $($variant,)*
        }

        impl TokenClass {
            /// Every class, in schema order.
            pub const ALL: &'static [TokenClass] = &[$(Self::$variant,)*];

            /// The stable serialized name of this class.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }

        impl FromStr for TokenClass {
            type Err = ParseTokenClassError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)*
                    _ => Err(ParseTokenClassError),
                }
            }
        }
    };
}

token_classes! {
    DeviceId => "DEVICE_ID",
    DeviceName => "DEVICE_NAME",
    DirectiveType => "DIRECTIVE_TYPE",
    PosNode => "POSNODE",
    NegNode => "NEGNODE",
    GeneralNode => "GENERALNODE",
    Value => "VALUE",
    OptionPkgTypeValue => "OPTION_PKG_TYPE_VALUE",
    ModelName => "MODEL_NAME",
    TransFuncType => "TRANS_FUNC_TYPE",
    TransRefName => "TRANS_REF_NAME",
    ParamName => "PARAM_NAME",
    ParamValue => "PARAM_VALUE",
    OutputVariable => "OUTPUT_VARIABLE",
    AnalysisType => "ANALYSIS_TYPE",
    FunctionName => "FUNCTION_NAME",
    Expression => "EXPRESSION",
    SweepType => "SWEEP_TYPE",
    InlineComment => "INLINE_COMMENT",
    ParamsHeader => "PARAMS_HEADER",
    On => "ON",
    Off => "OFF",
    List => "LIST",
    Lin => "LIN",
    Oct => "OCT",
    Dec => "DEC",
    Table => "TABLE",
    Voltage => "VOLTAGE",
    Current => "CURRENT",
    ModelType => "MODEL_TYPE",
    Comment => "COMMENT",
    DrainNode => "DRAINNODE",
    GateNode => "GATENODE",
    SourceNode => "SOURCENODE",
    Anode => "ANODE",
    PosControlNode => "POSCONTROLNODE",
    NegControlNode => "NEGCONTROLNODE",
    CollectorNode => "COLLECTORNODE",
    BaseNode => "BASENODE",
    EmitterNode => "EMITTERNODE",
    CollectorPrimeNode => "COLLECTORPRIMENODE",
    BasePrimeNode => "BASEPRIMENODE",
    EmitterPrimeNode => "EMITTERPRIMENODE",
    PosSwitchNode => "POSSWITCHNODE",
    NegSwitchNode => "NEGSWITCHNODE",
    APortPosNode => "APORTPOSNODE",
    APortNegNode => "APORTNEGNODE",
    BPortPosNode => "BPORTPOSNODE",
    BPortNegNode => "BPORTNEGNODE",
    SubstrateNode => "SUBSTRATENODE",
    TemperatureNode => "TEMPERATURENODE",
    LowOutputNode => "LOWOUTPUTNODE",
    HighOutputNode => "HIGHOUTPUTNODE",
    InputReferenceNode => "INPUTREFERENCENODE",
    InputNode => "INPUTNODE",
    OutputNode => "OUTPUTNODE",
    AccelerationNode => "ACCELERATIONNODE",
    VelocityNode => "VELOCITYNODE",
    PositionNode => "POSITIONNODE",
    Filename => "FILENAME",
    ControlDevice => "CONTROL_DEVICE",
    ControlDevValue => "CONTROL_DEV_VALUE",
    Title => "TITLE",
    ValueKeyword => "VALUE_KEYWORD",
    GainValue => "GAIN_VALUE",
    TransconductanceValue => "TRANSCONDUCTANCE_VALUE",
    VbicModel => "VBIC_MODEL",
    VbicModelName => "VBIC_MODEL_NAME",
    ThermalNode => "THERMALNODE",
    AreaValue => "AREA_VALUE",
    ListParamValue => "LIST_PARAM_VALUE",
    Poly => "POLY",
    PolyValue => "POLY_VALUE",
    ControlDeviceName => "CONTROL_DEVICE_NAME",
    PrintStepValue => "PRINT_STEP_VALUE",
    FinalTimeValue => "FINAL_TIME_VALUE",
    StartTimeValue => "START_TIME_VALUE",
    StepCeilingValue => "STEP_CEILING_VALUE",
    CouplingValue => "COUPLING_VALUE",
    LibEntry => "LIB_ENTRY",
    DcValue => "DC_VALUE",
    DcValueValue => "DC_VALUE_VALUE",
    AcValue => "AC_VALUE",
    AcMagValue => "AC_MAG_VALUE",
    AcPhaseValue => "AC_PHASE_VALUE",
    ResultNameValue => "RESULT_NAME_VALUE",
    MeasurementType => "MEASUREMENT_TYPE",
    ExternalBodyContactNode => "EXTERNALBODYCONTACTNODE",
    InternalBodyContactNode => "INTERNALBODYCONTACTNODE",
    PreprocessKeyword => "PREPROCESS_KEYWORD",
    Control => "CONTROL",
    TableParamValue => "TABLE_PARAM_VALUE",
    PolyParamValue => "POLY_PARAM_VALUE",
    ControlParamValue => "CONTROL_PARAM_VALUE",
    SubcktDirectiveParamValue => "SUBCKT_DIRECTIVE_PARAM_VALUE",
    SubcktDeviceParamValue => "SUBCKT_DEVICE_PARAM_VALUE",
    PointsValue => "POINTS_VALUE",
    StartFreqValue => "START_FREQ_VALUE",
    EndFreqValue => "END_FREQ_VALUE",
    GeneralValue => "GENERAL_VALUE",
    FundFreqValue => "FUND_FREQ_VALUE",
    FreqValue => "FREQ_VALUE",
    FuncArgValue => "FUNC_ARG_VALUE",
    FuncNameValue => "FUNC_NAME_VALUE",
    FuncExpression => "FUNC_EXPRESSION",
    NoopValue => "NOOP_VALUE",
    UicValue => "UIC_VALUE",
    ScheduleType => "SCHEDULE_TYPE",
    ScheduleParamValue => "SCHEDULE_PARAM_VALUE",
    SweepParamValue => "SWEEP_PARAM_VALUE",
    TempValue => "TEMP_VALUE",
    RestOfLine => "REST_OF_LINE",
    DigDevType => "DIG_DEV_TYPE",
    UnknownNode => "UNKNOWN_NODE",
    DefaultParamName => "DEFAULT_PARAM_NAME",
    MeasureType => "MEASURE_TYPE",
    MeasureQualifier => "MEASURE_QUALIFIER",
    MeasureParamName => "MEASURE_PARAM_NAME",
    MeasureParamValue => "MEASURE_PARAM_VALUE",
    VariableExprOrValue => "VARIABLE_EXPR_OR_VALUE",
    StandaloneParam => "STANDALONE_PARAM",
    DataTableName => "DATA_TABLE_NAME",
    DataParamName => "DATA_PARAM_NAME",
    DataParamValue => "DATA_PARAM_VALUE",
    BlockDelimiter => "BLOCK_DELIMITER",
    ConditionalStatement => "CONDITIONAL_STATEMENT",
    BinnedModelName => "BINNED_MODEL_NAME",
    DcSweepDev => "DC_SWEEP_DEV",
    DcSweepParam => "DC_SWEEP_PARAM",
    DcSweepStart => "DC_SWEEP_START",
    DcSweepStop => "DC_SWEEP_STOP",
    DcSweepStep => "DC_SWEEP_STEP",
}

impl Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error parsing a [`TokenClass`] from its serialized name.
#[derive(Copy, Clone, Debug, Error)]
#[error("error parsing token class")]
pub struct ParseTokenClassError;

/// A classified token: the captured lexeme plus its candidate classes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The captured lexeme, sometimes normalized.
    pub value: Substr,
    /// Candidate classes, in priority order. Never empty.
    pub classes: Vec<TokenClass>,
}

impl Token {
    /// Creates a token with a single candidate class.
    pub fn new(value: impl Into<Substr>, class: TokenClass) -> Self {
        Self {
            value: value.into(),
            classes: vec![class],
        }
    }

    /// Creates a token with multiple candidate classes.
    pub fn with_classes(value: impl Into<Substr>, classes: impl Into<Vec<TokenClass>>) -> Self {
        let classes = classes.into();
        debug_assert!(!classes.is_empty());
        Self {
            value: value.into(),
            classes,
        }
    }

    /// Returns `true` if `class` is among this token's candidates.
    pub fn has_class(&self, class: TokenClass) -> bool {
        self.classes.contains(&class)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}, [", self.value)?;
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", class)?;
        }
        write!(f, "]}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_round_trip() {
        for class in TokenClass::ALL {
            assert_eq!(class.as_str().parse::<TokenClass>().unwrap(), *class);
        }
    }

    #[test]
    fn unknown_class_name_is_rejected() {
        assert!("NOT_A_CLASS".parse::<TokenClass>().is_err());
    }

    #[test]
    fn token_display() {
        let t = Token::with_classes("10k", vec![TokenClass::ModelName, TokenClass::Value]);
        assert_eq!(t.to_string(), "{10k, [MODEL_NAME, VALUE]}");
    }
}
