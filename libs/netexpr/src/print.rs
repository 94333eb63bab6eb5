//! Linearizes an expression AST back into a sequence of classified tokens.
//!
//! The netlist tokenizer uses this to embed a fully-classified sub-stream
//! for an expression that appears inline, e.g. the right-hand side of a
//! `.param`. Operands are emitted before their operator, so a chain
//! `a + b - c` linearizes as `a b + c -`.

use crate::ast::{Expr, Operation};
use crate::grammar::split_call_text;

/// Semantic classes attached to expression tokens.
///
/// The set is closed; serialized names are the stable uppercase identifiers
/// returned by [`ExprClass::as_str`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum ExprClass {
    Add,
    BuiltinConst,
    BuiltinFunc,
    Divide,
    Equality,
    Equals,
    Exponentiation,
    FuncBegin,
    FuncEnd,
    FuncName,
    FuncArg,
    GreaterThan,
    GreaterThanOrEqual,
    Inequality,
    LessThan,
    LessThanOrEqual,
    LogicalAnd,
    LogicalOr,
    Multiply,
    Number,
    ParamName,
    Power,
    Subtract,
    TernaryCondition,
    TernaryLeft,
    TernaryRight,
    UnaryNeg,
    UnaryPos,
}

impl ExprClass {
    /// The stable serialized name of this class.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::BuiltinConst => "BUILTIN_CONST",
            Self::BuiltinFunc => "BUILTIN_FUNC",
            Self::Divide => "DIVIDE",
            Self::Equality => "EQUALITY",
            Self::Equals => "EQUALS",
            Self::Exponentiation => "EXPONENTIATION",
            Self::FuncBegin => "FUNC_BEGIN",
            Self::FuncEnd => "FUNC_END",
            Self::FuncName => "FUNC_NAME",
            Self::FuncArg => "FUNC_ARG",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::Inequality => "INEQUALITY",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::LogicalAnd => "LOGICAL_AND",
            Self::LogicalOr => "LOGICAL_OR",
            Self::Multiply => "MULTIPLY",
            Self::Number => "NUMBER",
            Self::ParamName => "PARAM_NAME",
            Self::Power => "POWER",
            Self::Subtract => "SUBTRACT",
            Self::TernaryCondition => "TERNARY_CONDITION",
            Self::TernaryLeft => "TERNARY_LEFT",
            Self::TernaryRight => "TERNARY_RIGHT",
            Self::UnaryNeg => "UNARY_NEG",
            Self::UnaryPos => "UNARY_POS",
        }
    }
}

impl std::fmt::Display for ExprClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified expression token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExprToken {
    /// The captured lexeme or substring.
    pub value: String,
    /// Candidate classes, non-empty.
    pub classes: Vec<ExprClass>,
}

impl ExprToken {
    fn new(value: impl Into<String>, class: ExprClass) -> Self {
        Self {
            value: value.into(),
            classes: vec![class],
        }
    }
}

/// Walks the AST and emits one classified token per significant element.
pub fn print_tokens(expr: &Expr) -> Vec<ExprToken> {
    let mut out = Vec::new();
    visit(expr, &mut out);
    out
}

fn visit(expr: &Expr, out: &mut Vec<ExprToken>) {
    match expr {
        Expr::Nil => {}
        Expr::Variable(name) => out.push(ExprToken::new(name.clone(), ExprClass::ParamName)),
        Expr::Number(lit) => out.push(ExprToken::new(lit.clone(), ExprClass::Number)),
        Expr::Unary { sign, operand } => {
            visit(operand, out);
            let class = match sign {
                '-' => ExprClass::UnaryNeg,
                _ => ExprClass::UnaryPos,
            };
            out.push(ExprToken::new(sign.to_string(), class));
        }
        Expr::Binary { first, rest } => {
            visit(first, out);
            for Operation { op, operand } in rest {
                visit(operand, out);
                out.push(ExprToken::new(op.clone(), arith_class(op)));
            }
        }
        Expr::Bool { first, rest } => {
            visit(first, out);
            for Operation { op, operand } in rest {
                visit(operand, out);
                out.push(ExprToken::new(op.clone(), bool_class(op)));
            }
        }
        Expr::Assignment { rhs, .. } => visit(rhs, out),
        Expr::FuncDef { .. } => {}
        Expr::FuncCall(text) => emit_call(text, ExprClass::FuncName, out),
        Expr::BuiltIn(text) => {
            let (name, args) = split_call_text(text);
            match args {
                None => out.push(ExprToken::new(name, ExprClass::BuiltinConst)),
                Some(_) => emit_call(text, ExprClass::BuiltinFunc, out),
            }
        }
        Expr::Ternary { cond, left, right } => {
            out.push(ExprToken::new(cond.clone(), ExprClass::TernaryCondition));
            out.push(ExprToken::new(left.clone(), ExprClass::TernaryLeft));
            out.push(ExprToken::new(right.clone(), ExprClass::TernaryRight));
        }
        Expr::Root(inner) => visit(inner, out),
    }
}

fn emit_call(text: &str, name_class: ExprClass, out: &mut Vec<ExprToken>) {
    let (name, args) = split_call_text(text);
    out.push(ExprToken::new(name, name_class));
    out.push(ExprToken::new("(", ExprClass::FuncBegin));
    for arg in args.unwrap_or_default() {
        out.push(ExprToken::new(arg, ExprClass::FuncArg));
    }
    out.push(ExprToken::new(")", ExprClass::FuncEnd));
}

fn arith_class(op: &str) -> ExprClass {
    match op {
        "+" => ExprClass::Add,
        "-" => ExprClass::Subtract,
        "*" => ExprClass::Multiply,
        "/" => ExprClass::Divide,
        _ => ExprClass::Power,
    }
}

fn bool_class(op: &str) -> ExprClass {
    match op {
        "||" => ExprClass::LogicalOr,
        "&&" => ExprClass::LogicalAnd,
        "!=" => ExprClass::Inequality,
        "==" => ExprClass::Equality,
        ">=" => ExprClass::GreaterThanOrEqual,
        "<=" => ExprClass::LessThanOrEqual,
        ">" => ExprClass::GreaterThan,
        _ => ExprClass::LessThan,
    }
}
