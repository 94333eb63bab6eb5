//! The expression abstract syntax tree.
//!
//! Construction is performed only by the grammar in [`crate::grammar`]; the
//! evaluator and the token printer are pure consumers. Ternary branches,
//! function-call texts, and function bodies are kept as *unparsed* source
//! substrings and re-entered on demand, so dead branches are never parsed
//! and call arguments can be evaluated in the caller's scope.

/// A binary arithmetic or boolean step in a left-associative chain.
///
/// The operator is kept as its source lexeme (`"**"` and `"^"` are distinct
/// lexemes with identical semantics) so the token printer can reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// The operator lexeme.
    pub op: String,
    /// The right-hand operand.
    pub operand: Expr,
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Expr {
    /// An empty expression. Produced only as a placeholder default.
    #[default]
    Nil,
    /// A numeric literal, unparsed, with any SI suffix retained.
    Number(String),
    /// A reference to a named parameter.
    Variable(String),
    /// A sign applied to an operand.
    Unary {
        /// `'+'` or `'-'`.
        sign: char,
        /// The signed operand.
        operand: Box<Expr>,
    },
    /// A left-associative chain of `+ - * / ** ^` steps.
    Binary {
        /// The leftmost operand.
        first: Box<Expr>,
        /// The remaining `(op, rhs)` steps, applied left to right.
        rest: Vec<Operation>,
    },
    /// A left-associative chain of `|| && == != < <= > >=` steps.
    Bool {
        /// The leftmost operand.
        first: Box<Expr>,
        /// The remaining `(op, rhs)` steps, applied left to right.
        rest: Vec<Operation>,
    },
    /// A lazy conditional. All three parts are unparsed source text.
    Ternary {
        /// The condition text.
        cond: String,
        /// The text evaluated when the condition is nonzero.
        left: String,
        /// The text evaluated when the condition is zero.
        right: String,
    },
    /// `name = rhs`.
    Assignment {
        /// The parameter being assigned.
        name: String,
        /// The evaluated right-hand side.
        rhs: Box<Expr>,
    },
    /// A user function definition: `f(a, b) = body`.
    FuncDef {
        /// The signature text, e.g. `"f(a, b)"`.
        signature: String,
        /// The body text, unparsed.
        body: String,
    },
    /// A call of a user-defined function, kept as the full call text
    /// (e.g. `"f(x + 1, y)"`).
    FuncCall(String),
    /// A built-in function call or constant, kept as the full source text.
    BuiltIn(String),
    /// The top-level wrapper produced by a successful parse.
    Root(Box<Expr>),
}

impl Expr {
    /// Wraps `self` in a [`Expr::Root`] node.
    pub(crate) fn into_root(self) -> Expr {
        Expr::Root(Box::new(self))
    }
}
