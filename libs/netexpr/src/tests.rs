use approx::assert_relative_eq;
use diagnostics::IssueSet;

use crate::ast::Expr;
use crate::{
    parse, print_tokens, process_input, resolve_params, strip_expr_delimiters, ExprClass,
    ExprDialect, PendingParam, SymbolTable,
};

fn eval(input: &str) -> f64 {
    let mut table = SymbolTable::new();
    process_input(input, ExprDialect::Hspice, &mut table)
}

fn eval_with(input: &str, table: &mut SymbolTable) -> f64 {
    process_input(input, ExprDialect::Hspice, table)
}

#[test]
fn arithmetic_precedence() {
    assert_relative_eq!(eval("1 + 2 * 3"), 7.0);
    assert_relative_eq!(eval("2 * 3 + 4"), 10.0);
    assert_relative_eq!(eval("10 / 4"), 2.5);
    assert_relative_eq!(eval("2 ** 3"), 8.0);
    assert_relative_eq!(eval("2 ^ 3"), 8.0);
    assert_relative_eq!(eval("2 ** 3 ** 2"), 64.0);
    assert_relative_eq!(eval("(1 + 2) * 3"), 9.0);
    assert_relative_eq!(eval("1 - 2 - 3"), -4.0);
}

#[test]
fn unary_signs() {
    assert_relative_eq!(eval("-4"), -4.0);
    assert_relative_eq!(eval("+4"), 4.0);
    assert_relative_eq!(eval("-(2 + 3)"), -5.0);
    assert_relative_eq!(eval("2 * -3"), -6.0);
}

#[test]
fn si_suffixes() {
    assert_relative_eq!(eval("1u"), 1e-6);
    assert_relative_eq!(eval("2.5k"), 2500.0);
    assert_relative_eq!(eval("3e-3"), 0.003);
    assert_relative_eq!(eval("1x"), 1e6);
    assert_relative_eq!(eval("10K"), 10_000.0);
    assert_relative_eq!(eval("4.7n"), 4.7e-9);
    assert_relative_eq!(eval("1g"), 1e9);
    assert_relative_eq!(eval(".5m"), 0.5e-3);
}

#[test]
fn spectre_unit_tails() {
    let mut table = SymbolTable::new();
    let mut eval_sp = |s: &str| process_input(s, ExprDialect::Spectre, &mut table);
    assert_relative_eq!(eval_sp("1pF"), 1e-12);
    assert_relative_eq!(eval_sp("5V"), 5.0);
    assert_relative_eq!(eval_sp("2s"), 2.0);
    assert_relative_eq!(eval_sp("3kH"), 3000.0);
    // A bare trailing `f` is femto, not a farad tail.
    assert_relative_eq!(eval_sp("100f"), 1e-13);
}

#[test]
fn unresolved_variable_is_nan() {
    assert!(eval("nosuchparam").is_nan());
    assert!(eval("1 + nosuchparam").is_nan());
}

#[test]
fn variables_resolve() {
    let mut table = SymbolTable::new();
    table.define_var("w", 2.0);
    assert_relative_eq!(eval_with("w * 3", &mut table), 6.0);
}

#[test]
fn assignment_updates_table() {
    let mut table = SymbolTable::new();
    table.define_var("Y", 3.0);
    assert_relative_eq!(eval_with("X = 2*Y+1", &mut table), 7.0);
    assert_relative_eq!(table.variables["X"], 7.0);
}

#[test]
fn quoted_ternary_assignment() {
    let mut table = SymbolTable::new();
    table.define_var("A", -4.0);
    assert_relative_eq!(eval_with("Z = 'A>0 ? A : -A'", &mut table), 4.0);
    table.define_var("A", 4.0);
    assert_relative_eq!(eval_with("Z = 'A>0 ? A : -A'", &mut table), 4.0);
}

#[test]
fn ternary_dead_branch_is_never_parsed() {
    let mut table = SymbolTable::new();
    table.define_var("a", 5.0);
    // `b` is unbound and its branch divides by zero; neither matters
    // because the branch is never entered.
    assert_relative_eq!(eval_with("1 ? a : b/0", &mut table), 5.0);
}

#[test]
fn ternary_condition_nan_poisons() {
    let mut table = SymbolTable::new();
    table.define_var("a", 5.0);
    assert!(eval_with("q > 0 ? a : a", &mut table).is_nan());
}

#[test]
fn boolean_operators() {
    assert_relative_eq!(eval("1 && 2"), 1.0);
    assert_relative_eq!(eval("1 && 0"), 0.0);
    assert_relative_eq!(eval("0 || 0"), 0.0);
    assert_relative_eq!(eval("0 || 3"), 1.0);
    assert_relative_eq!(eval("2 == 2"), 1.0);
    assert_relative_eq!(eval("2 != 2"), 0.0);
    assert_relative_eq!(eval("1 <= 2"), 1.0);
    assert_relative_eq!(eval("1 >= 2"), 0.0);
    assert!(eval("1 < nosuch").is_nan());
}

#[test]
fn function_definition_and_call() {
    let mut table = SymbolTable::new();
    assert_relative_eq!(eval_with("f(a, b) = a * b", &mut table), 0.0);
    assert_eq!(table.function_formals["f"], vec!["a", "b"]);
    assert_eq!(table.function_bodies["f"], "a * b");
    assert_relative_eq!(eval_with("f(2, 3)", &mut table), 6.0);
    // Nested call arguments are split at parenthesis depth zero only.
    assert_relative_eq!(eval_with("f(2, f(3, 4))", &mut table), 24.0);
}

#[test]
fn function_call_restores_bound_formals() {
    let mut table = SymbolTable::new();
    table.define_var("x", 7.0);
    eval_with("f(x) = x + 1", &mut table);
    assert_relative_eq!(eval_with("f(3)", &mut table), 4.0);
    assert_relative_eq!(table.variables["x"], 7.0);
}

#[test]
fn function_call_restores_unbound_formals() {
    let mut table = SymbolTable::new();
    eval_with("g(y) = y * 2", &mut table);
    assert_relative_eq!(eval_with("g(5)", &mut table), 10.0);
    assert!(!table.variables.contains_key("y"));
}

#[test]
fn function_call_nan_argument_restores_and_poisons() {
    let mut table = SymbolTable::new();
    table.define_var("x", 7.0);
    eval_with("f(x) = x + 1", &mut table);
    assert!(eval_with("f(zz)", &mut table).is_nan());
    assert_relative_eq!(table.variables["x"], 7.0);
}

#[test]
fn function_body_sees_caller_free_variables() {
    let mut table = SymbolTable::new();
    table.define_var("scale", 10.0);
    eval_with("h(v) = v * scale", &mut table);
    assert_relative_eq!(eval_with("h(3)", &mut table), 30.0);
}

#[test]
fn undefined_function_call_is_nan() {
    assert!(eval("nosuchfunc(1)").is_nan());
}

#[test]
fn builtin_functions() {
    assert_relative_eq!(eval("min(2, 3)"), 2.0);
    assert_relative_eq!(eval("max(2, 3)"), 3.0);
    assert_relative_eq!(eval("abs(-2)"), 2.0);
    assert_relative_eq!(eval("sqrt(9)"), 3.0);
    assert_relative_eq!(eval("int(2.9)"), 2.0);
    assert_relative_eq!(eval("int(-2.9)"), -2.0);
    assert_relative_eq!(eval("sgn(-3)"), -1.0);
    assert_relative_eq!(eval("sgn(0)"), 0.0);
    assert_relative_eq!(eval("sgn(9)"), 1.0);
    assert_relative_eq!(eval("pow(2, 3.7)"), 8.0);
    assert_relative_eq!(eval("pwr(-2, 2)"), -4.0);
    assert_relative_eq!(eval("pwr(2, 2)"), 4.0);
    assert_relative_eq!(eval("exp(0)"), 1.0);
    assert_relative_eq!(eval("log(1)"), 0.0);
    assert_relative_eq!(eval("log10(1000)"), 3.0);
    assert_relative_eq!(eval("cos(0)"), 1.0);
    assert_relative_eq!(eval("sin(0)"), 0.0);
    assert_relative_eq!(eval("tanh(0)"), 0.0);
    assert_relative_eq!(eval("sqrt(min(4, 9))"), 2.0);
}

#[test]
fn builtin_constants() {
    assert_relative_eq!(eval("pi"), std::f64::consts::PI);
    assert_relative_eq!(eval("M_PI"), std::f64::consts::PI);
    assert_relative_eq!(eval("M_E"), std::f64::consts::E);
    assert_relative_eq!(eval("2 * pi"), 2.0 * std::f64::consts::PI);
}

#[test]
fn statistical_builtins_return_samples() {
    // Zero variation pins the sample to the nominal.
    assert_relative_eq!(eval("agauss(5, 0)"), 5.0);
    assert_relative_eq!(eval("aunif(5, 0)"), 5.0);
    let v = eval("aunif(0, 1)");
    assert!((-1.0..=1.0).contains(&v));
    assert!(eval("agauss(0, 1)").is_finite());
    // The three-argument forms divide the variation.
    assert_relative_eq!(eval("aunif(7, 0, 3)"), 7.0);
}

#[test]
fn unparsable_input_is_nan() {
    assert!(eval("???").is_nan());
    assert!(eval("").is_nan());
    assert!(eval("1 +").is_nan());
}

#[test]
fn repeated_evaluation_is_stable() {
    let mut table = SymbolTable::new();
    table.define_var("Y", 3.0);
    let a = eval_with("2*Y + 1", &mut table);
    let b = eval_with("2*Y + 1", &mut table);
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn printer_linearizes_arithmetic() {
    let root = parse("2*X+1", ExprDialect::Hspice).unwrap();
    let tokens = print_tokens(&root);
    let rendered: Vec<(&str, ExprClass)> = tokens
        .iter()
        .map(|t| (t.value.as_str(), t.classes[0]))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("2", ExprClass::Number),
            ("X", ExprClass::ParamName),
            ("*", ExprClass::Multiply),
            ("1", ExprClass::Number),
            ("+", ExprClass::Add),
        ]
    );
}

#[test]
fn printer_linearizes_builtin_call() {
    let root = parse("sin(x)", ExprDialect::Hspice).unwrap();
    let tokens = print_tokens(&root);
    let rendered: Vec<(&str, ExprClass)> = tokens
        .iter()
        .map(|t| (t.value.as_str(), t.classes[0]))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("sin", ExprClass::BuiltinFunc),
            ("(", ExprClass::FuncBegin),
            ("x", ExprClass::FuncArg),
            (")", ExprClass::FuncEnd),
        ]
    );
}

#[test]
fn printer_linearizes_ternary() {
    let root = parse("A>0 ? A : -A", ExprDialect::Hspice).unwrap();
    let tokens = print_tokens(&root);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].classes, vec![ExprClass::TernaryCondition]);
    assert_eq!(tokens[0].value, "A>0");
    assert_eq!(tokens[1].classes, vec![ExprClass::TernaryLeft]);
    assert_eq!(tokens[1].value, "A");
    assert_eq!(tokens[2].classes, vec![ExprClass::TernaryRight]);
    assert_eq!(tokens[2].value, "-A");
}

#[test]
fn printer_boolean_ops() {
    let root = parse("a >= 1 && b < 2", ExprDialect::Hspice).unwrap();
    let classes: Vec<ExprClass> = print_tokens(&root)
        .iter()
        .map(|t| t.classes[0])
        .collect();
    assert!(classes.contains(&ExprClass::GreaterThanOrEqual));
    assert!(classes.contains(&ExprClass::LessThan));
    assert!(classes.contains(&ExprClass::LogicalAnd));
}

#[test]
fn parse_produces_root() {
    assert!(matches!(
        parse("1", ExprDialect::Hspice),
        Some(Expr::Root(_))
    ));
    assert!(parse("1 +", ExprDialect::Hspice).is_none());
}

#[test]
fn strip_delimiters() {
    assert_eq!(strip_expr_delimiters("{2*Y+1}"), "2*Y+1");
    assert_eq!(strip_expr_delimiters("'A>0'"), "A>0");
    assert_eq!(strip_expr_delimiters("\"x\""), "x");
    assert_eq!(strip_expr_delimiters("  10k "), "10k");
}

#[test]
fn out_of_order_parameters_reach_fixpoint() {
    let mut table = SymbolTable::new();
    let mut issues = IssueSet::new();
    let params = vec![
        PendingParam::new("B", "{A+1}"),
        PendingParam::new("A", "2"),
    ];
    let resolved = resolve_params(&params, ExprDialect::Hspice, &mut table, &mut issues);
    assert_eq!(resolved, 2);
    assert_relative_eq!(table.variables["A"], 2.0);
    assert_relative_eq!(table.variables["B"], 3.0);
    assert!(issues.is_empty());
}

#[test]
fn unresolvable_parameters_are_reported() {
    let mut table = SymbolTable::new();
    let mut issues = IssueSet::new();
    let params = vec![
        PendingParam::new("ok", "1"),
        PendingParam::new("bad", "{missing * 2}"),
    ];
    let resolved = resolve_params(&params, ExprDialect::Hspice, &mut table, &mut issues);
    assert_eq!(resolved, 1);
    assert_eq!(issues.len(), 1);
    assert!(issues.has_warning());
    assert!(!table.variables.contains_key("bad"));
}
