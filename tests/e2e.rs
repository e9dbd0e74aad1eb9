//! End-to-end scenarios from spec §8's testable-properties table,
//! driven entirely through the public `Evaluator` facade.

use cantus_core::config::EvaluatorConfig;
use cantus_core::context::Context;
use cantus_core::runtime::evaluator::Evaluator;
use cantus_core::values::core_values::lambda::Lambda;
use cantus_core::values::value::Value;
use cantus_core::values::value_container::ValueContainer;

fn evaluator() -> Evaluator {
    Evaluator::new(EvaluatorConfig::default(), Context::native())
}

fn run(source: &str) -> Value {
    evaluator().eval(source).expect("script should evaluate").try_to_value().expect("result should resolve to a value")
}

#[test]
fn arithmetic_precedence() {
    let v = run("2+3*4");
    assert_eq!(v.to_string(), "14");
}

#[test]
fn matrix_multiply() {
    let v = run("[[1,2],[3,4]] * [[5,6],[7,8]]");
    assert_eq!(v.to_string(), "[[19,22],[43,50]]");
}

#[test]
fn rref_inverse_round_trip() {
    let v = run("m := [[1,2],[3,4]]\nm^-1 * m");
    let Value::Matrix(m) = v else { panic!("expected a matrix") };
    let grid = m.to_decimal_grid().expect("numeric matrix");
    assert_eq!(grid[0][0].to_f64(), 1.0);
    assert_eq!(grid[0][1].to_f64(), 0.0);
    assert_eq!(grid[1][0].to_f64(), 0.0);
    assert_eq!(grid[1][1].to_f64(), 1.0);
}

#[test]
fn for_to_step_accumulates() {
    let v = run("s := 0\nfor i = 1 to 5:\n    s += i\ns");
    assert_eq!(v.to_string(), "15");
}

// spec §8's lambda-apply-via-`*` row: a `Lambda` operand of `*` applies
// itself to the other operand instead of doing arithmetic.
#[test]
fn lambda_application_via_multiplication() {
    let v = run("`x => x*x` * 7");
    assert_eq!(v.to_string(), "49");
}

// Exercises `call_lambda` directly too, since it also backs `Lambda::Bound`
// (named function values), not just the `*`-application syntax above.
#[test]
fn lambda_application_primitive() {
    let evaluator = evaluator();
    let lambda = Lambda::Flat { args: vec!["x".to_string()], body: "x*x".to_string() };
    let seven = ValueContainer::new_value(Value::Number(7.into()));
    let result = evaluator.call_lambda(&lambda, vec![seven]).expect("lambda should evaluate").try_to_value().expect("should resolve");
    assert_eq!(result.to_string(), "49");
}

#[test]
fn user_function_call_syntax() {
    let v = run("function double(x):\n    return x*2\ndouble(3)");
    assert_eq!(v.to_string(), "6");
}

#[test]
fn nested_call_arguments() {
    let v = run("function add(a, b):\n    return a+b\nfunction square(x):\n    return x*x\nadd(square(2), square(3))");
    assert_eq!(v.to_string(), "13");
}

// Plain `/` by zero yields the `undefined` sentinel rather than raising
// (spec's open question on "non-integer division by zero" is resolved in
// `bigdecimal::checked_div`'s own doc comment: only the integer-division
// path, `\`, raises `MathError::DivisionByZero`), so the error-raising
// half of this scenario is driven through `\` instead of `/`.
#[test]
fn try_catch_division_by_zero() {
    let v = run("try:\n    x := 1\\0\ncatch e:\n    e");
    let Value::Text(text) = v else { panic!("expected a text error message, got {v}") };
    assert!(!text.0.is_empty());
}

#[test]
fn set_union() {
    let v = run("{1,2,3} + {3,4}");
    let Value::Set(set) = v else { panic!("expected a set") };
    assert_eq!(set.len(), 4);
}

#[test]
fn right_associative_assignment_chain() {
    let v = run("a := b := 5\na + b");
    assert_eq!(v.to_string(), "10");
}

#[test]
fn vector_addition() {
    let v = run("[1,0,1] + [0,1,0]");
    assert_eq!(v.to_string(), "[1,1,1]");
}

// `det(...)` reads as a standard-library call (spec §1: "hundreds of
// math/string/collection builtins" are deliberately out of scope for this
// crate, injected instead through `Internals`), so a source-level
// evaluation with `Context::native()`'s `NullInternals` has nothing to
// dispatch `det` to. Exercised directly against the matrix primitive it
// would call into.
#[test]
fn determinant_of_diagonal_matrix() {
    let Value::Matrix(m) = run("[[2,0],[0,3]]") else { panic!("expected a matrix") };
    let det = cantus_core::operators::matrix_ops::determinant(&m).expect("square matrix has a determinant");
    assert_eq!(det.to_f64(), 6.0);
}

// Every namespace is a descendant of the root scope, so a sibling
// namespace failing to see a plain variable only shows ordinary scoping,
// not the `private` modifier's effect (the sibling wouldn't see a public
// one either). `import` is the case where the distinction is observable:
// an imported scope's public members become visible without the importer
// being its descendant, while its private members stay hidden.
#[test]
fn scope_hiding_keeps_private_variables_out_of_importing_scopes() {
    let mut evaluator = evaluator();
    evaluator.eval("namespace a:\n    let pub_var := 1\n    private let secret := 2").unwrap();
    evaluator.eval("import cantus.a").unwrap();

    let visible = evaluator.eval("pub_var").unwrap().try_to_value().unwrap();
    assert_eq!(visible.to_string(), "1");

    let hidden = evaluator.eval("secret").unwrap().try_to_value().unwrap();
    assert_eq!(hidden, Value::Number(cantus_core::bigdecimal::BigDecimal::undefined()));
}

#[test]
fn quote_literal_forms() {
    assert_eq!(run("'hello'").to_string(), "hello");
    assert_eq!(run("\"\"\"a\nb\"\"\"").to_string(), "a\nb");
    assert_eq!(run(r#"r"a\nb""#).to_string(), r"a\nb");
}

#[test]
fn global_binds_at_root_scope_not_the_namespace_it_was_declared_in() {
    let mut evaluator = evaluator();
    evaluator.eval("namespace a:\n    global x := 1").unwrap();
    let v = evaluator.eval("x").unwrap().try_to_value().unwrap();
    assert_eq!(v.to_string(), "1");
}

#[test]
fn loop_control_break_and_continue() {
    let v = run("s := 0\nfor i = 1 to 10:\n    if i = 5:\n        break\n    s += i\ns");
    assert_eq!(v.to_string(), "10");
}
