//! Operator semantics across the value domain.

mod common;
use common::{run_err, run_ok};

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_integer_arithmetic() {
    assert_eq!(run_ok("print 2 + 3"), "5\n");
    assert_eq!(run_ok("print 10 - 4"), "6\n");
    assert_eq!(run_ok("print 6 * 7"), "42\n");
}

#[test]
fn test_mixed_arithmetic_widens_to_float() {
    assert_eq!(run_ok("print 1 + 2.5"), "3.5\n");
    assert_eq!(run_ok("print 2.5 * 2"), "5\n");
    assert_eq!(run_ok("print 1.5 - 1"), "0.5\n");
}

#[test]
fn test_exact_int_division_stays_int() {
    assert_eq!(run_ok("print 15 / 3"), "5\n");
    assert_eq!(run_ok("print -10 / 2"), "-5\n");
}

#[test]
fn test_inexact_int_division_yields_float() {
    assert_eq!(run_ok("print 7 / 2"), "3.5\n");
    assert_eq!(run_ok("print 20 / 4 / 2"), "2.5\n");
    assert_eq!(run_ok("print 1 / 4"), "0.25\n");
}

#[test]
fn test_float_division() {
    assert_eq!(run_ok("print 5.0 / 2"), "2.5\n");
    assert_eq!(run_ok("print 10 / 2.5"), "4\n");
}

#[test]
fn test_division_by_zero() {
    assert!(run_err("print 1 / 0").contains("Division by zero"));
    assert!(run_err("print 1.5 / 0.0").contains("Division by zero"));
    assert!(run_err("print 1 / 0.0").contains("Division by zero"));
}

#[test]
fn test_unary_numeric_operators() {
    assert_eq!(run_ok("print -5"), "-5\n");
    assert_eq!(run_ok("print +5"), "5\n");
    assert_eq!(run_ok("print -2.5"), "-2.5\n");
    assert_eq!(run_ok("print --5"), "5\n");
}

#[test]
fn test_unary_on_non_numbers_fails() {
    assert!(run_err("print -\"x\"").contains("Type error"));
    assert!(run_err("print +true").contains("Type error"));
}

// ============================================================================
// Strings and lists under `+`
// ============================================================================

#[test]
fn test_string_concatenation() {
    assert_eq!(run_ok("print \"foo\" + \"bar\""), "foobar\n");
    assert_eq!(run_ok("print \"\" + \"x\""), "x\n");
}

#[test]
fn test_list_concatenation_is_a_new_list() {
    let source = "a = [1]\nb = [2]\nc = a + b\nappend(c, 3)\nprint str(a)\nprint str(c)";
    assert_eq!(run_ok(source), "[1]\n[1, 2, 3]\n");
}

#[test]
fn test_mixed_addition_fails() {
    assert!(run_err("print \"x\" + 1").contains("Cannot add"));
    assert!(run_err("print 1 + \"x\"").contains("Cannot add"));
    assert!(run_err("print [1] + 1").contains("Cannot add"));
    assert!(run_err("print true + true").contains("Cannot add"));
}

#[test]
fn test_subtraction_requires_numbers() {
    assert!(run_err("print \"a\" - \"b\"").contains("Type error"));
    assert!(run_err("print [1] * 2").contains("Type error"));
}

// ============================================================================
// Comparison and equality
// ============================================================================

#[test]
fn test_numeric_comparison() {
    assert_eq!(run_ok("print 1 < 2"), "true\n");
    assert_eq!(run_ok("print 2 <= 2"), "true\n");
    assert_eq!(run_ok("print 3 > 4"), "false\n");
    assert_eq!(run_ok("print 2.5 >= 2"), "true\n");
}

#[test]
fn test_string_comparison_is_lexicographic() {
    assert_eq!(run_ok("print \"apple\" < \"banana\""), "true\n");
    assert_eq!(run_ok("print \"b\" > \"a\""), "true\n");
    assert_eq!(run_ok("print \"abc\" <= \"abc\""), "true\n");
}

#[test]
fn test_comparison_across_types_fails() {
    assert!(run_err("print 1 < \"2\"").contains("Type error"));
    assert!(run_err("print [1] < [2]").contains("Type error"));
}

#[test]
fn test_equality_is_total() {
    assert_eq!(run_ok("print 1 == 1.0"), "true\n");
    assert_eq!(run_ok("print 1 == \"1\""), "false\n");
    assert_eq!(run_ok("print true != 1"), "true\n");
    assert_eq!(run_ok("print \"a\" == \"a\""), "true\n");
}

#[test]
fn test_structural_equality_of_aggregates() {
    assert_eq!(run_ok("print [1, [2]] == [1, [2]]"), "true\n");
    assert_eq!(run_ok("print [1, 2] == [1]"), "false\n");
    assert_eq!(
        run_ok("a = {\"x\": 1}\nb = {\"x\": 1}\nprint a == b"),
        "true\n"
    );
    assert_eq!(
        run_ok("a = {\"x\": 1}\nb = {\"x\": 2}\nprint a == b"),
        "false\n"
    );
}

#[test]
fn test_dict_equality_ignores_order() {
    let source = "a = {\"x\": 1, \"y\": 2}\nb = {\"y\": 2, \"x\": 1}\nprint a == b";
    assert_eq!(run_ok(source), "true\n");
}

#[test]
fn test_chained_equality_is_left_associative() {
    // (1 == 1) == true
    assert_eq!(run_ok("print 1 == 1 == true"), "true\n");
}

// ============================================================================
// Logical operators and truthiness
// ============================================================================

#[test]
fn test_and_or_coerce_to_boolean() {
    assert_eq!(run_ok("print 1 and 2"), "true\n");
    assert_eq!(run_ok("print 0 or \"\""), "false\n");
    assert_eq!(run_ok("print \"x\" or 0"), "true\n");
    assert_eq!(run_ok("print [] and true"), "false\n");
}

#[test]
fn test_short_circuit_and() {
    assert_eq!(run_ok("print false and (1 / 0 == 0)"), "false\n");
}

#[test]
fn test_short_circuit_or() {
    assert_eq!(run_ok("print true or (1 / 0 == 0)"), "true\n");
}

#[test]
fn test_not_and_bang() {
    assert_eq!(run_ok("print not true"), "false\n");
    assert_eq!(run_ok("print !0"), "true\n");
    assert_eq!(run_ok("print not \"\""), "true\n");
    assert_eq!(run_ok("print not []"), "true\n");
}

#[test]
fn test_not_binds_looser_than_comparison() {
    assert_eq!(run_ok("print not 1 == 2"), "true\n");
    assert_eq!(run_ok("print not 1 < 2"), "false\n");
}

#[test]
fn test_precedence_of_logical_operators() {
    // and binds tighter than or
    assert_eq!(run_ok("print true or false and false"), "true\n");
    // comparison binds tighter than and
    assert_eq!(run_ok("print 1 < 2 and 3 < 4"), "true\n");
}

// ============================================================================
// Rendering through print
// ============================================================================

#[test]
fn test_print_renders_canonical_forms() {
    assert_eq!(run_ok("print 3.0"), "3\n");
    assert_eq!(run_ok("print true"), "true\n");
    assert_eq!(run_ok("print \"plain\""), "plain\n");
    assert_eq!(run_ok("print [1, \"a\", [true]]"), "[1, \"a\", [true]]\n");
    assert_eq!(
        run_ok("print {\"k\": \"v\", 1: 2}"),
        "{\"k\": \"v\", 1: 2}\n"
    );
}

#[test]
fn test_str_round_trips_scalars() {
    assert_eq!(run_ok("print int(str(42)) == 42"), "true\n");
    assert_eq!(run_ok("print float(str(2.5)) == 2.5"), "true\n");
    assert_eq!(run_ok("print str(true)"), "true\n");
}
