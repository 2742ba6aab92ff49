//! if/else and while behavior.

mod common;
use common::run_ok;

#[test]
fn test_if_true_branch() {
    assert_eq!(run_ok("if (1 < 2) { print \"yes\" }"), "yes\n");
}

#[test]
fn test_if_false_without_else_prints_nothing() {
    assert_eq!(run_ok("if (1 > 2) { print \"no\" }"), "");
}

#[test]
fn test_if_else() {
    assert_eq!(
        run_ok("if (false) { print \"a\" } else { print \"b\" }"),
        "b\n"
    );
}

#[test]
fn test_else_if_chain() {
    let source = r#"
x = 0
if (x > 0) { print "positive" }
else if (x < 0) { print "negative" }
else { print "zero" }
"#;
    assert_eq!(run_ok(source), "zero\n");
}

#[test]
fn test_condition_uses_truthiness() {
    assert_eq!(run_ok("if (3) { print \"t\" }"), "t\n");
    assert_eq!(run_ok("if (\"\") { print \"t\" } else { print \"f\" }"), "f\n");
    assert_eq!(run_ok("if ([0]) { print \"t\" }"), "t\n");
    assert_eq!(run_ok("if ({}) { print \"t\" } else { print \"f\" }"), "f\n");
}

#[test]
fn test_while_runs_zero_times_on_false() {
    assert_eq!(run_ok("while (false) { print \"never\" }\nprint \"done\""), "done\n");
}

#[test]
fn test_while_countdown() {
    let source = "x = 3\nwhile (x > 0) { print x\nx = x - 1 }";
    assert_eq!(run_ok(source), "3\n2\n1\n");
}

#[test]
fn test_nested_while() {
    let source = r#"
i = 0
count = 0
while (i < 3) {
    j = 0
    while (j < 2) {
        count = count + 1
        j = j + 1
    }
    i = i + 1
}
print count
"#;
    assert_eq!(run_ok(source), "6\n");
}

#[test]
fn test_blocks_share_the_global_environment() {
    let source = r#"
if (true) { inner = 42 }
print inner
while (inner > 40) { inner = inner - 1 }
print inner
"#;
    assert_eq!(run_ok(source), "42\n40\n");
}

#[test]
fn test_nested_if_inside_while() {
    let source = r#"
n = 0
evens = 0
while (n < 5) {
    half = n / 2
    if (int(half) == half) { evens = evens + 1 }
    n = n + 1
}
print evens
"#;
    assert_eq!(run_ok(source), "3\n");
}

#[test]
fn test_statement_order_is_source_order() {
    assert_eq!(run_ok("print 1\nprint 2\nprint 3"), "1\n2\n3\n");
}
