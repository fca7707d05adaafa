mod common;

use common::*;

fn assert_static_error(source: &str, expected: &str) {
    let outcome = run(source);

    assert_eq!(outcome.stderr, expected, "diagnostics for:\n{}", source);
    assert_eq!(outcome.stdout, "", "nothing should run for:\n{}", source);
    assert!(outcome.had_error);
    assert!(!outcome.had_runtime_error);
    assert_eq!(outcome.exit_code, Some(65));
}

#[test]
fn reading_local_in_its_own_initializer() {
    assert_static_error(
        "print 1;\n{ var a = a; }",
        "[line 2] Error at 'a': Can't read local variable in its own initializer.\n",
    );
}

#[test]
fn global_self_reference_is_allowed_statically() {
    let outcome = run("var a = a;");
    assert!(!outcome.had_error);
    assert_eq!(outcome.stderr, "Undefined variable 'a'.\n[line 1]\n");
}

#[test]
fn duplicate_local_declaration() {
    assert_static_error(
        "{\n  var a = 1;\n  var a = 2;\n}",
        "[line 3] Error at 'a': Already a variable with this name in this scope.\n",
    );
    assert_static_error(
        "fun f(x, x) {}",
        "[line 1] Error at 'x': Already a variable with this name in this scope.\n",
    );
}

#[test]
fn top_level_return() {
    assert_static_error(
        "print 1;\nreturn 2;",
        "[line 2] Error at 'return': Can't return from top-level code.\n",
    );
}

#[test]
fn returning_a_value_from_an_initializer() {
    assert_static_error(
        "class A {\n  init() { return 1; }\n}",
        "[line 2] Error at 'return': Can't return a value from an initializer.\n",
    );
}

#[test]
fn bare_return_in_initializer_is_allowed() {
    assert_prints("class A { init() { return; } }\nprint A();", "<class A instance>\n");
}

#[test]
fn this_outside_a_class() {
    assert_static_error(
        "print this;",
        "[line 1] Error at 'this': Can't use 'this' outside of a class.\n",
    );
    assert_static_error(
        "fun f() { return this; }",
        "[line 1] Error at 'this': Can't use 'this' outside of a class.\n",
    );
}

#[test]
fn super_misuse() {
    assert_static_error(
        "super.foo();",
        "[line 1] Error at 'super': Can't use 'super' outside of a class.\n",
    );
    assert_static_error(
        "class A {\n  go() { super.go(); }\n}",
        "[line 2] Error at 'super': Can't use 'super' in a class with no superclass.\n",
    );
}

#[test]
fn class_inheriting_from_itself() {
    assert_static_error(
        "class Oops < Oops {}",
        "[line 1] Error at 'Oops': A class can't inherit from itself.\n",
    );
}

#[test]
fn break_outside_a_loop() {
    assert_static_error(
        "break;",
        "[line 1] Error at 'break': Can't break outside of a loop.\n",
    );
}

#[test]
fn break_does_not_cross_function_boundaries() {
    assert_static_error(
        "while (true) {\n  fun f() { break; }\n}",
        "[line 2] Error at 'break': Can't break outside of a loop.\n",
    );
}

#[test]
fn every_resolver_error_is_reported() {
    assert_static_error(
        "return;\nprint this;",
        "[line 1] Error at 'return': Can't return from top-level code.\n\
         [line 2] Error at 'this': Can't use 'this' outside of a class.\n",
    );
}

#[test]
fn parse_errors_suppress_execution() {
    assert_static_error(
        "print \"before\";\nprint (1;",
        "[line 2] Error at ';': Expect ')' after expression.\n",
    );
}

#[test]
fn scan_errors_suppress_execution() {
    assert_static_error(
        "print 1;\nprint @;",
        "[line 2] Error: Unexpected character: @\n\
         [line 2] Error at ';': Expect expression.\n",
    );
}

#[test]
fn unterminated_string() {
    assert_static_error(
        "print \"oops;",
        "[line 1] Error: Unterminated string.\n\
         [line 1] Error at end: Expect expression.\n",
    );
}

#[test]
fn resolution_uses_static_scope() {
    assert_prints(
        r#"
        var x = "outer";
        fun show() { print x; }
        {
          var x = "inner";
          show();
        }
        "#,
        "outer\n",
    );
}
