use rox::ast::{Expr, Stmt};
use rox::ast_printer::AstPrinter;
use rox::error::LoxError;
use rox::parser::Parser;
use rox::scanner::scan_all;

fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
    let (tokens, errors) = scan_all(source.as_bytes());
    assert!(errors.is_empty(), "scan errors: {:?}", errors);
    Parser::new(&tokens).parse()
}

fn print_expression(source: &str) -> String {
    let (tokens, _) = scan_all(source.as_bytes());
    let expr = Parser::new(&tokens)
        .parse_expression()
        .expect("expression parses");
    AstPrinter::print(&expr)
}

fn messages(errors: &[LoxError]) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(
        print_expression("-123 * (45.67)"),
        "(* (- 123.0) (group 45.67))"
    );
    assert_eq!(print_expression("1 + 2 * 3 == 7"), "(== (+ 1.0 (* 2.0 3.0)) 7.0)");
    assert_eq!(print_expression("a or b and !c"), "(or a (and b (! c)))");
}

#[test]
fn calls_properties_and_assignment_targets() {
    assert_eq!(print_expression("f(1, g())"), "(call f 1.0 (call g))");
    assert_eq!(print_expression("a.b.c = 3"), "(= (. (. a b) c) 3.0)");
    assert_eq!(print_expression("x = y = 1"), "(= x (= y 1.0))");
    assert_eq!(print_expression("super.cook"), "(super cook)");
}

#[test]
fn for_loop_desugars_to_block_and_while() {
    let statements = parse("for (var i = 0; i < 3; i = i + 1) print i;").unwrap();

    assert_eq!(statements.len(), 1);
    let Stmt::Block(outer) = &statements[0] else {
        panic!("expected outer block, got {:?}", statements[0]);
    };
    assert!(matches!(outer[0], Stmt::Var { .. }));
    let Stmt::While { body, .. } = &outer[1] else {
        panic!("expected while, got {:?}", outer[1]);
    };
    let Stmt::Block(inner) = body.as_ref() else {
        panic!("expected body block, got {:?}", body);
    };
    assert!(matches!(inner[0], Stmt::Print(_)));
    assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
}

#[test]
fn bare_for_has_no_wrapping_block() {
    let statements = parse("for (;;) break;").unwrap();
    assert!(matches!(statements[0], Stmt::While { .. }));
}

#[test]
fn class_with_superclass() {
    let statements = parse("class B < A { init(x) { this.x = x; } go() {} }").unwrap();

    let Stmt::Class {
        name,
        superclass,
        methods,
    } = &statements[0]
    else {
        panic!("expected class");
    };
    assert_eq!(name.lexeme, "B");
    assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].params.len(), 1);
}

#[test]
fn variable_references_get_distinct_ids() {
    let statements = parse("a; a; a = 1;").unwrap();

    let ids: Vec<usize> = statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(Expr::Variable { id, .. }) => *id,
            Stmt::Expression(Expr::Assign { id, .. }) => *id,
            other => panic!("unexpected {:?}", other),
        })
        .collect();

    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn ids_continue_from_the_first_id() {
    let (tokens, _) = scan_all(b"a;");
    let mut parser = Parser::new(&tokens).with_first_id(40);
    let statements = parser.parse().unwrap();

    assert!(matches!(statements[0], Stmt::Expression(Expr::Variable { id: 40, .. })));
    assert_eq!(parser.next_id(), 41);
}

#[test]
fn errors_are_collected_after_synchronizing() {
    let errors = parse("print 1 +;\nvar = 2;\nprint 3;").unwrap_err();

    assert_eq!(
        messages(&errors),
        vec![
            "[line 1] Error at ';': Expect expression.",
            "[line 2] Error at '=': Expect variable name.",
        ]
    );
}

#[test]
fn invalid_assignment_target_is_reported() {
    let errors = parse("var a = 1; var b = 2; var c = 3; a + b = c;").unwrap_err();

    assert_eq!(
        messages(&errors),
        vec!["[line 1] Error at '=': Invalid assignment target."]
    );
}

#[test]
fn missing_semicolon_at_end_of_input() {
    let errors = parse("print 1").unwrap_err();

    assert_eq!(
        messages(&errors),
        vec!["[line 1] Error at end: Expect ';' after value."]
    );
}

#[test]
fn too_many_arguments() {
    let args = vec!["1"; 256].join(", ");
    let errors = parse(&format!("f({});", args)).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .to_string()
        .contains("Can't have more than 255 arguments."));
}
