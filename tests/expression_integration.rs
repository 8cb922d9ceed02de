//! End-to-end tests for expression compilation

mod common;

use colexpr::expression::{BuildError, LexError, ParseError};
use colexpr::{expression_to_computed_column_config, ExpressionCompiler, ExpressionError};
use common::builders::ExprBuilder;
use common::{assert_dependency_order, columns, config};

fn parse_errors(expression: &str) -> Vec<ParseError> {
    match expression_to_computed_column_config(expression) {
        Err(ExpressionError::Parse(errors)) => errors.into_iter().collect(),
        other => panic!("expected parse errors for {:?}, got {:?}", expression, other),
    }
}

#[test]
fn test_precedence_chain() {
    let configs =
        expression_to_computed_column_config(r#"sqrt("a") / abs("b") ^ "a" + "a" * "b""#).unwrap();

    assert_eq!(
        columns(&configs),
        vec![
            "sqrt(a)",
            "abs(b)",
            "(abs(b) ^ a)",
            "(sqrt(a) / (abs(b) ^ a))",
            "(a * b)",
            "((sqrt(a) / (abs(b) ^ a)) + (a * b))",
        ]
    );
    assert_eq!(
        configs[3],
        config(
            "(sqrt(a) / (abs(b) ^ a))",
            "/",
            &["sqrt(a)", "(abs(b) ^ a)"]
        )
    );
    assert_dependency_order(&configs);
}

#[test]
fn test_left_and_right_associativity() {
    let configs = expression_to_computed_column_config(r#""a" - "b" - "c""#).unwrap();
    assert_eq!(columns(&configs), vec!["(a - b)", "((a - b) - c)"]);

    let configs = expression_to_computed_column_config(r#""a" ^ "b" ^ "c""#).unwrap();
    assert_eq!(columns(&configs), vec!["(b ^ c)", "(a ^ (b ^ c))"]);
}

#[test]
fn test_parentheses_override_precedence() {
    let configs = expression_to_computed_column_config(r#"("a" + "b") * "c""#).unwrap();
    assert_eq!(
        configs,
        vec![
            config("(a + b)", "+", &["a", "b"]),
            config("((a + b) * c)", "*", &["(a + b)", "c"]),
        ]
    );
}

#[test]
fn test_every_function_formats_as_call() {
    for name in ["pow2", "invert", "bin1000th", "length", "year_bucket"] {
        let expression = ExprBuilder::column("x").call(name).build();
        let configs = expression_to_computed_column_config(&expression).unwrap();
        assert_eq!(
            configs,
            vec![config(&format!("{}(x)", name), name, &["x"])]
        );
    }
}

#[test]
fn test_concat_with_many_arguments() {
    let expression = ExprBuilder::call_many(
        "concat_space",
        &[
            ExprBuilder::column("first name"),
            ExprBuilder::column("last name"),
            ExprBuilder::column("city").call("uppercase"),
        ],
    )
    .build();

    let configs = expression_to_computed_column_config(&expression).unwrap();
    assert_eq!(
        configs,
        vec![
            config("uppercase(city)", "uppercase", &["city"]),
            config(
                "concat_space(first name, last name, uppercase(city))",
                "concat_space",
                &["first name", "last name", "uppercase(city)"]
            ),
        ]
    );
}

#[test]
fn test_repeated_sub_expression_is_emitted_once() {
    let configs = expression_to_computed_column_config(r#"sqrt("a") / sqrt("a")"#).unwrap();
    assert_eq!(
        configs,
        vec![
            config("sqrt(a)", "sqrt", &["a"]),
            config("(sqrt(a) / sqrt(a))", "/", &["sqrt(a)", "sqrt(a)"]),
        ]
    );
}

#[test]
fn test_alias_names_final_column() {
    let expression = ExprBuilder::column("a")
        .op('+', ExprBuilder::column("b"))
        .alias("total")
        .build();

    let configs = expression_to_computed_column_config(&expression).unwrap();
    assert_eq!(configs, vec![config("total", "+", &["a", "b"])]);
}

#[test]
fn test_grouped_alias_feeds_outer_expression() {
    let configs =
        expression_to_computed_column_config(r#"(sqrt("a") AS "root") * "b" AS "scaled""#)
            .unwrap();
    assert_eq!(
        configs,
        vec![
            config("root", "sqrt", &["a"]),
            config("scaled", "*", &["root", "b"]),
        ]
    );
}

#[test]
fn test_aliases_are_case_insensitive_keywords() {
    let lower = expression_to_computed_column_config(r#"abs("a") as "x""#).unwrap();
    let upper = expression_to_computed_column_config(r#"abs("a") AS "x""#).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn test_bare_column_is_rejected() {
    assert!(matches!(
        parse_errors(r#"("a")"#).as_slice(),
        [ParseError::BareColumn { .. }]
    ));
}

#[test]
fn test_alias_on_column_is_rejected() {
    assert!(matches!(
        parse_errors(r#""a" AS "b""#).as_slice(),
        [ParseError::AliasOnColumn { .. }]
    ));
}

#[test]
fn test_several_arity_errors_reported_together() {
    let errors = parse_errors(r#"sqrt("a", "b") + abs("c", "d", "e")"#);
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        errors[1],
        ParseError::Arity {
            found: 3,
            position: 17,
            ..
        }
    ));
}

#[test]
fn test_structural_errors() {
    for expression in [
        "",
        r#""a" +"#,
        r#"("a" + "b""#,
        r#""a" + "b")"#,
        r#"sqrt()"#,
        r#""a" "b""#,
        r#"concat_comma("a")"#,
    ] {
        assert!(
            expression_to_computed_column_config(expression).is_err(),
            "{:?} should fail",
            expression
        );
    }
}

#[test]
fn test_lexical_errors() {
    assert_eq!(
        expression_to_computed_column_config(r#"SQRT("a")"#).unwrap_err(),
        ExpressionError::Lex(LexError::UnknownFunction {
            position: 0,
            name: "SQRT".to_string()
        })
    );
    assert_eq!(
        expression_to_computed_column_config(r#"sqrt("a)"#).unwrap_err(),
        ExpressionError::Lex(LexError::UnterminatedColumnName { position: 5 })
    );
}

#[test]
fn test_alias_clash_is_build_error() {
    let err =
        expression_to_computed_column_config(r#"(abs("a") AS "x") + (sqrt("a") AS "x")"#)
            .unwrap_err();
    assert_eq!(
        err,
        ExpressionError::Build(BuildError::DuplicateColumn {
            column: "x".to_string()
        })
    );
}

#[test]
fn test_generated_and_data_names_never_overlap() {
    for expression in [
        r#""x" + ("a" + "b" AS "x")"#,
        r#"("a" + "b" AS "x") + "x""#,
        r#""(a + b)" * ("a" + "b")"#,
        r#"("a" + "b") * "(a + b)""#,
    ] {
        match expression_to_computed_column_config(expression) {
            Err(ExpressionError::Build(BuildError::DataColumnClash { .. })) => {}
            other => panic!("{:?} should clash, got {:?}", expression, other),
        }
    }
}

#[test]
fn test_long_flat_chain_is_rejected_not_overflowed() {
    let compiler = ExpressionCompiler::new();

    // 4000 operands fit in the default length limit
    let chain = vec![r#""a""#; 4000].join("+");
    assert!(chain.len() < compiler.settings().max_expression_length);
    match compiler.compile(&chain) {
        Err(ExpressionError::Parse(errors)) => assert!(matches!(
            errors.first(),
            ParseError::TooDeep { max_depth: 64, .. }
        )),
        other => panic!("expected depth error, got {:?}", other.map(|c| c.len())),
    }

    let chain = vec![r#""a""#; 4000].join("*");
    assert!(matches!(
        compiler.compile(&chain),
        Err(ExpressionError::Parse(_))
    ));

    // Right at the limit still compiles
    let configs = compiler.compile(&vec![r#""a""#; 65].join("+")).unwrap();
    assert_eq!(configs.len(), 64);
    assert_dependency_order(&configs);
}

#[test]
fn test_nested_groups_of_chains_are_bounded() {
    // A chain around a group adds to the height of the chain inside it
    let mut expr = vec![r#""a""#; 40].join("+");
    for _ in 0..3 {
        expr = format!("({}) - {}", expr, vec![r#""b""#; 40].join("-"));
    }
    assert!(matches!(
        expression_to_computed_column_config(&expr),
        Err(ExpressionError::Parse(_))
    ));
}

#[test]
fn test_batch_dedup_and_order() {
    let compiler = ExpressionCompiler::new();
    let configs = compiler
        .compile_all([
            r#"day_of_week("d")"#,
            r#""a" + "b""#,
            r#"uppercase("c")"#,
            r#"("a" + "b") * 2"#,
        ])
        .unwrap_or_default();

    // The last expression does not lex, so the whole batch fails
    assert!(configs.is_empty());

    let configs = compiler
        .compile_all([
            r#"day_of_week("d")"#,
            r#""a" + "b""#,
            r#"uppercase("c")"#,
            r#"("a" + "b") * "n""#,
        ])
        .unwrap();
    assert_eq!(
        columns(&configs),
        vec![
            "day_of_week(d)",
            "(a + b)",
            "uppercase(c)",
            "((a + b) * n)"
        ]
    );
    assert_dependency_order(&configs);
}
