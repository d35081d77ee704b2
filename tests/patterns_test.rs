use js_debundle_rs::ast::Node;
use js_debundle_rs::parse_script;
use js_debundle_rs::patterns::{Capture, CaptureMap, compile, fill, matches};

fn statement(code: &str) -> Node {
    match parse_script(code).unwrap() {
        Node::Program { body } => body.into_iter().next().expect("no statement"),
        other => panic!("expected a program, got {other:?}"),
    }
}

fn expression(code: &str) -> Node {
    match statement(code) {
        Node::ExpressionStatement { expression } => *expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn captures<const N: usize>(pairs: [(&str, Capture); N]) -> CaptureMap {
    pairs
        .into_iter()
        .map(|(name, capture)| (name.to_string(), capture))
        .collect()
}

fn one(node: Node) -> Capture {
    Capture::Node(Some(node))
}

fn many<const N: usize>(nodes: [Node; N]) -> Capture {
    Capture::Nodes(nodes.into_iter().map(Some).collect())
}

fn name(value: &str) -> Capture {
    Capture::Name(value.to_string())
}

fn try_match(pattern: &str, node: &Node) -> Option<CaptureMap> {
    matches(&compile(pattern).unwrap(), node, &CaptureMap::default())
}

#[test]
fn test_compile_root_kinds() {
    let kind = |source: &str| compile(source).unwrap().root().type_name();
    assert_eq!(kind("var x = 2;"), "VariableDeclaration");
    assert_eq!(kind("var x = 2;var y = 3;"), "Program");
    assert_eq!(kind("x = 2;"), "ExpressionStatement");
    assert_eq!(kind("x = 2"), "AssignmentExpression");
    assert_eq!(kind("statement12;"), "StatementPlaceholder");
    assert_eq!(kind("expression3"), "ExpressionPlaceholder");
}

#[test]
fn test_compile_rejects_unknown_modifiers() {
    assert!(compile("statement12_unknown;").is_err());
    assert!(compile("expression3_unknown").is_err());
}

#[test]
fn test_identical_code_matches_regardless_of_whitespace() {
    let node = statement("function sum(a, b)\n{\n  return a + b;\n}");
    assert_eq!(
        try_match("function sum(a,b){return (a+b)}", &node),
        Some(CaptureMap::default())
    );
}

#[test]
fn test_generic_placeholders() {
    let pattern = "function placeholder1(placeholder2,placeholder3){return (placeholder2+placeholder3)}";
    assert_eq!(
        try_match(pattern, &statement("function sum(a, b) { return a + b; }")),
        Some(captures([
            ("placeholder1", name("sum")),
            ("placeholder2", name("a")),
            ("placeholder3", name("b")),
        ]))
    );
    assert_eq!(
        try_match(pattern, &statement("function sum(a, b) { return b + a; }")),
        None
    );
}

#[test]
fn test_statement_placeholders() {
    let node = statement(
        "function sum(a, b) { function inner(x) { return x; } var result = a + b; if (result) print(result); }",
    );
    assert_eq!(
        try_match("function sum(a,b){statement1;statement2;statement3;}", &node),
        Some(captures([
            ("statement1", one(statement("function inner(x) {return x;}"))),
            ("statement2", one(statement("var result = a + b;"))),
            ("statement3", one(statement("if (result) print(result);"))),
        ]))
    );

    let repeated = statement("function sum(a, b) { var result = a + b; var result = a + b; }");
    assert_eq!(
        try_match("function sum(a,b){statement1;statement1;}", &repeated),
        Some(captures([("statement1", one(statement("var result = a + b;")))]))
    );

    let mixed = statement("function sum(a, b) { var result = a + b; if (result) print(result); }");
    assert_eq!(try_match("function sum(a,b){statement1;statement1;}", &mixed), None);
}

#[test]
fn test_statement_placeholder_modifiers() {
    let lone_if = statement("if (x) x = 2;");
    assert_eq!(try_match("if (x) statement1; else statement2;", &lone_if), None);
    assert_eq!(
        try_match("if (x) statement1; else statement2_optional;", &lone_if),
        Some(captures([
            ("statement1", one(statement("x = 2"))),
            ("statement2", Capture::Node(None)),
        ]))
    );

    let block = statement("{ x = 2; y = 3; x += y; }");
    assert_eq!(try_match("{ statement1; }", &block), None);
    assert_eq!(
        try_match("{ statement1_repeatable; }", &block),
        Some(captures([(
            "statement1",
            many([statement("x = 2;"), statement("y = 3;"), statement("x += y;")])
        )]))
    );

    let declarations = statement("{ var x = 1; function test() {} class y {} x++; }");
    let expected = Some(captures([
        ("statement1", one(statement("var x = 1;"))),
        ("statement2", one(statement("function test() {}"))),
        ("statement3", one(statement("class y {}"))),
        ("statement4", one(statement("x++;"))),
    ]));
    assert_eq!(
        try_match(
            "{ statement1_variableDeclaration; statement2_functionDeclaration; statement3_classDeclaration; statement4_strict; }",
            &declarations
        ),
        expected
    );
    assert_eq!(
        try_match(
            "{ statement1_declaration; statement2_declaration; statement3_declaration; statement4_strict; }",
            &declarations
        ),
        expected
    );

    assert_eq!(try_match("statement1_strict;", &statement("var x = 1;")), None);
    assert_eq!(try_match("statement1_declaration;", &statement("x++;")), None);
    assert_eq!(try_match("statement1_variableDeclaration;", &statement("class y {}")), None);
    assert_eq!(try_match("statement1_functionDeclaration;", &statement("var x = 1;")), None);
    assert_eq!(try_match("statement1_classDeclaration;", &statement("function test() {}")), None);

    let empty = statement("{}");
    assert_eq!(try_match("{ statement1_repeatable; }", &empty), None);
    assert_eq!(
        try_match("{ statement1_repeatable_optional; }", &empty),
        Some(captures([("statement1", Capture::Nodes(Vec::new()))]))
    );

    assert_eq!(
        try_match(
            "function sum(a,b){statement1_multiLine;}",
            &statement("function sum(a, b) { a = a + b; }")
        ),
        None
    );
    assert_eq!(
        try_match(
            "function sum(a,b){statement1_multiLine;}",
            &statement("function sum(a, b) { if (a) a = a + b; }")
        ),
        Some(captures([("statement1", one(statement("if (a) a = a + b;")))]))
    );
}

#[test]
fn test_expression_placeholders() {
    let pattern = "for (expression1 in expression2) print(expression1);";
    assert_eq!(
        try_match(pattern, &statement("for (x in y.prop[2]) print(x);")),
        Some(captures([
            ("expression1", one(expression("x"))),
            ("expression2", one(expression("y.prop[2]"))),
        ]))
    );
    assert_eq!(
        try_match(pattern, &statement("for (x in y.prop[2]) print(y.prop[2]);")),
        None
    );
}

#[test]
fn test_expression_placeholder_modifiers() {
    let bare_yield = statement("function* test() { yield; }");
    assert_eq!(try_match("function* test() {yield expression1;}", &bare_yield), None);
    assert_eq!(
        try_match("function* test() {yield expression1_optional;}", &bare_yield),
        Some(captures([("expression1", Capture::Node(None))]))
    );

    let three = expression("x = 2, y = 3, x += y");
    assert_eq!(try_match("expression1, expression2", &three), None);
    assert_eq!(
        try_match("expression1, expression2_repeatable", &three),
        Some(captures([
            ("expression1", one(expression("x = 2"))),
            ("expression2", many([expression("y = 3"), expression("x += y")])),
        ]))
    );

    let two = expression("x = 2, y = 3");
    assert_eq!(try_match("expression1, expression2, expression3_repeatable", &two), None);
    assert_eq!(
        try_match("expression1, expression2, expression3_repeatable_optional", &two),
        Some(captures([
            ("expression1", one(expression("x = 2"))),
            ("expression2", one(expression("y = 3"))),
            ("expression3", Capture::Nodes(Vec::new())),
        ]))
    );

    let mixed = expression("x + 1, x, 1");
    let expected = Some(captures([
        ("expression1", one(expression("x + 1"))),
        ("expression2", one(expression("x"))),
        ("expression3", one(expression("1"))),
    ]));
    assert_eq!(try_match("expression1, expression2, expression3", &mixed), expected);
    assert_eq!(
        try_match("expression1_strict, expression2_identifier, expression3_literal", &mixed),
        expected
    );

    assert_eq!(try_match("expression1_identifier", &expression("x + 1")), None);
    assert_eq!(try_match("expression1_literal", &expression("x")), None);
    assert_eq!(try_match("expression1_strict", &expression("1")), None);

    let for_of = statement("for (let a of b) print();");
    assert_eq!(try_match("for (expression1 of expression2) print()", &for_of), None);
    let Node::ForOfStatement { left, .. } = &for_of else {
        panic!("expected a for-of loop");
    };
    assert_eq!(
        try_match("for (expression1_orDeclaration of expression2) print()", &for_of),
        Some(captures([
            ("expression1", one(left.as_ref().clone())),
            ("expression2", one(expression("b"))),
        ]))
    );
}

#[test]
fn test_consistency_constraint() {
    assert!(try_match("expression1 == expression1", &expression("x == x")).is_some());
    assert_eq!(try_match("expression1 == expression1", &expression("x == y")), None);
}

#[test]
fn test_fill_without_placeholders() {
    let source = "function sum(a, b) { return a + b; }";
    assert_eq!(
        fill(&compile(source).unwrap(), &CaptureMap::default()).unwrap(),
        statement(source)
    );
}

#[test]
fn test_fill_placeholders_of_various_kinds() {
    let pattern = compile(
        "{
          function placeholder1(placeholder2, placeholder3)
          {
            statement1;
            if (expression1 && expression2)
              statement2;
            if (!expression2)
            {
              statement1;
              statement2;
            }
            return placeholder2 + placeholder3;
          }
          placeholder1(3, 4);
        }",
    )
    .unwrap();
    let values = captures([
        ("placeholder1", name("sum")),
        ("placeholder2", name("a")),
        ("placeholder3", name("b")),
        ("expression1", one(expression("Math.sqrt(a) > 2"))),
        ("expression2", one(expression("b < 0"))),
        ("statement1", one(statement("console.log(1)"))),
        ("statement2", one(statement("b = 12"))),
    ]);
    assert_eq!(
        fill(&pattern, &values).unwrap(),
        statement(
            "{
              function sum(a, b)
              {
                console.log(1);
                if (Math.sqrt(a) > 2 && b < 0)
                  b = 12;
                if (!(b < 0))
                {
                  console.log(1);
                  b = 12;
                }
                return a + b;
              }
              sum(3, 4);
            }"
        )
    );
}

#[test]
fn test_fill_requires_every_placeholder() {
    let missing_name = compile(
        "function placeholder1(placeholder2, placeholder3) { return placeholder2 + placeholder3; }",
    )
    .unwrap();
    assert!(
        fill(
            &missing_name,
            &captures([("placeholder2", name("a")), ("placeholder3", name("b"))])
        )
        .is_err()
    );

    let missing_statement = compile("function test() { statement1; statement2; }").unwrap();
    assert!(
        fill(
            &missing_statement,
            &captures([("statement2", one(statement("b = 12")))])
        )
        .is_err()
    );

    let missing_expression = compile("if (expression1) a = 2; else if (expression2) a = 3;").unwrap();
    assert!(
        fill(
            &missing_expression,
            &captures([("expression1", one(expression("b > 2")))])
        )
        .is_err()
    );
}

#[test]
fn test_fill_splices_lists() {
    let pattern = compile(
        "function test(expression1) { x, expression1; console.log(expression2, y); statement1; }",
    )
    .unwrap();
    let values = captures([
        ("expression1", many([expression("a"), expression("b")])),
        ("expression2", Capture::Nodes(Vec::new())),
        ("statement1", many([statement("x = 2"), statement("y = 3")])),
    ]);
    assert_eq!(
        fill(&pattern, &values).unwrap(),
        statement("function test(a, b) { x, a, b; console.log(y); x = 2; y = 3; }")
    );
}

#[test]
fn test_match_then_fill_reproduces_node() {
    let pattern = compile("if (expression1) statement1; else statement2_optional;").unwrap();
    for source in ["if (a) b(); else c();", "if (a) b();"] {
        let node = statement(source);
        let found = matches(&pattern, &node, &CaptureMap::default()).unwrap();
        assert_eq!(fill(&pattern, &found).unwrap(), node);
    }
}
