//! End-to-end tests: Python source in, SMT-LIB2 text out

use indoc::indoc;
use quickcheck_macros::quickcheck;

use py2smt::{
    python_to_smt, tree_from_json, Error, Node, SmtTranslator, Sort, TranslationError,
};

#[test]
fn test_function_with_let_and_return() {
    let smt = python_to_smt("def f(x): y = x + 1\n    return y", Sort::Int).unwrap();
    assert_eq!(smt, "(define-fun f ((x Int)) Int (let y (+ x 1))\ny)");
}

#[test]
fn test_inline_if_else() {
    let smt = python_to_smt("if a > 0: return 1\n    else: return -1", Sort::Int).unwrap();
    assert_eq!(smt, "(ite (> a 0) 1 (- 1))");
}

#[test]
fn test_circle_area() {
    let source = indoc! {"
        def example_function(radius):
            pi = 3.14
            # Calculate the area of the circle
            area = pi * radius * radius
            if area > 50:
                return 50
            else:
                return area
    "};
    let expected = indoc! {"
        (define-fun example_function ((radius Int)) Int (let pi 3.14)
        (let area (* (* pi radius) radius))
        (ite (> area 50) 50 area))"};
    assert_eq!(python_to_smt(source, Sort::Int).unwrap(), expected);
}

#[test]
fn test_block_comment_and_elif_without_else() {
    let source = concat!(
        "\n",
        "def example_function_2(x, y):\n",
        "    result = x + y\n",
        "    # This is a single-line comment\n",
        "\n",
        "    if result != 0:\n",
        "        \"\"\"This is a multiline comment.\n",
        "        It spans multiple lines.\n",
        "        \"\"\"\n",
        "\n",
        "        return -10\n",
        "    elif result >= 15 * x :\n",
        "        return -result\n",
        "    return x%y\n",
        "    ",
    );
    let expected = concat!(
        "(define-fun example_function_2 ((x Int) (y Int)) Int (let result (+ x y))\n",
        "(ite (not (= result 0)) (- 10) (ite (>= result (* 15 x)) (- result) ))\n",
        "(mod x y))",
    );
    assert_eq!(python_to_smt(source, Sort::Int).unwrap(), expected);
}

#[test]
fn test_bool_sort_applies_to_every_parameter() {
    let source = indoc! {"
        def both(a, b, c):
            return a and b and not c
    "};
    assert_eq!(
        python_to_smt(source, Sort::Bool).unwrap(),
        "(define-fun both ((a Bool) (b Bool) (c Bool)) Bool (and a b (not c)))"
    );
}

#[test]
fn test_top_level_statements_are_newline_separated() {
    let source = indoc! {"
        x = 1
        y = x * 2
        x == y
    "};
    assert_eq!(
        python_to_smt(source, Sort::Int).unwrap(),
        "(let x 1)\n(let y (* x 2))\n(= x y)"
    );
}

#[test]
fn test_boolean_literals_in_any_case() {
    let source = indoc! {"
        flag = True
        other = FALSE or flag
    "};
    assert_eq!(
        python_to_smt(source, Sort::Bool).unwrap(),
        "(let flag true)\n(let other (or false flag))"
    );
}

#[test]
fn test_loop_becomes_sentinel() {
    let source = indoc! {"
        def count(x):
            while x > 0:
                x = x - 1
            return x
    "};
    assert_eq!(
        python_to_smt(source, Sort::Int).unwrap(),
        "(define-fun count ((x Int)) Int UNKNOWN_TYPE_While\nx)"
    );
}

#[test]
fn test_strict_translator_rejects_loop() {
    let source = "for i in items:\n    pass\n";
    let err = SmtTranslator::strict(Sort::Int)
        .translate_source(source)
        .unwrap_err();
    match err {
        Error::Translation(TranslationError::UnsupportedNodeKind(kind)) => {
            assert_eq!(kind, "For")
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unsupported_operator_keeps_operands() {
    assert_eq!(
        python_to_smt("z = x ** 2\n", Sort::Int).unwrap(),
        "(let z (UNKNOWN_TYPE_BinOp_Pow x 2))"
    );
    assert!(matches!(
        SmtTranslator::strict(Sort::Int).translate_source("z = x // 2\n"),
        Err(Error::Translation(TranslationError::UnsupportedOperator { .. }))
    ));
}

#[test]
fn test_syntax_error_reports_position() {
    let source = indoc! {"
        def f(x):
            return x +
    "};
    let err = python_to_smt(source, Sort::Int).unwrap_err();
    match err {
        Error::Syntax(syntax) => {
            assert_eq!(syntax.line, 2);
            assert_eq!(syntax.text, "    return x +");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_translates_json_tree() {
    let json = r#"{
        "kind": "Module",
        "statements": [
            {
                "kind": "FunctionDef",
                "name": "g",
                "params": ["a"],
                "body": [
                    {
                        "kind": "Return",
                        "value": {
                            "kind": "Compare",
                            "left": {"kind": "Name", "identifier": "a"},
                            "ops": ["NotEq", "Lt"],
                            "comparators": [
                                {"kind": "Constant", "value": 1},
                                {"kind": "Constant", "value": 2}
                            ]
                        }
                    }
                ]
            }
        ]
    }"#;
    let tree = tree_from_json(json).unwrap();
    assert_eq!(
        py2smt::translate(&tree, Sort::Int).unwrap(),
        "(define-fun g ((a Int)) Int (not (= a 1)))"
    );
}

#[test]
fn test_integer_literal_beyond_64_bits() {
    assert_eq!(
        python_to_smt("x = 10000000000000000000\n", Sort::Int).unwrap(),
        "(let x 10000000000000000000)"
    );
    assert_eq!(
        python_to_smt("y = -123456789012345678901234567890\n", Sort::Int).unwrap(),
        "(let y (- 123456789012345678901234567890))"
    );
}

#[test]
fn test_json_integer_beyond_64_bits_is_exact() {
    let tree = tree_from_json(r#"{"kind":"Constant","value":10000000000000000000}"#).unwrap();
    assert_eq!(
        py2smt::translate(&tree, Sort::Int).unwrap(),
        "10000000000000000000"
    );
}

#[test]
fn test_parsed_big_integer_survives_json() {
    let tree = py2smt::parse_source("x = 123456789012345678901234567890\n").unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains("123456789012345678901234567890"), "{}", json);
    assert_eq!(tree_from_json(&json).unwrap(), tree);
}

#[test]
fn test_floats_are_positional_decimals() {
    let source = indoc! {"
        x = 1e16
        y = 1e-05
        z = 2.
    "};
    assert_eq!(
        python_to_smt(source, Sort::Int).unwrap(),
        "(let x 10000000000000000.0)\n(let y 0.00001)\n(let z 2.0)"
    );
}

#[test]
fn test_conditional_expression_becomes_sentinel() {
    let source = indoc! {"
        def pick(a, b):
            m = a if a > b else b
            return m
    "};
    assert_eq!(
        python_to_smt(source, Sort::Int).unwrap(),
        "(define-fun pick ((a Int) (b Int)) Int (let m UNKNOWN_TYPE_IfExp)\nm)"
    );
    assert_eq!(
        python_to_smt("v = a[0] + a.size\n", Sort::Int).unwrap(),
        "(let v (+ UNKNOWN_TYPE_Subscript UNKNOWN_TYPE_Attribute))"
    );
}

#[test]
fn test_reserved_keyword_is_reported_as_unsupported() {
    let err = python_to_smt("import math\n", Sort::Int).unwrap_err();
    assert!(
        err.to_string().contains("unsupported construct 'import'"),
        "{}",
        err
    );
}

#[test]
fn test_malformed_json_tree() {
    assert!(matches!(
        tree_from_json(r#"{"kind": "Lambda"}"#),
        Err(Error::Tree(_))
    ));
}

#[test]
fn test_parse_output_serializes_back() {
    let tree = py2smt::parse_source("x = 1 + 2\n").unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}

#[quickcheck]
fn prop_integer_assignment(value: u32) -> bool {
    python_to_smt(&format!("x = {}\n", value), Sort::Int).ok()
        == Some(format!("(let x {})", value))
}

#[quickcheck]
fn prop_negated_integer(value: u32) -> bool {
    python_to_smt(&format!("x = -{}\n", value), Sort::Int).ok()
        == Some(format!("(let x (- {}))", value))
}

#[quickcheck]
fn prop_parameter_count_matches(count: u8) -> bool {
    let count = usize::from(count % 16);
    let params: Vec<String> = (0..count).map(|i| format!("p{}", i)).collect();
    let source = format!("def f({}):\n    return 0\n", params.join(", "));
    let smt = match python_to_smt(&source, Sort::Int) {
        Ok(smt) => smt,
        Err(_) => return false,
    };
    let expected_params: Vec<String> = params.iter().map(|p| format!("({} Int)", p)).collect();
    smt == format!("(define-fun f ({}) Int 0)", expected_params.join(" "))
}
