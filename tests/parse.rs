//! Library-level tests for the tokenizer and tree builder, checked against
//! `serde_json` as the reference parser.
use jtree::parser::Expected;
use jtree::{ParseError, Token, TokenKind, Value, parse, tokenize};

/// Documents that are valid JSON and use only canonical formatting.
const VALID: &[&str] = &[
    "{}",
    "[]",
    "0",
    "-12.5",
    "1e-7",
    r#""plain""#,
    r#""esc \" \\ \/ \n é 😀""#,
    "true",
    "null",
    r#"{"a":{"b":[1,2,3]}}"#,
    r#"[{"k":[]},{"k":{}},[[[]]]]"#,
    r#"{"z":1,"y":[true,false,null],"x":{"nested":"yes"}}"#,
];

fn reference(input: &str) -> serde_json::Value {
    serde_json::from_str(input).expect("reference parser rejected input")
}

#[test]
fn round_trip_matches_reference_parser() {
    for input in VALID {
        let program = parse(input).unwrap_or_else(|e| panic!("{input}: {e}"));
        let rendered = program.root_value.to_json().unwrap();
        assert_eq!(reference(&rendered), reference(input), "{input}");
    }
}

#[test]
fn round_trip_preserves_order() {
    let input = r#"{"z":1,"y":[true,false,null],"x":{"nested":"yes"}}"#;
    assert_eq!(parse(input).unwrap().root_value.to_json().unwrap(), input);
}

#[test]
fn whitespace_is_insignificant() {
    let spaced = "{\n\t\"a\" :\r\n [ 1 ,2 ] ,\"b\":{ } }";
    let tight = r#"{"a":[1,2],"b":{}}"#;
    assert_eq!(parse(spaced).unwrap(), parse(tight).unwrap());
}

#[test]
fn parsing_is_deterministic() {
    for input in VALID.iter().chain(&["{\"a\": }", "[1,,2]", "tru"]) {
        assert_eq!(parse(input), parse(input));
    }
}

#[test]
fn nested_example() {
    let root = parse(r#"{"a":{"b":[1,2,3]}}"#).unwrap().root_value;
    let b = root.get("a").and_then(|a| a.get("b")).unwrap();
    let numbers: Vec<f64> =
        b.children().filter_map(Value::as_f64).collect();
    assert_eq!(numbers, [1.0, 2.0, 3.0]);
}

#[test]
fn error_locality() {
    let err = parse(r#"{"a": }"#).unwrap_err();
    match err {
        ParseError::UnexpectedToken { expected, found } => {
            assert_eq!(expected, Expected::Value);
            assert_eq!(found.kind, TokenKind::RightBrace);
            assert_eq!((found.line, found.start, found.end), (1, 6, 7));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn errors_carry_line_numbers() {
    let err = parse("[\n1,\n2,\n]").unwrap_err();
    assert_eq!(err.line(), 4);
    assert_eq!(err.offset(), 8);
}

#[test]
fn escape_passthrough_in_tokenizer() {
    assert_eq!(
        tokenize(r#""a\"b""#)[0],
        Token::new(TokenKind::String, r#"a\"b"#, 1, 0, 6)
    );
}

#[test]
fn reserved_words() {
    assert_eq!(tokenize("GET")[0].kind, TokenKind::Get);
    assert_eq!(tokenize("get")[0].kind, TokenKind::Illegal);
}

#[test]
fn token_positions_are_monotonic() {
    let input = "{\"a\": [1, 2.5, \"s\"],\n \"b\": {\"c\": null}} trailing ?";
    let tokens = tokenize(input);
    assert!(tokens.last().unwrap().is_eof());
    assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    for pair in tokens.windows(2) {
        assert!(pair[0].start <= pair[1].start, "{pair:?}");
        assert!(pair[0].line <= pair[1].line, "{pair:?}");
    }
}

#[test]
fn rejects_what_reference_rejects() {
    let invalid = [
        "", "{", "[1,]", r#"{"a":1,}"#, "[1 2]", "123-4", "01", r#"{"a"}"#,
        "{1:2}", r#""\q""#, "[] []", "tru", "'single'",
    ];
    for input in invalid {
        assert!(serde_json::from_str::<serde_json::Value>(input).is_err());
        assert!(parse(input).is_err(), "{input:?} should fail");
    }
}

#[test]
fn negative_zero_round_trips() {
    let root = parse("-0").unwrap().root_value;
    let rendered = root.to_json().unwrap();
    assert_eq!(rendered, "-0.0");
    let reparsed: f64 = serde_json::from_str(&rendered).unwrap();
    assert!(reparsed == 0.0 && reparsed.is_sign_negative());
    assert_eq!(reference(&rendered), reference("-0"));
    assert_eq!(root.to_string(), "-0");
}

#[test]
fn out_of_range_numbers_round_trip_through_display() {
    let input = "[1e999,-1e999]";
    let root = parse(input).unwrap().root_value;
    let numbers: Vec<f64> = root.children().filter_map(Value::as_f64).collect();
    assert_eq!(numbers, [f64::INFINITY, f64::NEG_INFINITY]);

    // serializers cannot represent these, so rendering fails instead of
    // writing `null`
    assert!(root.to_json().is_err());
    assert_eq!(root.to_string(), input);
    assert_eq!(parse(&root.to_string()).unwrap().root_value, root);
}
