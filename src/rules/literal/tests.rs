use crate::engine::Classifier;
use crate::rules::literal;
use crate::rules::literal::helpers::parse_float;
use crate::{ClassificationError, Options, Quote, TypedValue};
use pretty_assertions::assert_eq;

fn quoted(value: &str, quote: Quote) -> TypedValue {
    TypedValue::QuotedString { value: value.to_string(), quote }
}

fn plain(value: &str) -> TypedValue {
    TypedValue::PlainString(value.to_string())
}

fn run(token: &str, strict: bool) -> Result<TypedValue, ClassificationError> {
    let rules = literal::rules::get();
    Classifier::new(token, &rules).run(&Options { strict })
}

#[test]
fn literal_examples_relaxed() {
    // Array of (input, expected)
    let cases: Vec<(&str, TypedValue)> = vec![
        ("true", TypedValue::Boolean(true)),
        ("false", TypedValue::Boolean(false)),
        ("0", TypedValue::Integer(0)),
        ("42", TypedValue::Integer(42)),
        ("-504", TypedValue::Integer(-504)),
        ("007", TypedValue::Integer(7)),
        ("-0", TypedValue::Integer(0)),
        ("9223372036854775807", TypedValue::Integer(i64::MAX)),
        ("-9223372036854775808", TypedValue::Integer(i64::MIN)),
        ("1.5", TypedValue::Float(1.5)),
        ("-0.25", TypedValue::Float(-0.25)),
        ("1.10", TypedValue::Float(1.1)),
        (".77", TypedValue::Float(0.77)),
        ("-.5", TypedValue::Float(-0.5)),
        ("0.0", TypedValue::Float(0.0)),
        ("/a.*b/", TypedValue::Regex("a.*b".into())),
        ("/ab+c/", TypedValue::Regex("ab+c".into())),
        ("//", TypedValue::Regex(String::new())),
        ("/a/b/", TypedValue::Regex("a/b".into())),
        ("\"/ab+c/\"", TypedValue::Regex("ab+c".into())),
        ("'/x/'", TypedValue::Regex("x".into())),
        ("\"/x/'", TypedValue::Regex("x".into())),
        ("\"/x/", TypedValue::Regex("x".into())),
        ("/[/", TypedValue::Regex("[".into())),
        ("\"hello\"", quoted("hello", Quote::Double)),
        ("'hello'", quoted("hello", Quote::Single)),
        ("\"hello world\"", quoted("hello world", Quote::Double)),
        ("\"\"", quoted("", Quote::Double)),
        ("''", quoted("", Quote::Single)),
        ("'\"'", quoted("\"", Quote::Single)),
        ("\"12\"", quoted("12", Quote::Double)),
        ("'true'", quoted("true", Quote::Single)),
        ("plainword", plain("plainword")),
        ("", plain("")),
        ("True", plain("True")),
        ("1.", plain("1.")),
        ("1.2.3", plain("1.2.3")),
        ("1e5", plain("1e5")),
        ("+5", plain("+5")),
        ("--5", plain("--5")),
        ("/", plain("/")),
        ("a/b", plain("a/b")),
        ("\"", plain("\"")),
        ("\"mismatched'", plain("\"mismatched'")),
        ("it's", plain("it's")),
        ("\"multi\nline\"", plain("\"multi\nline\"")),
        ("/multi\nline/", plain("/multi\nline/")),
    ];

    for (input, expected) in cases {
        let got = run(input, false);
        assert_eq!(got, Ok(expected), "input {input:?}");
    }
}

#[test]
fn boolean_ignores_strictness() {
    assert_eq!(run("true", true), Ok(TypedValue::Boolean(true)));
    assert_eq!(run("false", true), Ok(TypedValue::Boolean(false)));
}

#[test]
fn strict_rejects_bare_words() {
    for input in ["plainword", "", "True", "1.", "a/b", "\"mismatched'"] {
        assert_eq!(run(input, true), Err(ClassificationError::Unrecognized { token: input.to_string() }), "{input:?}");
    }
}

#[test]
fn strict_keeps_recognized_literals() {
    assert_eq!(run("-3", true), Ok(TypedValue::Integer(-3)));
    assert_eq!(run("2.0", true), Ok(TypedValue::Float(2.0)));
    assert_eq!(run("/x/", true), Ok(TypedValue::Regex("x".into())));
    assert_eq!(run("'q'", true), Ok(quoted("q", Quote::Single)));
}

#[test]
fn integer_overflow_is_a_classification_error() {
    for (input, strict) in [("9223372036854775808", false), ("-9223372036854775809", true), ("99999999999999999999", false)]
    {
        match run(input, strict) {
            Err(ClassificationError::InvalidInteger { token, .. }) => assert_eq!(token, input),
            other => panic!("{input:?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn float_overflow_is_a_classification_error() {
    let input = format!("{}.0", "9".repeat(400));
    assert_eq!(run(&input, false), Err(ClassificationError::FloatOutOfRange { token: input.clone() }));
}

#[test]
fn decimal_point_never_yields_integer() {
    for input in ["0.0", "10.0", "-1.000", "123456789012345678901234567890.5"] {
        assert!(matches!(run(input, true), Ok(TypedValue::Float(_))), "{input:?}");
    }
}

#[test]
fn float_parse_failures_are_out_of_range() {
    let huge = format!("-{}.5", "1".repeat(320));
    assert_eq!(parse_float(&huge), Err(ClassificationError::FloatOutOfRange { token: huge.clone() }));
    assert_eq!(parse_float("."), Err(ClassificationError::FloatOutOfRange { token: ".".into() }));
    assert_eq!(parse_float("-.5"), Ok(-0.5));
}
