//! End-to-end tests for the JSON front-end.

#![cfg(feature = "frontend-json")]

use flatgram::json::{self, grammar, JsonError, Value};
use flatgram::ParseError;

#[test]
fn table_keys_ascend_strictly() {
    let keys: Vec<_> = grammar()
        .entries()
        .map(|e| (e.terminal, e.non_terminal))
        .collect();
    assert!(!keys.is_empty());
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "{pair:?}");
    }
}

#[test]
fn round_trip_preserves_structure() {
    let value = json::from_str(r#"{"a":[1,2.5,true,null]}"#).unwrap();

    let array = value.get("a").expect("member a");
    assert_eq!(array.at(0).and_then(Value::as_f64), Some(1.0));
    assert_eq!(array.at(1).and_then(Value::as_f64), Some(2.5));
    assert_eq!(array.at(2).and_then(Value::as_bool), Some(true));
    assert!(array.at(3).expect("fourth element").is_null());

    let reparsed = json::from_str(&value.to_string()).unwrap();
    assert_eq!(reparsed, value);
}

#[test]
fn pretty_output_reparses_equal() {
    let value = json::from_str(r#"{"a":{"b":[1,[2,{"c":null}]],"d":"e"}}"#).unwrap();
    let pretty = format!("{value:#}");
    assert_eq!(json::from_str(&pretty).unwrap(), value);
}

#[test]
fn escapes_survive_round_trips() {
    let value = json::from_str(r#""tab\there \"quoted\" back\\slash""#).unwrap();
    assert_eq!(value.as_str(), Some("tab\there \"quoted\" back\\slash"));
    assert_eq!(json::from_str(&value.to_string()).unwrap(), value);
}

#[test]
fn numbers_round_trip_by_value() {
    for text in ["0", "7", "-3", "2.5", "0.125", "1e3", "6.02e23"] {
        let value = json::from_str(text).unwrap();
        let reparsed = json::from_str(&value.to_string()).unwrap();
        assert_eq!(reparsed, value, "{text}");
    }
}

#[test]
fn whitespace_is_insignificant() {
    let compact = json::from_str(r#"{"a":[1,2]}"#).unwrap();
    let spaced = json::from_str("{\n  \"a\" : [ 1 ,\t2 ]\n}").unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn error_cases() {
    assert!(matches!(
        json::from_str("").unwrap_err(),
        JsonError::Parse(ParseError::NoProduction { .. })
    ));
    assert!(matches!(
        json::from_str("[1,]").unwrap_err(),
        JsonError::Parse(ParseError::NoProduction { .. })
    ));
    assert!(matches!(
        json::from_str(r#"{"a":1"#).unwrap_err(),
        JsonError::Parse(ParseError::NoProduction { .. })
    ));
    assert!(matches!(
        json::from_str("[1 2]").unwrap_err(),
        JsonError::Parse(ParseError::NoProduction { .. })
    ));
    assert!(matches!(
        json::from_str("falsy").unwrap_err(),
        JsonError::Parse(ParseError::Lexical(_))
    ));
    assert!(matches!(
        json::from_str("{} {}").unwrap_err(),
        JsonError::Parse(ParseError::TrailingInput { .. })
    ));
}

#[test]
fn from_str_trait_matches_module_function() {
    let via_trait: Value = "[true,false]".parse().unwrap();
    assert_eq!(via_trait, json::from_str("[true,false]").unwrap());
}
