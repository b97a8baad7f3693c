//! The JSON value tree and its serializer.

use compact_str::CompactString;
use std::fmt;

/// A parsed JSON value. Object members keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
    Array(Vec<Value>),
    Object(Vec<(CompactString, Value)>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Member lookup on objects; `None` elsewhere or when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(members) => members
                .iter()
                .find(|(member, _)| member.as_str() == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Element lookup on arrays; `None` elsewhere or out of range.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Array(values) => values.get(index),
            _ => None,
        }
    }
}

/// Serializes compactly; the alternate flag (`{:#}`) pretty-prints with
/// four-space indentation. Output parses back to a structurally equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write_pretty(f, self, 0)
        } else {
            write_compact(f, self)
        }
    }
}

fn write_compact(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => write_string(f, s),
        Value::Array(values) => {
            f.write_str("[")?;
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_compact(f, v)?;
            }
            f.write_str("]")
        }
        Value::Object(members) => {
            f.write_str("{")?;
            for (i, (name, v)) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_string(f, name)?;
                f.write_str(":")?;
                write_compact(f, v)?;
            }
            f.write_str("}")
        }
    }
}

fn write_pretty(f: &mut fmt::Formatter<'_>, value: &Value, depth: usize) -> fmt::Result {
    match value {
        Value::Array(values) if !values.is_empty() => {
            f.write_str("[\n")?;
            for (i, v) in values.iter().enumerate() {
                indent(f, depth + 1)?;
                write_pretty(f, v, depth + 1)?;
                if i + 1 < values.len() {
                    f.write_str(",")?;
                }
                f.write_str("\n")?;
            }
            indent(f, depth)?;
            f.write_str("]")
        }
        Value::Object(members) if !members.is_empty() => {
            f.write_str("{\n")?;
            for (i, (name, v)) in members.iter().enumerate() {
                indent(f, depth + 1)?;
                write_string(f, name)?;
                f.write_str(": ")?;
                write_pretty(f, v, depth + 1)?;
                if i + 1 < members.len() {
                    f.write_str(",")?;
                }
                f.write_str("\n")?;
            }
            indent(f, depth)?;
            f.write_str("}")
        }
        other => write_compact(f, other),
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("    ")?;
    }
    Ok(())
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            other => fmt::Write::write_char(f, other)?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::Object(vec![(
            "a".into(),
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.5),
                Value::Bool(true),
                Value::Null,
            ]),
        )])
    }

    #[test]
    fn compact_form() {
        assert_eq!(sample().to_string(), r#"{"a":[1,2.5,true,null]}"#);
    }

    #[test]
    fn pretty_form_indents_containers() {
        let expected = "{\n    \"a\": [\n        1,\n        2.5,\n        true,\n        null\n    ]\n}";
        assert_eq!(format!("{:#}", sample()), expected);
    }

    #[test]
    fn empty_containers_stay_compact_when_pretty() {
        let value = Value::Array(vec![Value::Object(Vec::new())]);
        assert_eq!(format!("{value:#}"), "[\n    {}\n]");
    }

    #[test]
    fn strings_escape_specials() {
        let value = Value::String("a\"b\\c\nd".into());
        assert_eq!(value.to_string(), r#""a\"b\\c\nd""#);
    }

    #[test]
    fn accessors_navigate_the_tree() {
        let value = sample();
        let array = value.get("a").unwrap();
        assert_eq!(array.at(0).and_then(Value::as_f64), Some(1.0));
        assert_eq!(array.at(2).and_then(Value::as_bool), Some(true));
        assert!(array.at(3).unwrap().is_null());
        assert!(value.get("b").is_none());
    }
}
