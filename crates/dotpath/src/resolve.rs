//! Default specifiers and the numeric-string coercion step.

use std::fmt;

use serde_json::{Number, Value};

/// A value that may be deferred until the moment it is needed.
///
/// Thunks receive the top-level container as their context and run at most
/// once, since resolving consumes the `Resolvable`.
pub enum Resolvable<'a> {
    /// Used as-is
    Literal(Value),
    /// Invoked with the container as its sole argument
    Thunk(Box<dyn FnOnce(&Value) -> Value + 'a>),
}

impl<'a> Resolvable<'a> {
    /// Defer computation of the value until a read misses.
    pub fn lazy<F>(f: F) -> Self
    where
        F: FnOnce(&Value) -> Value + 'a,
    {
        Self::Thunk(Box::new(f))
    }

    /// No default at all; resolves to `Null`.
    pub fn none() -> Self {
        Self::Literal(Value::Null)
    }

    /// Produce the actual value without any coercion.
    pub fn resolve(self, ctx: &Value) -> Value {
        match self {
            Self::Literal(value) => value,
            Self::Thunk(f) => {
                log::trace!("Evaluating deferred value");
                f(ctx)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but literal strings go through
    /// [`coerce_numeric`] when `coerce` is set. Thunk results are returned
    /// untouched.
    pub(crate) fn resolve_with(self, ctx: &Value, coerce: bool) -> Value {
        match self {
            Self::Literal(value) if coerce => coerce_numeric(value),
            other => other.resolve(ctx),
        }
    }
}

impl fmt::Debug for Resolvable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

impl From<Value> for Resolvable<'_> {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Option<Value>> for Resolvable<'_> {
    fn from(value: Option<Value>) -> Self {
        Self::Literal(value.unwrap_or(Value::Null))
    }
}

impl From<&str> for Resolvable<'_> {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for Resolvable<'_> {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<bool> for Resolvable<'_> {
    fn from(value: bool) -> Self {
        Self::Literal(Value::Bool(value))
    }
}

impl From<i32> for Resolvable<'_> {
    fn from(value: i32) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for Resolvable<'_> {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<u64> for Resolvable<'_> {
    fn from(value: u64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for Resolvable<'_> {
    fn from(value: f64) -> Self {
        // Non-finite floats become Null, as serde_json does.
        Self::Literal(Value::from(value))
    }
}

/// JavaScript-style truthiness: `null`, `false`, zero and `""` are falsy.
/// Objects and arrays are always truthy, even when empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Turn numeric-looking text into a JSON number.
///
/// Only strings are touched. Empty and whitespace-only strings stay text,
/// and so does anything that would parse to a non-finite float.
pub fn coerce_numeric(value: Value) -> Value {
    match value {
        Value::String(text) => match parse_numeric(&text) {
            Some(number) => Value::Number(number),
            None => Value::String(text),
        },
        other => other,
    }
}

fn parse_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(number) = parse_radix(trimmed) {
        return Some(number);
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = trimmed.parse::<u64>() {
        return Some(Number::from(uint));
    }

    // `f64::from_str` also takes "inf" and "nan" spellings; reject anything
    // that does not start like a decimal literal.
    let first = trimmed.trim_start_matches(['+', '-']).chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    let float = trimmed.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
        // Whole floats read back as integers ("4.0" == 4).
        return Some(Number::from(float as i64));
    }
    Number::from_f64(float)
}

fn parse_radix(text: &str) -> Option<Number> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    u64::from_str_radix(&text[2..], radix).ok().map(Number::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thunk_receives_context() {
        let ctx = json!({"base": 40});
        let thunk = Resolvable::lazy(|ctx| json!(ctx["base"].as_i64().unwrap_or(0) + 2));
        assert!(matches!(thunk, Resolvable::Thunk(_)));
        assert_eq!(thunk.resolve(&ctx), json!(42));
    }

    #[test]
    fn resolve_leaves_strings_alone() {
        let value = Resolvable::from("42").resolve(&Value::Null);
        assert_eq!(value, json!("42"));
    }

    #[test]
    fn resolve_with_coerces_literals_only() {
        let literal = Resolvable::from("42").resolve_with(&Value::Null, true);
        assert_eq!(literal, json!(42));

        let thunk = Resolvable::lazy(|_| json!("42")).resolve_with(&Value::Null, true);
        assert_eq!(thunk, json!("42"));
    }

    #[test]
    fn coerces_decimal_forms() {
        assert_eq!(coerce_numeric(json!("42")), json!(42));
        assert_eq!(coerce_numeric(json!("-7")), json!(-7));
        assert_eq!(coerce_numeric(json!("+5")), json!(5));
        assert_eq!(coerce_numeric(json!(" 12 ")), json!(12));
        assert_eq!(coerce_numeric(json!("1.5")), json!(1.5));
        assert_eq!(coerce_numeric(json!(".5")), json!(0.5));
        assert_eq!(coerce_numeric(json!("1e3")), json!(1000));
        assert_eq!(coerce_numeric(json!("4.0")), json!(4));
        assert_eq!(
            coerce_numeric(json!("18446744073709551615")),
            json!(u64::MAX)
        );
    }

    #[test]
    fn coerces_prefixed_integers() {
        assert_eq!(coerce_numeric(json!("0x1F")), json!(31));
        assert_eq!(coerce_numeric(json!("0o17")), json!(15));
        assert_eq!(coerce_numeric(json!("0b101")), json!(5));
        assert_eq!(coerce_numeric(json!("0xZZ")), json!("0xZZ"));
    }

    #[test]
    fn keeps_non_numeric_text() {
        for text in ["", "   ", "abc", "12abc", "Infinity", "NaN", "inf", "1e999", "0x"] {
            assert_eq!(coerce_numeric(json!(text)), json!(text), "text: {text:?}");
        }
    }

    #[test]
    fn non_strings_pass_through() {
        assert_eq!(coerce_numeric(json!(true)), json!(true));
        assert_eq!(coerce_numeric(json!({"a": "1"})), json!({"a": "1"}));
        assert_eq!(coerce_numeric(Value::Null), Value::Null);
    }

    #[test]
    fn falsy_values() {
        for value in [Value::Null, json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_falsy(&value), "expected falsy: {value}");
        }
        for value in [json!({}), json!([]), json!(true), json!(1), json!("0")] {
            assert!(!is_falsy(&value), "expected truthy: {value}");
        }
    }
}
