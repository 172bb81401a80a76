//! Splitting dotted paths and stepping through one level of a value tree.
//!
//! Segments are never escaped, so a separator cannot appear inside a key.
//! Array levels take decimal indices in canonical form (`"0"`, `"12"`);
//! `"01"` or `"-1"` name no element, just like a property lookup would.

use serde_json::Value;

/// Split `path` into segments. An empty path yields `None`.
pub(crate) fn split(path: &str, separator: char) -> Option<Vec<&str>> {
    if path.is_empty() {
        return None;
    }
    Some(path.split(separator).collect())
}

pub(crate) fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

/// Look up one segment. Scalars have no children; `Null` counts as absent.
pub(crate) fn lookup<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    let found = match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|index| items.get(index)),
        _ => None,
    };
    found.filter(|v| !v.is_null())
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_keeps_empty_segments() {
        assert_eq!(split("a.b.c", '.'), Some(vec!["a", "b", "c"]));
        assert_eq!(split("a..b", '.'), Some(vec!["a", "", "b"]));
        assert_eq!(split("a/b", '/'), Some(vec!["a", "b"]));
        assert_eq!(split("", '.'), None);
    }

    #[test]
    fn index_must_be_canonical() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index("01"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("x"), None);
    }

    #[test]
    fn lookup_treats_null_and_scalars_as_missing() {
        let value = json!({"a": null, "b": [10, null], "c": 5});
        assert_eq!(lookup(&value, "a"), None);
        assert_eq!(lookup(&value["b"], "0"), Some(&json!(10)));
        assert_eq!(lookup(&value["b"], "1"), None);
        assert_eq!(lookup(&value["b"], "2"), None);
        assert_eq!(lookup(&value["c"], "x"), None);
    }
}
