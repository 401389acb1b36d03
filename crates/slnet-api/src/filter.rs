// Object filters
//
// Filters are nested JSON objects that mirror the relational property
// hierarchy of the service (`subnets.datacenter.name`), with a
// `{"operation": ...}` leaf at the end of each path. The service owns the
// matching semantics; this module only shapes the structure.

use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Operators the service understands as a leading token in a string query.
/// Longer operators precede their prefixes so `<=` wins over `<`.
const KNOWN_OPERATIONS: &[&str] = &["<=", ">=", "!~", "*=", "^=", "$=", "_=", "<", ">", "~"];

/// A caller-supplied filter that was not a JSON object.
#[derive(Debug, Error)]
#[error("object filter must be a JSON object, got {kind}")]
pub struct InvalidFilter {
    pub kind: &'static str,
}

/// A nested object filter.
///
/// Setting a path creates any missing intermediate levels and leaves
/// sibling keys alone, so criteria can be layered on top of a filter the
/// caller already built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObjectFilter(Map<String, Value>);

impl ObjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `leaf` at the nested `path`, replacing only that leaf.
    ///
    /// A non-object value sitting on an intermediate segment is replaced by
    /// an object; an empty path is ignored.
    pub fn set<P: AsRef<str>>(&mut self, path: &[P], leaf: Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };

        let mut node = &mut self.0;
        for segment in parents {
            let entry = node
                .entry(segment.as_ref().to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Some(next) = entry.as_object_mut() else {
                return;
            };
            node = next;
        }
        node.insert(last.as_ref().to_owned(), leaf);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<P: AsRef<str>>(mut self, path: &[P], leaf: Value) -> Self {
        self.set(path, leaf);
        self
    }

    /// Look up the value stored at a nested path.
    pub fn get<P: AsRef<str>>(&self, path: &[P]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut value = self.0.get(first.as_ref())?;
        for segment in rest {
            value = value.as_object()?.get(segment.as_ref())?;
        }
        Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for ObjectFilter {
    type Error = InvalidFilter;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            Value::Bool(_) => Err(InvalidFilter { kind: "a boolean" }),
            Value::Number(_) => Err(InvalidFilter { kind: "a number" }),
            Value::String(_) => Err(InvalidFilter { kind: "a string" }),
            Value::Array(_) => Err(InvalidFilter { kind: "an array" }),
        }
    }
}

impl From<Map<String, Value>> for ObjectFilter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ── Query encoding ──────────────────────────────────────────────────

/// A value to match against in a filter leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Int(i64),
    Text(String),
}

impl From<i64> for Query {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Query {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u16> for Query {
    fn from(n: u16) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u8> for Query {
    fn from(n: u8) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Encode a query as a filter leaf.
///
/// Integers (and strings holding one) match exactly. Strings may start with
/// an explicit operator; otherwise `*` wildcards select contains, ends-with
/// or begins-with matching, and a bare string selects `_=` (exact,
/// case-insensitive on the service side).
pub fn query_filter(query: impl Into<Query>) -> Value {
    let text = match query.into() {
        Query::Int(n) => return json!({ "operation": n }),
        Query::Text(text) => text,
    };

    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return json!({ "operation": n });
    }

    for op in KNOWN_OPERATIONS {
        if let Some(rest) = text.strip_prefix(op) {
            return json!({ "operation": format!("{op} {}", rest.trim()) });
        }
    }

    let operation = match (text.starts_with('*'), text.ends_with('*')) {
        (true, true) => format!("*= {}", text.trim_matches('*')),
        (true, false) => format!("$= {}", text.trim_matches('*')),
        (false, true) => format!("^= {}", text.trim_matches('*')),
        (false, false) => format!("_= {text}"),
    };
    json!({ "operation": operation })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_nested_levels() {
        let filter = ObjectFilter::new().with(
            &["subnets", "datacenter", "name"],
            query_filter("dal05"),
        );
        assert_eq!(
            filter.into_value(),
            json!({ "subnets": { "datacenter": { "name": { "operation": "_= dal05" } } } })
        );
    }

    #[test]
    fn set_keeps_sibling_keys() {
        let mut filter = ObjectFilter::try_from(json!({
            "subnets": { "note": { "operation": "_= keep" } }
        }))
        .unwrap();
        filter.set(&["subnets", "version"], query_filter(6_u8));

        assert_eq!(
            filter.get(&["subnets", "note"]),
            Some(&json!({ "operation": "_= keep" }))
        );
        assert_eq!(
            filter.get(&["subnets", "version"]),
            Some(&json!({ "operation": 6 }))
        );
    }

    #[test]
    fn set_replaces_scalar_on_intermediate_segment() {
        let mut filter = ObjectFilter::try_from(json!({ "networkVlans": 3 })).unwrap();
        filter.set(&["networkVlans", "vlanNumber"], query_filter(1200_u32));
        assert_eq!(
            filter.into_value(),
            json!({ "networkVlans": { "vlanNumber": { "operation": 1200 } } })
        );
    }

    #[test]
    fn non_object_filters_are_rejected() {
        let err = ObjectFilter::try_from(json!(["a"])).unwrap_err();
        assert_eq!(err.kind, "an array");
        assert!(ObjectFilter::try_from(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn query_filter_numbers() {
        assert_eq!(query_filter(42_i64), json!({ "operation": 42 }));
        assert_eq!(query_filter("42"), json!({ "operation": 42 }));
    }

    #[test]
    fn query_filter_wildcards() {
        assert_eq!(query_filter("*dal*"), json!({ "operation": "*= dal" }));
        assert_eq!(query_filter("*05"), json!({ "operation": "$= 05" }));
        assert_eq!(query_filter("dal*"), json!({ "operation": "^= dal" }));
        assert_eq!(query_filter(" dal05 "), json!({ "operation": "_= dal05" }));
    }

    #[test]
    fn query_filter_explicit_operators() {
        assert_eq!(query_filter("<=  10.0"), json!({ "operation": "<= 10.0" }));
        assert_eq!(query_filter("<10.0"), json!({ "operation": "< 10.0" }));
        assert_eq!(query_filter("!~ test"), json!({ "operation": "!~ test" }));
        assert_eq!(query_filter("~test"), json!({ "operation": "~ test" }));
    }
}
