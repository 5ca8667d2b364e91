//! Schema nodes
//!
//! A schema is a tree of literals and predicates. Only [`Schema::Map`] and
//! [`Schema::Slice`] are descended into; a [`Value::Array`] or
//! [`Value::Map`] held by [`Schema::Literal`] is compared as one opaque
//! value at one path.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::{IsDef, Value};

pub type SchemaMap = IndexMap<String, Schema>;

#[derive(Debug, Clone)]
pub enum Schema {
    /// Checked by deep equality
    Literal(Value),
    /// Checked by running the predicate
    Is(IsDef),
    /// Keyed sub-schemas, walked recursively
    Map(SchemaMap),
    /// Positional sub-schemas, walked recursively
    Slice(Vec<Schema>),
}

impl Schema {
    pub fn map<K: Into<String>, V: Into<Schema>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Schema::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn slice<V: Into<Schema>>(items: impl IntoIterator<Item = V>) -> Self {
        Schema::Slice(items.into_iter().map(Into::into).collect())
    }

    /// JSON objects become walked schema maps; everything else, arrays
    /// included, becomes an opaque literal.
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Object(map) => Schema::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Schema::from_json(v)))
                    .collect(),
            ),
            other => Schema::Literal(other.into()),
        }
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Schema::Literal(value)
    }
}

impl From<IsDef> for Schema {
    fn from(def: IsDef) -> Self {
        Schema::Is(def)
    }
}

impl From<SchemaMap> for Schema {
    fn from(map: SchemaMap) -> Self {
        Schema::Map(map)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(value: $ty) -> Self {
                    Schema::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(
    bool,
    i32,
    i64,
    u32,
    f64,
    &str,
    String,
    Duration,
    DateTime<FixedOffset>,
    DateTime<Utc>,
);

/// Build a [`Schema`].
///
/// - `schema!({ "key" => expr, ... })` builds a [`Schema::Map`]
/// - `schema!([expr, ...])` builds a [`Schema::Slice`]
/// - `schema!(expr)` converts with `Schema::from`
///
/// Values are any expression convertible into a `Schema`, including nested
/// `schema!` calls and [`IsDef`]s.
///
/// ```
/// use conform::{schema, predicates::is_int_gt};
///
/// let schema = schema!({
///     "name" => "rover",
///     "age" => is_int_gt(0),
///     "owner" => schema!({ "name" => "alice" }),
/// });
/// assert!(matches!(schema, conform::Schema::Map(_)));
/// ```
#[macro_export]
macro_rules! schema {
    ({ $($key:expr => $value:expr),* $(,)? }) => {
        $crate::Schema::Map(<$crate::SchemaMap as ::core::iter::FromIterator<(
            ::std::string::String,
            $crate::Schema,
        )>>::from_iter([
            $( (::std::string::String::from($key), $crate::Schema::from($value)) ),*
        ]))
    };
    ([ $($value:expr),* $(,)? ]) => {
        $crate::Schema::Slice(::std::vec![ $( $crate::Schema::from($value) ),* ])
    };
    ($value:expr) => {
        $crate::Schema::from($value)
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::predicates::is_string;

    #[test]
    fn test_macro_shapes() {
        let schema = schema!({
            "a" => 1,
            "b" => schema!(["x", is_string()]),
            "c" => Value::from(vec![1, 2]),
        });
        let Schema::Map(map) = schema else {
            panic!("expected map");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(matches!(map["a"], Schema::Literal(Value::Integer(1))));
        assert!(matches!(&map["b"], Schema::Slice(items) if items.len() == 2));
        assert!(matches!(map["c"], Schema::Literal(Value::Array(_))));
    }

    #[test]
    fn test_macro_empty() {
        assert!(matches!(schema!({}), Schema::Map(map) if map.is_empty()));
        assert!(matches!(schema!([]), Schema::Slice(items) if items.is_empty()));
    }

    #[test]
    fn test_from_json_keeps_arrays_opaque() {
        let schema = Schema::from_json(json!({"a": {"b": [1, 2]}, "c": "d"}));
        let Schema::Map(map) = schema else {
            panic!("expected map");
        };
        let Schema::Map(inner) = &map["a"] else {
            panic!("expected nested map");
        };
        assert!(matches!(inner["b"], Schema::Literal(Value::Array(_))));
        assert!(matches!(&map["c"], Schema::Literal(Value::Text(s)) if s == "d"));
    }
}
