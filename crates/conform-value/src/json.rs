use serde_json::Value as JsonValue;

use crate::prelude_internal::*;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and every non-integer land here
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            JsonValue::String(s) => Value::Text(s),
            JsonValue::Array(items) => {
                Value::Array(Array(items.into_iter().map(Value::from).collect()))
            }
            JsonValue::Object(map) => Value::Map(map.into_iter().collect()),
        }
    }
}

/// Lossy rendering used for reports: durations become debug strings, times
/// become RFC 3339 strings and non-finite floats become `null`.
impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Integer(n) => JsonValue::Number((*n).into()),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Duration(d) => JsonValue::String(format!("{:?}", d)),
            Value::Time(t) => JsonValue::String(t.to_rfc3339()),
            Value::Array(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), JsonValue::from(item)))
                    .collect(),
            ),
        }
    }
}
