//! Conversion from `serde_json` values.

use serde_json::Value;

use super::{ContentValue, ObjectValue};

impl From<Value> for ContentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ContentValue::Null,
            Value::Bool(b) => ContentValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(ContentValue::Null, ContentValue::Number),
            Value::String(s) => ContentValue::from(s),
            Value::Array(items) => ContentValue::array(items),
            Value::Object(map) => ContentValue::object(map.into_iter().collect::<ObjectValue>()),
        }
    }
}

impl From<&Value> for ContentValue {
    fn from(value: &Value) -> Self {
        ContentValue::from(value.clone())
    }
}
