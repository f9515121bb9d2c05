use crate::{Record, Value};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Value::I64(v),
                None => n.as_f64().map(Value::F64).unwrap_or(Value::Null),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Record(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Record>(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(v),
            Value::I64(v) => Json::from(v),
            Value::F64(v) => serde_json::Number::from_f64(v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(v) => Json::String(v),
            Value::Uuid(v) => Json::String(v.to_string()),
            Value::DateTime(v) => Json::String(v.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)),
            Value::Record(record) => Json::Object(
                record
                    .into_iter()
                    .map(|(key, value)| (key, Json::from(value)))
                    .collect(),
            ),
            Value::List(items) => Json::Array(items.into_iter().map(Json::from).collect()),
        }
    }
}
