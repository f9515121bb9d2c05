use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Value};

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Naive timestamps are taken to be in UTC.
impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value.and_utc())
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            // Records built through serde carry timestamps as RFC 3339 text
            Value::String(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(value) => Ok(value.with_timezone(&Utc)),
                Err(_) => Err(Error::type_conversion(Value::String(text), "DateTime<Utc>")),
            },
            _ => Err(Error::type_conversion(value, "DateTime<Utc>")),
        }
    }
}
