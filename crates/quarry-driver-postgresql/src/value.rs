use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use quarry_core::Value as CoreValue;
use rust_decimal::Decimal;
use std::error::Error as StdError;
use tokio_postgres::types::{private::BytesMut, to_sql_checked, IsNull, Kind, ToSql, Type};
use uuid::Uuid;

type BoxError = Box<dyn StdError + Sync + Send>;

/// Binds a [`quarry_core::Value`] to a statement parameter.
///
/// The encoding is picked from the parameter type PostgreSQL inferred for the
/// placeholder, so one `Value` variant can feed several column types.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToSql for Value<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                Type::JSON | Type::JSONB => serde_json::Value::from(*value).to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                Type::JSON | Type::JSONB => json(self.0).to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::String(value) => match *ty {
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => value.to_sql(ty, out),
                Type::UUID => value.parse::<Uuid>()?.to_sql(ty, out),
                Type::TIMESTAMPTZ => value.parse::<DateTime<Utc>>()?.to_sql(ty, out),
                Type::TIMESTAMP => value.parse::<DateTime<Utc>>()?.naive_utc().to_sql(ty, out),
                Type::DATE => value.parse::<NaiveDate>()?.to_sql(ty, out),
                Type::TIME => value.parse::<NaiveTime>()?.to_sql(ty, out),
                Type::INT8 => value.parse::<i64>()?.to_sql(ty, out),
                Type::NUMERIC => value.parse::<Decimal>()?.to_sql(ty, out),
                Type::JSON | Type::JSONB => json(self.0).to_sql(ty, out),
                // Enum labels travel as their text
                _ if matches!(ty.kind(), Kind::Enum(_)) => value.to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::Uuid(value) => match *ty {
                Type::UUID => value.to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::DateTime(value) => match *ty {
                Type::TIMESTAMPTZ => value.to_sql(ty, out),
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                Type::TEXT | Type::VARCHAR => value.to_rfc3339().to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::Record(_) => match *ty {
                Type::JSON | Type::JSONB => json(self.0).to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
            CoreValue::List(items) => match *ty {
                Type::JSON | Type::JSONB => json(self.0).to_sql(ty, out),
                _ if matches!(ty.kind(), Kind::Array(_)) => items
                    .iter()
                    .map(Value)
                    .collect::<Vec<_>>()
                    .to_sql(ty, out),
                _ => mismatch(self.0, ty),
            },
        }
    }

    /// Every type is accepted so that `NULL` binds anywhere; non-null values
    /// of an unsupported type are rejected by `to_sql`.
    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn json(value: &CoreValue) -> serde_json::Value {
    serde_json::Value::from(value.clone())
}

fn mismatch(value: &CoreValue, ty: &Type) -> Result<IsNull, BoxError> {
    Err(format!("cannot bind {} value to a parameter of type `{ty}`", value.type_name()).into())
}
