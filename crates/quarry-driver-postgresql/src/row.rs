use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use quarry_core::{err, Error, Record, Result, Value};
use rust_decimal::Decimal;
use std::error::Error as StdError;
use tokio_postgres::{
    types::{FromSql, Kind, Type},
    Column, Row,
};
use uuid::Uuid;

/// Converts a returned row into a record keyed by column name.
pub(crate) fn postgres_to_record(row: &Row) -> Result<Record> {
    let mut record = Record::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        record.insert(column.name(), postgres_to_quarry(index, row, column)?);
    }

    Ok(record)
}

/// Converts a PostgreSQL value within a row to a [`quarry_core::Value`].
fn postgres_to_quarry(index: usize, row: &Row, column: &Column) -> Result<Value> {
    // `Type` does not expose its inner enum, so each type is matched by value.
    let value: Value = match *column.type_() {
        Type::BOOL => get::<bool>(row, index)?.into(),
        Type::INT2 => get::<i16>(row, index)?.into(),
        Type::INT4 => get::<i32>(row, index)?.into(),
        Type::INT8 => get::<i64>(row, index)?.into(),
        Type::FLOAT4 => get::<f32>(row, index)?.into(),
        Type::FLOAT8 => get::<f64>(row, index)?.into(),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, index)?.into()
        }
        Type::UUID => get::<Uuid>(row, index)?.into(),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, index)?.into(),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, index)?.into(),
        // Values without a matching variant are read as their canonical text
        Type::DATE => get::<NaiveDate>(row, index)?.map(|v| v.to_string()).into(),
        Type::TIME => get::<NaiveTime>(row, index)?.map(|v| v.to_string()).into(),
        Type::NUMERIC => get::<Decimal>(row, index)?.map(|v| v.to_string()).into(),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, index)?
            .map(Value::from)
            .unwrap_or_default(),
        Type::BOOL_ARRAY => list::<bool>(row, index)?,
        Type::INT2_ARRAY => list::<i16>(row, index)?,
        Type::INT4_ARRAY => list::<i32>(row, index)?,
        Type::INT8_ARRAY => list::<i64>(row, index)?,
        Type::FLOAT4_ARRAY => list::<f32>(row, index)?,
        Type::FLOAT8_ARRAY => list::<f64>(row, index)?,
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => list::<String>(row, index)?,
        Type::UUID_ARRAY => list::<Uuid>(row, index)?,
        Type::TIMESTAMPTZ_ARRAY => list::<DateTime<Utc>>(row, index)?,
        ref ty if matches!(ty.kind(), Kind::Enum(_)) => {
            get::<EnumLabel>(row, index)?.map(|label| label.0).into()
        }
        ref ty => {
            return Err(err!(
                "unsupported PostgreSQL type `{ty}` in column `{}`",
                column.name()
            ))
        }
    };

    Ok(value)
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, index: usize) -> Result<Option<T>> {
    row.try_get::<usize, Option<T>>(index).map_err(Error::driver)
}

fn list<'a, T>(row: &'a Row, index: usize) -> Result<Value>
where
    T: FromSql<'a> + Into<Value>,
{
    Ok(get::<Vec<Option<T>>>(row, index)?.into())
}

/// The label of a user-defined enum, sent as plain UTF-8.
struct EnumLabel(String);

impl<'a> FromSql<'a> for EnumLabel {
    fn from_sql(_: &Type, raw: &'a [u8]) -> core::result::Result<Self, Box<dyn StdError + Sync + Send>> {
        Ok(EnumLabel(std::str::from_utf8(raw)?.to_string()))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_))
    }
}
