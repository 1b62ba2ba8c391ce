//! Dynamic row decoding.
//!
//! The engine passes result rows through to the caller as JSON without
//! interpreting them. Decoding is driven by the column's declared type;
//! a type outside the supported set is a decode error naming the column,
//! not a silent null.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tokio_postgres::Row;
use tokio_postgres::types::Type;

use crate::error::{BridgeError, BridgeResult};

/// Decode one row into a JSON object, preserving column order.
pub fn row_to_json(row: &Row) -> BridgeResult<Value> {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let value = decode_column(row, index, column.type_())
            .map_err(|message| BridgeError::decode(name, message))?;
        object.insert(name.to_string(), value);
    }
    Ok(Value::Object(object))
}

fn decode_column(row: &Row, index: usize, ty: &Type) -> Result<Value, String> {
    // `Type` is a struct of associated constants, so dispatch on its name.
    let value = match ty.name() {
        "bool" => get::<bool>(row, index)?.map(Value::Bool),
        "int2" => get::<i16>(row, index)?.map(|v| Value::Number(v.into())),
        "int4" => get::<i32>(row, index)?.map(|v| Value::Number(v.into())),
        "int8" => get::<i64>(row, index)?.map(|v| Value::Number(v.into())),
        "float4" => get::<f32>(row, index)?.and_then(|v| float_value(f64::from(v))),
        "float8" => get::<f64>(row, index)?.and_then(float_value),
        "text" | "varchar" | "bpchar" | "name" => get::<String>(row, index)?.map(Value::String),
        "uuid" => get::<uuid::Uuid>(row, index)?.map(|v| Value::String(v.to_string())),
        "date" => get::<NaiveDate>(row, index)?.map(|v| Value::String(v.to_string())),
        "timestamp" => get::<NaiveDateTime>(row, index)?
            .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        "timestamptz" => get::<DateTime<Utc>>(row, index)?.map(|v| Value::String(v.to_rfc3339())),
        "json" | "jsonb" => get::<Value>(row, index)?,
        other => return Err(format!("unsupported column type {other}")),
    };
    Ok(value.unwrap_or(Value::Null))
}

fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>, String>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get::<_, Option<T>>(index).map_err(|e| e.to_string())
}

fn float_value(v: f64) -> Option<Value> {
    serde_json::Number::from_f64(v).map(Value::Number)
}
