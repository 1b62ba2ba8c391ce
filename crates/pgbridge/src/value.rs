//! Scalar literal formatting and parameter binding.
//!
//! Every literal emitted anywhere in the crate goes through [`sql_literal`],
//! so quoting rules live in exactly one place. [`PgValue`] is the companion
//! for the parameterized path: a JSON scalar bound as a `tokio-postgres`
//! query parameter, converted to the wire type the statement expects.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// Render a JSON scalar as an injection-safe SQL literal.
///
/// - null → `NULL`
/// - string → single-quoted, embedded quotes doubled
/// - boolean → `TRUE` / `FALSE`
/// - number → unquoted
/// - arrays and objects degrade to their quoted string form
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_text(s),
        other => quote_text(&other.to_string()),
    }
}

fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Controls how scalar values render in literal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Client-issued statement: every scalar is a quoted literal.
    Statement,
    /// Stored-routine body: strings following the `p_` naming convention
    /// are routine parameter references and render bare.
    RoutineBody,
}

impl ValueMode {
    pub(crate) fn literal(self, value: &Value) -> String {
        match (self, value) {
            (ValueMode::RoutineBody, Value::String(s)) if s.starts_with("p_") => s.clone(),
            _ => sql_literal(value),
        }
    }
}

/// A JSON scalar bound as a query parameter.
///
/// The statement's inferred parameter type drives the conversion: numbers are
/// narrowed to the expected integer/float width, and strings are parsed into
/// `uuid`/`chrono` values when the target column is UUID or a date/time type.
#[derive(Debug, Clone, PartialEq)]
pub struct PgValue(pub Value);

type BoxError = Box<dyn std::error::Error + Sync + Send>;

impl ToSql for PgValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Number(n) => number_to_sql(n, ty, out),
            Value::String(s) => text_to_sql(s, ty, out),
            other if *ty == Type::JSON || *ty == Type::JSONB => other.to_sql(ty, out),
            other => other.to_string().to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn number_to_sql(n: &serde_json::Number, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    // `Type` is a struct of associated constants, so dispatch on its name.
    match ty.name() {
        "int2" => {
            let i = integer(n)?;
            i16::try_from(i)?.to_sql(ty, out)
        }
        "int4" => {
            let i = integer(n)?;
            i32::try_from(i)?.to_sql(ty, out)
        }
        "int8" => integer(n)?.to_sql(ty, out),
        "float4" => (float(n)? as f32).to_sql(ty, out),
        "float8" => float(n)?.to_sql(ty, out),
        "numeric" => Err(format!("cannot bind number {n} as DECIMAL; pass it as a literal").into()),
        _ => {
            // Untyped position (e.g. prepared against unknown): keep integers
            // as INT8, everything else as FLOAT8.
            if let Some(i) = n.as_i64() {
                i.to_sql(ty, out)
            } else {
                float(n)?.to_sql(ty, out)
            }
        }
    }
}

fn integer(n: &serde_json::Number) -> Result<i64, BoxError> {
    n.as_i64()
        .ok_or_else(|| format!("number {n} is not an integer").into())
}

fn float(n: &serde_json::Number) -> Result<f64, BoxError> {
    n.as_f64()
        .ok_or_else(|| format!("number {n} out of range").into())
}

fn text_to_sql(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match ty.name() {
        "uuid" => uuid::Uuid::parse_str(s)?.to_sql(ty, out),
        "date" => s.parse::<NaiveDate>()?.to_sql(ty, out),
        "timestamp" => parse_timestamp(s)
            .ok_or_else(|| format!("'{s}' is not a timestamp"))?
            .to_sql(ty, out),
        "timestamptz" => parse_timestamptz(s)
            .ok_or_else(|| format!("'{s}' is not a timestamp with time zone"))?
            .to_sql(ty, out),
        "json" | "jsonb" => Value::String(s.to_string()).to_sql(ty, out),
        _ => s.to_sql(ty, out),
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()
}

fn parse_timestamptz(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_timestamp(s).map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_null() {
        assert_eq!(sql_literal(&Value::Null), "NULL");
    }

    #[test]
    fn literal_string_quoted() {
        assert_eq!(sql_literal(&json!("active")), "'active'");
    }

    #[test]
    fn literal_string_doubles_embedded_quotes() {
        assert_eq!(sql_literal(&json!("O'Brien")), "'O''Brien'");
    }

    #[test]
    fn literal_booleans() {
        assert_eq!(sql_literal(&json!(true)), "TRUE");
        assert_eq!(sql_literal(&json!(false)), "FALSE");
    }

    #[test]
    fn literal_numbers_unquoted() {
        assert_eq!(sql_literal(&json!(42)), "42");
        assert_eq!(sql_literal(&json!(-3.5)), "-3.5");
    }

    #[test]
    fn literal_array_degrades_to_quoted_string() {
        assert_eq!(sql_literal(&json!([1, 2])), "'[1,2]'");
    }

    #[test]
    fn routine_body_mode_keeps_parameter_references_bare() {
        assert_eq!(
            ValueMode::RoutineBody.literal(&json!("p_user_id")),
            "p_user_id"
        );
        assert_eq!(ValueMode::Statement.literal(&json!("p_user_id")), "'p_user_id'");
        assert_eq!(ValueMode::RoutineBody.literal(&json!("plain")), "'plain'");
    }

    #[test]
    fn bind_integer_widths() {
        let mut buf = BytesMut::new();
        assert!(PgValue(json!(7)).to_sql(&Type::INT4, &mut buf).is_ok());
        assert_eq!(buf.len(), 4);

        let mut buf = BytesMut::new();
        assert!(PgValue(json!(7)).to_sql(&Type::INT8, &mut buf).is_ok());
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn bind_int2_overflow_errors() {
        let mut buf = BytesMut::new();
        assert!(PgValue(json!(100_000)).to_sql(&Type::INT2, &mut buf).is_err());
    }

    #[test]
    fn bind_string_as_uuid() {
        let mut buf = BytesMut::new();
        let value = PgValue(json!("6d1a24ec-9f6c-4e67-8dbd-7a2d7d9f7a01"));
        assert!(value.to_sql(&Type::UUID, &mut buf).is_ok());
        assert_eq!(buf.len(), 16);

        let mut buf = BytesMut::new();
        assert!(PgValue(json!("not-a-uuid")).to_sql(&Type::UUID, &mut buf).is_err());
    }

    #[test]
    fn bind_string_as_date() {
        let mut buf = BytesMut::new();
        assert!(PgValue(json!("2024-06-01")).to_sql(&Type::DATE, &mut buf).is_ok());
    }

    #[test]
    fn bind_null_is_null() {
        let mut buf = BytesMut::new();
        let result = PgValue(Value::Null).to_sql(&Type::TEXT, &mut buf);
        assert!(matches!(result, Ok(IsNull::Yes)));
    }
}
