//! Row mapping traits and utilities

use crate::error::{QbError, QbResult};
use crate::value::Value;

/// A result row as returned by a driver: ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Builder-style so drivers and tests can assemble rows inline.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Value at position `idx`.
    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.columns.get(idx).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|(_, v)| v)
    }

    /// Convert the named column.
    pub fn try_get<T: FromValue>(&self, column: &str) -> QbResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| QbError::decode(column, "column not found"))?;
        T::from_value(value).map_err(|message| QbError::decode(column, message))
    }

    /// Convert the column at `idx`.
    pub fn try_get_index<T: FromValue>(&self, idx: usize) -> QbResult<T> {
        let name = self
            .columns
            .get(idx)
            .map_or_else(|| format!("#{idx}"), |(name, _)| name.clone());
        let value = self
            .get_index(idx)
            .ok_or_else(|| QbError::decode(&name, "column index out of range"))?;
        T::from_value(value).map_err(|message| QbError::decode(name, message))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.columns.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Conversion of a single column value into a Rust type.
///
/// Numeric text is parsed, since MySQL drivers commonly hand back every
/// column as text.
pub trait FromValue: Sized {
    /// Convert, returning a human-readable reason on failure.
    fn from_value(value: &Value) -> Result<Self, String>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        value
            .as_i64()
            .ok_or_else(|| format!("expected integer, got {value:?}"))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, String> {
        let v = i64::from_value(value)?;
        i32::try_from(v).map_err(|_| format!("integer {v} out of range for i32"))
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        if let Value::Text(s) | Value::Raw(s) = value {
            if let Ok(v) = s.trim().parse::<u64>() {
                return Ok(v);
            }
        }
        let v = i64::from_value(value)?;
        u64::try_from(v).map_err(|_| format!("integer {v} out of range for u64"))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        value
            .as_f64()
            .ok_or_else(|| format!("expected number, got {value:?}"))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => other
                .as_i64()
                .map(|v| v != 0)
                .ok_or_else(|| format!("expected boolean, got {other:?}")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, String> {
        value
            .to_text()
            .ok_or_else(|| "unexpected NULL".to_string())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, String> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Trait for mapping a result row to a Rust type.
///
/// The implementations on [`Row`], `Vec<Value>` and `serde_json::Value` cover
/// the usual output shapes: raw rows, positional arrays and associative objects.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> QbResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(row.clone())
    }
}

impl FromRow for Vec<Value> {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(row.values().cloned().collect())
    }
}

impl FromRow for serde_json::Map<String, serde_json::Value> {
    fn from_row(row: &Row) -> QbResult<Self> {
        row.columns
            .iter()
            .map(|(name, value)| {
                serde_json::to_value(value)
                    .map(|json| (name.clone(), json))
                    .map_err(|e| QbError::decode(name, e.to_string()))
            })
            .collect()
    }
}

impl FromRow for serde_json::Value {
    fn from_row(row: &Row) -> QbResult<Self> {
        serde_json::Map::from_row(row).map(serde_json::Value::Object)
    }
}

macro_rules! from_row_tuple {
    ($($t:ident => $idx:tt),+) => {
        impl<$($t: FromValue),+> FromRow for ($($t,)+) {
            fn from_row(row: &Row) -> QbResult<Self> {
                Ok(($(row.try_get_index::<$t>($idx)?,)+))
            }
        }
    };
}

from_row_tuple!(A => 0);
from_row_tuple!(A => 0, B => 1);
from_row_tuple!(A => 0, B => 1, C => 2);
from_row_tuple!(A => 0, B => 1, C => 2, D => 3);

#[cfg(test)]
mod tests {
    use super::*;

    fn user_row() -> Row {
        Row::new()
            .with("id", "7")
            .with("name", "ladina")
            .with("score", 9.5)
            .with("deleted_at", Value::Null)
    }

    #[test]
    fn try_get_parses_numeric_text() {
        let row = user_row();
        assert_eq!(row.try_get::<i64>("id").unwrap(), 7);
        assert_eq!(row.try_get::<String>("name").unwrap(), "ladina");
        assert_eq!(row.try_get::<Option<String>>("deleted_at").unwrap(), None);
    }

    #[test]
    fn missing_column_is_decode_error() {
        let err = user_row().try_get::<i64>("nope").unwrap_err();
        assert!(matches!(err, QbError::Decode { ref column, .. } if column == "nope"));
    }

    #[test]
    fn out_of_range_float_is_decode_error() {
        let row = Row::new().with("big", 1e20_f64).with("whole", 42.0_f64);
        assert!(matches!(
            row.try_get::<i64>("big"),
            Err(QbError::Decode { ref column, .. }) if column == "big"
        ));
        assert!(matches!(row.try_get::<u64>("big"), Err(QbError::Decode { .. })));
        assert_eq!(row.try_get::<i64>("whole").unwrap(), 42);
    }

    #[test]
    fn tuple_rows_map_by_position() {
        let (id, name): (i64, String) = FromRow::from_row(&user_row()).unwrap();
        assert_eq!((id, name.as_str()), (7, "ladina"));
    }

    #[test]
    fn json_shape_keeps_column_names() {
        let json = serde_json::Value::from_row(&user_row()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "7", "name": "ladina", "score": 9.5, "deleted_at": null})
        );
    }

    #[test]
    fn positional_shape_drops_names() {
        let values = Vec::<Value>::from_row(&user_row()).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[1], Value::Text("ladina".into()));
    }
}
