//! Scalar values and WHERE operands.
//!
//! Every value that ends up inside generated SQL goes through [`Value`]. The
//! variant decides how the escaper renders it: numbers unquoted, text quoted,
//! `Raw` verbatim.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// A scalar that can be rendered as a SQL literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Rendered as `1` / `0`.
    Bool(bool),
    /// Unquoted integer literal.
    Int(i64),
    /// Unquoted decimal literal.
    Float(f64),
    /// Quoted and escaped string literal.
    Text(String),
    /// Passed through unescaped. The caller is responsible for its safety.
    Raw(String),
}

impl Value {
    /// Create a raw SQL fragment that is inserted verbatim.
    pub fn raw(sql: impl Into<String>) -> Self {
        Value::Raw(sql.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view, parsing numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Float(f) if f.fract() == 0.0 => float_to_i64(*f),
            Value::Text(s) | Value::Raw(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Float view, parsing numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(v) => Some(*v as f64),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            Value::Text(s) | Value::Raw(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrow the text of `Text` / `Raw` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// Plain text form, without any quoting. `Null` has none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) | Value::Raw(s) => Some(s.clone()),
        }
    }

    /// Coerce this value to the given column format.
    ///
    /// `Null` and `Raw` are left alone. Text that does not parse as a number
    /// becomes `0`, matching how MySQL casts it. A number with no `i64`
    /// representation (NaN, infinite, or out of range) becomes `Null`.
    pub fn coerce(self, format: Format) -> Value {
        match (format, self) {
            (_, v @ (Value::Null | Value::Raw(_))) => v,
            (Format::Int, v) => match (v.as_i64(), v.as_f64()) {
                (Some(n), _) => Value::Int(n),
                (None, Some(f)) => float_to_i64(f.trunc()).map_or(Value::Null, Value::Int),
                (None, None) => Value::Int(0),
            },
            (Format::Float, v) => Value::Float(v.as_f64().unwrap_or(0.0)),
            (Format::Str, Value::Text(s)) => Value::Text(s),
            (Format::Str, v) => Value::Text(v.to_text().unwrap_or_default()),
        }
    }
}

/// Exact conversion of an integral float; `None` outside the `i64` range.
fn float_to_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// Column format applied to insert data before it reaches the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `%d`
    Int,
    /// `%f`
    Float,
    /// `%s`
    Str,
}

macro_rules! value_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! value_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                // Out of i64 range: keep the digits as a raw literal.
                fn from(v: $t) -> Self {
                    i64::try_from(v)
                        .map(Value::Int)
                        .unwrap_or_else(|_| Value::Raw(v.to_string()))
                }
            }
        )*
    };
}

value_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Text(v.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Text(v.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::from(v.naive_utc())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Text(v.hyphenated().to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Right-hand side of a WHERE condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Single value: `col = 'x'`
    Scalar(Value),
    /// Value list: `col in (1, 2)`
    List(Vec<Value>),
}

impl Operand {
    /// Drop repeated list values, keeping the first occurrence of each.
    pub(crate) fn dedup(self) -> Self {
        match self {
            Operand::List(values) => {
                let mut unique: Vec<Value> = Vec::with_capacity(values.len());
                for v in values {
                    if !unique.contains(&v) {
                        unique.push(v);
                    }
                }
                Operand::List(unique)
            }
            scalar => scalar,
        }
    }
}

macro_rules! operand_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Scalar(v.into())
                }
            }
        )*
    };
}

operand_from_scalar!(
    Value, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, i128, u128, f32, f64, bool, &str,
    String, &String, char, NaiveDate, NaiveDateTime, uuid::Uuid
);

impl<Tz: TimeZone> From<DateTime<Tz>> for Operand {
    fn from(v: DateTime<Tz>) -> Self {
        Operand::Scalar(v.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Scalar(v.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(v: Vec<T>) -> Self {
        Operand::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Operand {
    fn from(v: [T; N]) -> Self {
        Operand::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Operand {
    fn from(v: &[T]) -> Self {
        Operand::List(v.iter().cloned().map(Into::into).collect())
    }
}
