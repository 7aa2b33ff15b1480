//! Value escaping.
//!
//! All literal interpolation in generated SQL goes through an [`Escaper`].
//! Drivers own the quoting rules; [`MySqlEscaper`] implements the rules of
//! `mysql_real_escape_string` for connections using a backslash-escaping
//! character set.

use crate::value::Value;
use std::sync::Arc;

/// Quoting primitives supplied by the database driver.
pub trait Escaper {
    /// Return `s` as a complete, quoted string literal.
    fn quote_str(&self, s: &str) -> String;

    /// Escape LIKE wildcards in `s`.
    ///
    /// The result is a pattern body, not a literal: it still has to be quoted
    /// with [`Escaper::quote_str`] before interpolation.
    fn escape_like(&self, s: &str) -> String;

    /// Render a scalar as a SQL literal.
    fn escape_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(f) if f.is_finite() => f.to_string(),
            Value::Float(_) => "NULL".to_string(),
            Value::Text(s) => self.quote_str(s),
            Value::Raw(s) => s.clone(),
        }
    }

    /// Render each value as a SQL literal, preserving order.
    fn escape_values(&self, values: &[Value]) -> Vec<String> {
        values.iter().map(|v| self.escape_value(v)).collect()
    }
}

impl<T: Escaper + ?Sized> Escaper for &T {
    fn quote_str(&self, s: &str) -> String {
        (**self).quote_str(s)
    }

    fn escape_like(&self, s: &str) -> String {
        (**self).escape_like(s)
    }

    fn escape_value(&self, value: &Value) -> String {
        (**self).escape_value(value)
    }
}

impl<T: Escaper + ?Sized> Escaper for Arc<T> {
    fn quote_str(&self, s: &str) -> String {
        (**self).quote_str(s)
    }

    fn escape_like(&self, s: &str) -> String {
        (**self).escape_like(s)
    }

    fn escape_value(&self, value: &Value) -> String {
        (**self).escape_value(value)
    }
}

/// MySQL string escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn quote_str(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    fn escape_like(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if matches!(c, '\\' | '%' | '_') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}
