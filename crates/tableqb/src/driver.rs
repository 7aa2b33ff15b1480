//! Database driver abstraction.

use crate::error::QbResult;
use crate::escape::Escaper;
use crate::row::Row;
use crate::value::Value;
use std::sync::Arc;

/// The I/O boundary: executes SQL text and quotes values.
///
/// The builder never talks to a database directly. It renders SQL and hands it
/// to a `Driver` injected at construction, so the same builder code runs
/// against a real connection, a transaction wrapper, or a recording fake.
/// Failures should be wrapped with [`QbError::driver`](crate::QbError::driver)
/// so callers can downcast to the original error.
pub trait Driver: Escaper + Send + Sync {
    /// Execute a query and return all rows.
    fn query(&self, sql: &str) -> impl std::future::Future<Output = QbResult<Vec<Row>>> + Send;

    /// Execute a query and return the first row, if any.
    ///
    /// The default implementation calls [`Driver::query`] and keeps the first row.
    fn query_opt(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = QbResult<Option<Row>>> + Send {
        async move { Ok(self.query(sql).await?.into_iter().next()) }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = QbResult<u64>> + Send;

    /// Insert one row into `table`.
    ///
    /// The default implementation renders `insert into <table> (..) values (..)`
    /// through this driver's escaper and calls [`Driver::execute`].
    fn insert(
        &self,
        table: &str,
        data: &[(String, Value)],
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        let sql = render_insert(self, table, data);
        async move { self.execute(&sql).await }
    }
}

/// Render a single-row INSERT statement.
pub fn render_insert(
    esc: &(impl Escaper + ?Sized),
    table: &str,
    data: &[(String, Value)],
) -> String {
    let columns: Vec<&str> = data.iter().map(|(col, _)| col.as_str()).collect();
    let values: Vec<String> = data.iter().map(|(_, v)| esc.escape_value(v)).collect();
    format!(
        "insert into {} ({}) values ({})",
        table,
        columns.join(", "),
        values.join(", ")
    )
}

impl<T: Driver> Driver for &T {
    fn query(&self, sql: &str) -> impl std::future::Future<Output = QbResult<Vec<Row>>> + Send {
        (**self).query(sql)
    }

    fn query_opt(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = QbResult<Option<Row>>> + Send {
        (**self).query_opt(sql)
    }

    fn execute(&self, sql: &str) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        (**self).execute(sql)
    }

    fn insert(
        &self,
        table: &str,
        data: &[(String, Value)],
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        (**self).insert(table, data)
    }
}

impl<T: Driver> Driver for Arc<T> {
    fn query(&self, sql: &str) -> impl std::future::Future<Output = QbResult<Vec<Row>>> + Send {
        (**self).query(sql)
    }

    fn query_opt(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = QbResult<Option<Row>>> + Send {
        (**self).query_opt(sql)
    }

    fn execute(&self, sql: &str) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        (**self).execute(sql)
    }

    fn insert(
        &self,
        table: &str,
        data: &[(String, Value)],
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        (**self).insert(table, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MySqlEscaper;

    #[test]
    fn insert_renders_escaped_values_in_order() {
        let data = vec![
            ("name".to_string(), Value::from("o'neil")),
            ("age".to_string(), Value::from(30)),
            ("bio".to_string(), Value::Null),
        ];
        assert_eq!(
            render_insert(&MySqlEscaper, "users", &data),
            r"insert into users (name, age, bio) values ('o\'neil', 30, NULL)"
        );
    }
}
