//! Terminal operations.
//!
//! Each operation renders its SQL, resets the builder, then makes exactly one
//! driver call. The reset happens before the await, so a failed or dropped
//! call still leaves the builder empty.

use super::QueryBuilder;
use crate::driver::{Driver, render_insert};
use crate::error::{QbError, QbResult};
use crate::row::{FromRow, Row};
use crate::value::{Format, Value};
use tracing::Level;

/// Statement issued by [`QueryBuilder::found_rows_count`].
pub const FOUND_ROWS_SQL: &str = "SELECT FOUND_ROWS()";

/// What a terminal operation sends to the driver, for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    Raw,
    FoundRows,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Truncate => "truncate",
            StatementKind::Raw => "raw",
            StatementKind::FoundRows => "found_rows",
        }
    }
}

impl<D: Driver> QueryBuilder<D> {
    /// Run the accumulated SELECT and map every row to `T`.
    pub async fn get<T: FromRow>(&mut self) -> QbResult<Vec<T>> {
        let sql = self.take_select_sql();
        let rows = self.run_query(StatementKind::Select, &sql).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Run the accumulated SELECT with `limit 1` and map the row, if any.
    pub async fn one<T: FromRow>(&mut self) -> QbResult<Option<T>> {
        self.limit(1);
        let sql = self.take_select_sql();
        self.log_sql(StatementKind::Select, &sql);
        let row = self
            .driver
            .query_opt(&sql)
            .await
            .inspect_err(|e| self.log_failure(StatementKind::Select, e))?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// First column of [`QueryBuilder::one`].
    pub async fn scalar(&mut self) -> QbResult<Option<Value>> {
        let row = self.one::<Row>().await?;
        Ok(row.and_then(|r| r.into_values().into_iter().next()))
    }

    /// Insert one row through the driver's insert primitive.
    ///
    /// Accumulated clauses are neither used nor reset.
    pub async fn insert<K, V, I>(&self, data: I) -> QbResult<u64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let data: Vec<(String, Value)> = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.run_insert(data).await
    }

    /// Insert one row, coercing each value with the format at the same position.
    ///
    /// Columns past the end of `formats` are passed through unchanged.
    pub async fn insert_formatted<K, V, I>(&self, data: I, formats: &[Format]) -> QbResult<u64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let data: Vec<(String, Value)> = data
            .into_iter()
            .enumerate()
            .map(|(i, (k, v))| {
                let v = v.into();
                let v = match formats.get(i) {
                    Some(format) => v.coerce(*format),
                    None => v,
                };
                (k.into(), v)
            })
            .collect();
        self.run_insert(data).await
    }

    /// Run the accumulated UPDATE. Returns the affected row count.
    ///
    /// Fails with [`QbError::Validation`] when no value was `set`; the builder is
    /// reset either way.
    pub async fn update(&mut self) -> QbResult<u64> {
        let has_values = !self.state.pending_values.is_empty();
        let sql = self.take_update_sql();
        if !has_values {
            return Err(QbError::validation(format!(
                "update on '{}' has no values to set",
                self.table()
            )));
        }
        self.run_execute(StatementKind::Update, &sql).await
    }

    /// Run the accumulated DELETE. Returns the affected row count.
    pub async fn delete(&mut self) -> QbResult<u64> {
        let sql = self.take_delete_sql();
        self.run_execute(StatementKind::Delete, &sql).await
    }

    /// `truncate table <table>`. Accumulated clauses are ignored.
    pub async fn truncate(&self) -> QbResult<u64> {
        let sql = format!("truncate table {}", self.table());
        self.run_execute(StatementKind::Truncate, &sql).await
    }

    /// Execute `sql` as-is and return the affected row count.
    pub async fn raw_query(&self, sql: &str) -> QbResult<u64> {
        self.run_execute(StatementKind::Raw, sql).await
    }

    /// Run `sql` as-is and return its rows.
    pub async fn raw_select(&self, sql: &str) -> QbResult<Vec<Row>> {
        self.run_query(StatementKind::Raw, sql).await
    }

    /// Total row count of the previous `found_rows(true)` SELECT on this connection.
    pub async fn found_rows_count(&self) -> QbResult<u64> {
        self.log_sql(StatementKind::FoundRows, FOUND_ROWS_SQL);
        let row = self
            .driver
            .query_opt(FOUND_ROWS_SQL)
            .await
            .inspect_err(|e| self.log_failure(StatementKind::FoundRows, e))?
            .ok_or_else(|| QbError::not_found("FOUND_ROWS() returned no row"))?;
        row.try_get_index::<u64>(0)
    }

    // ==================== Driver calls ====================

    async fn run_query(&self, kind: StatementKind, sql: &str) -> QbResult<Vec<Row>> {
        self.log_sql(kind, sql);
        self.driver
            .query(sql)
            .await
            .inspect_err(|e| self.log_failure(kind, e))
    }

    async fn run_execute(&self, kind: StatementKind, sql: &str) -> QbResult<u64> {
        self.log_sql(kind, sql);
        self.driver
            .execute(sql)
            .await
            .inspect_err(|e| self.log_failure(kind, e))
    }

    async fn run_insert(&self, data: Vec<(String, Value)>) -> QbResult<u64> {
        if self.config.log_sql {
            let sql = render_insert(&self.driver, self.table(), &data);
            self.log_sql(StatementKind::Insert, &sql);
        }
        self.driver
            .insert(self.table(), &data)
            .await
            .inspect_err(|e| self.log_failure(StatementKind::Insert, e))
    }

    // ==================== Logging ====================

    fn log_sql(&self, kind: StatementKind, sql: &str) {
        if !self.config.log_sql {
            return;
        }

        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = match self.config.max_logged_sql_len {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        };
        emit_at_level!(
            self.config.sql_log_level,
            target: "tableqb.sql",
            table = %self.table(),
            kind = kind.as_str(),
            sql = %sql,
        );
    }

    fn log_failure(&self, kind: StatementKind, err: &QbError) {
        tracing::warn!(
            target: "tableqb.sql",
            table = %self.table(),
            kind = kind.as_str(),
            error = %err,
            "statement failed"
        );
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(test)]
mod tests {
    use super::truncate_sql_bytes;

    #[test]
    fn truncation_stops_at_char_boundary() {
        assert_eq!(truncate_sql_bytes("select", 10), "select");
        assert_eq!(truncate_sql_bytes("select", 3), "sel");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("aé", 2), "a");
    }
}
