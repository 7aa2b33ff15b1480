//! Fluent, table-bound query builder.
//!
//! A [`QueryBuilder`] accumulates clauses for one table and renders them as
//! MySQL text with every value escaped by the injected [`Driver`]. Terminal
//! operations (`get`, `one`, `update`, `delete`, `take_*_sql`) consume the
//! accumulated state and leave the builder empty, ready for the next query on
//! the same table.
//!
//! ```ignore
//! let rows = builder
//!     .select("id, name")
//!     .where_("status", "active")
//!     .or_where_op("age", ">", 18)
//!     .order_by("name", Direction::Asc)
//!     .limit(10)
//!     .get::<Row>()
//!     .await?;
//! ```

mod exec;
mod order;
mod select;
mod where_builder;

pub use exec::{FOUND_ROWS_SQL, StatementKind};

use crate::config::QbConfig;
use crate::driver::Driver;
use crate::state::QueryState;
use crate::translate;
use crate::value::Value;

/// Query builder bound to a single table.
pub struct QueryBuilder<D> {
    state: QueryState,
    driver: D,
    config: QbConfig,
}

impl<D: Driver> QueryBuilder<D> {
    /// Create a builder for `table` using the default configuration.
    pub fn new(table: &str, driver: D) -> Self {
        Self::with_config(table, driver, QbConfig::default())
    }

    pub fn with_config(table: &str, driver: D, config: QbConfig) -> Self {
        Self {
            state: QueryState::new(table),
            driver,
            config,
        }
    }

    pub fn table(&self) -> &str {
        self.state.table()
    }

    /// Current accumulated state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &QbConfig {
        &self.config
    }

    /// Discard every accumulated clause.
    pub fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self
    }

    // ==================== Limit / Pagination ====================

    /// Set `limit <count>` with offset 0.
    pub fn limit(&mut self, count: i64) -> &mut Self {
        self.limit_offset(count, 0)
    }

    /// Set `limit <offset>, <count>`.
    ///
    /// Ignored unless `count > 0` and `offset >= 0`; the previous limit is kept.
    pub fn limit_offset(&mut self, count: i64, offset: i64) -> &mut Self {
        if let (Ok(count @ 1..), Ok(offset)) = (u64::try_from(count), u64::try_from(offset)) {
            self.state.limit = Some((count, offset));
        }
        self
    }

    /// Zero-indexed pagination: `page(2, 10)` is `limit_offset(10, 20)`.
    pub fn page(&mut self, page: i64, size: i64) -> &mut Self {
        match size.checked_mul(page) {
            Some(offset) => self.limit_offset(size, offset),
            None => self,
        }
    }

    /// Zero-indexed pagination with the configured default page size.
    pub fn paginate(&mut self, page: i64) -> &mut Self {
        self.page(page, self.config.default_page_size)
    }

    // ==================== Values (UPDATE) ====================

    /// Set a column value for `update`. Setting the same column again overwrites it.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self
            .state
            .pending_values
            .iter_mut()
            .find(|(c, _)| c == column)
        {
            Some(entry) => entry.1 = value,
            None => self.state.pending_values.push((column.to_string(), value)),
        }
        self
    }

    /// Merge several column values; columns that are already set keep their value.
    pub fn set_many<K, V, I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (column, value) in values {
            let column = column.into();
            if !self.state.pending_values.iter().any(|(c, _)| *c == column) {
                self.state.pending_values.push((column, value.into()));
            }
        }
        self
    }

    // ==================== Translation ====================

    /// Render the SELECT statement without consuming the state.
    pub fn to_select_sql(&self) -> String {
        translate::select(&self.state, &self.driver)
    }

    /// Render the UPDATE statement without consuming the state.
    pub fn to_update_sql(&self) -> String {
        translate::update(&self.state, &self.driver)
    }

    /// Render the DELETE statement without consuming the state.
    pub fn to_delete_sql(&self) -> String {
        translate::delete(&self.state, &self.driver)
    }

    /// Render the SELECT statement and reset the builder.
    pub fn take_select_sql(&mut self) -> String {
        let sql = self.to_select_sql();
        self.state.reset();
        sql
    }

    /// Render the UPDATE statement and reset the builder.
    pub fn take_update_sql(&mut self) -> String {
        let sql = self.to_update_sql();
        self.state.reset();
        sql
    }

    /// Render the DELETE statement and reset the builder.
    pub fn take_delete_sql(&mut self) -> String {
        let sql = self.to_delete_sql();
        self.state.reset();
        sql
    }
}

impl<D> std::fmt::Debug for QueryBuilder<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
