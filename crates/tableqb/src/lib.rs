//! # tableqb
//!
//! A fluent, table-bound MySQL query builder.
//!
//! ## Features
//!
//! - **One builder per table**: clauses accumulate on a [`QueryBuilder`] and are
//!   cleared by every terminal operation, so the builder can be reused
//! - **Escaped literals**: every value goes through the driver's [`Escaper`]
//! - **Nested WHERE groups**: `where a = 1 or ( b > 2 and b < 5 )`
//! - **Injected driver**: no global connection; the [`Driver`] is passed in at construction
//! - **Pure translation**: `to_*_sql` renders SQL without touching the database
//!
//! ```ignore
//! use tableqb::{Database, Direction, Row};
//!
//! let db = Database::new(driver);
//!
//! // SELECT
//! let users = db
//!     .table("users")
//!     .select("id, name")
//!     .where_("status", "active")
//!     .where_in("role", ["admin", "editor"])
//!     .order_by("name", Direction::Asc)
//!     .page(0, 20)
//!     .get::<Row>()
//!     .await?;
//!
//! // UPDATE
//! db.table("users")
//!     .set("status", "inactive")
//!     .where_("id", 42)
//!     .update()
//!     .await?;
//!
//! // DELETE
//! db.table("users").where_("id", 42).limit(1).delete().await?;
//! ```

pub mod builder;
pub mod config;
pub mod database;
pub mod driver;
pub mod error;
pub mod escape;
pub mod input;
pub mod row;
pub mod state;
pub mod translate;
pub mod value;

pub use builder::{FOUND_ROWS_SQL, QueryBuilder, StatementKind};
pub use config::{DEFAULT_PAGE_SIZE, QbConfig};
pub use database::Database;
pub use driver::{Driver, render_insert};
pub use error::{DriverError, QbError, QbResult};
pub use escape::{Escaper, MySqlEscaper};
pub use input::{ColumnList, Cond, SelectInput};
pub use row::{FromRow, FromValue, Row};
pub use state::{ColumnSpec, Connector, Direction, QueryState, WhereNode};
pub use value::{Format, Operand, Value};

/// Create a builder bound to `table`.
///
/// # Example
/// ```ignore
/// let mut qb = tableqb::table("users", &driver);
/// qb.where_("id", 1);
/// ```
pub fn table<D: Driver>(table: &str, driver: D) -> QueryBuilder<D> {
    QueryBuilder::new(table, driver)
}
