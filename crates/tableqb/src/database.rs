//! Driver handle that hands out table-bound builders.

use crate::builder::QueryBuilder;
use crate::config::QbConfig;
use crate::driver::Driver;
use std::sync::Arc;

/// Shared driver plus configuration.
///
/// Every call to [`Database::table`] returns a fresh builder; builders for the
/// same table do not share clause state.
///
/// ```ignore
/// let db = Database::new(driver);
/// let users = db.table("users").where_("status", "active").get::<Row>().await?;
/// ```
pub struct Database<D> {
    driver: Arc<D>,
    config: QbConfig,
}

impl<D: Driver> Database<D> {
    pub fn new(driver: D) -> Self {
        Self::from_arc(Arc::new(driver))
    }

    /// Share an existing driver handle.
    pub fn from_arc(driver: Arc<D>) -> Self {
        Self {
            driver,
            config: QbConfig::default(),
        }
    }

    pub fn with_config(mut self, config: QbConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &QbConfig {
        &self.config
    }

    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    /// A new builder bound to `table`.
    pub fn table(&self, table: &str) -> QueryBuilder<Arc<D>> {
        QueryBuilder::with_config(table, Arc::clone(&self.driver), self.config.clone())
    }
}

impl<D> Clone for Database<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            config: self.config.clone(),
        }
    }
}
