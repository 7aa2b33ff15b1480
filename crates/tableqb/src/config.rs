use tracing::Level;

/// Page size used by `paginate` when no explicit size is given.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Builder and executor configuration.
#[derive(Debug, Clone)]
pub struct QbConfig {
    /// Page size for [`QueryBuilder::paginate`](crate::QueryBuilder::paginate).
    pub default_page_size: i64,
    /// Whether executed SQL is emitted as `tracing` events.
    pub log_sql: bool,
    /// Level of the emitted SQL events.
    pub sql_log_level: Level,
    /// Truncate logged SQL (in bytes, at a char boundary). `None` means no truncation.
    pub max_logged_sql_len: Option<usize>,
}

impl Default for QbConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            log_sql: true,
            sql_log_level: Level::DEBUG,
            max_logged_sql_len: Some(200),
        }
    }
}

impl QbConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default page size. Non-positive sizes are ignored.
    pub fn with_default_page_size(mut self, size: i64) -> Self {
        if size > 0 {
            self.default_page_size = size;
        }
        self
    }

    /// Override the level SQL events are emitted at.
    pub fn with_sql_log_level(mut self, level: Level) -> Self {
        self.sql_log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_logged_sql_len(mut self, len: usize) -> Self {
        self.max_logged_sql_len = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_len = None;
        self
    }

    /// Stop emitting SQL events.
    pub fn disable_sql_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }
}
