//! Terminal operations against an in-memory recording driver.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tableqb::{
    Database, Direction, Driver, Escaper, Format, MySqlEscaper, QbConfig, QbError, QbResult,
    QueryBuilder, Row, Value,
};

#[derive(Debug)]
struct Offline;

impl std::fmt::Display for Offline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("server has gone away")
    }
}

impl std::error::Error for Offline {}

/// Records every statement and answers queries from a queue of canned results.
#[derive(Default)]
struct RecordingDriver {
    statements: Mutex<Vec<String>>,
    results: Mutex<VecDeque<Vec<Row>>>,
    affected: u64,
    fail: bool,
}

impl RecordingDriver {
    fn returning(results: Vec<Vec<Row>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) -> QbResult<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        if self.fail {
            return Err(QbError::driver(Offline));
        }
        Ok(())
    }
}

impl Escaper for RecordingDriver {
    fn quote_str(&self, s: &str) -> String {
        MySqlEscaper.quote_str(s)
    }

    fn escape_like(&self, s: &str) -> String {
        MySqlEscaper.escape_like(s)
    }
}

impl Driver for RecordingDriver {
    async fn query(&self, sql: &str) -> QbResult<Vec<Row>> {
        self.record(sql)?;
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn execute(&self, sql: &str) -> QbResult<u64> {
        self.record(sql)?;
        Ok(self.affected)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn user(id: i64, name: &str) -> Row {
    Row::new().with("id", id).with("name", name)
}

#[tokio::test]
async fn get_runs_select_and_resets() {
    init_tracing();
    let driver = RecordingDriver::returning(vec![vec![user(1, "ladina"), user(2, "john")]]);
    let mut qb = QueryBuilder::new("users", &driver);

    let rows: Vec<(i64, String)> = qb
        .select("id, name")
        .where_("active", 1)
        .order_by("name", Direction::Asc)
        .get()
        .await
        .unwrap();

    assert_eq!(rows, vec![(1, "ladina".to_string()), (2, "john".to_string())]);
    assert_eq!(
        driver.statements(),
        vec!["select id, name from users where active = 1 order by name asc"]
    );
    assert!(qb.state().where_tree().is_empty());
    assert!(qb.state().select_columns().is_empty());
    assert!(qb.state().order_specs().is_empty());
    assert_eq!(qb.table(), "users");
}

#[tokio::test]
async fn builder_is_reusable_after_terminal_call() {
    let driver = RecordingDriver::default();
    let mut qb = QueryBuilder::new("users", &driver);

    qb.where_("id", 1).get::<Row>().await.unwrap();
    qb.where_("id", 2).get::<Row>().await.unwrap();

    assert_eq!(
        driver.statements(),
        vec![
            "select * from users where id = 1",
            "select * from users where id = 2",
        ]
    );
}

#[tokio::test]
async fn one_applies_limit_and_maps_first_row() {
    let driver = RecordingDriver::returning(vec![vec![user(7, "ladina")]]);
    let mut qb = QueryBuilder::new("users", &driver);

    let row = qb
        .where_("name", "ladina")
        .one::<serde_json::Value>()
        .await
        .unwrap();

    assert_eq!(row, Some(serde_json::json!({"id": 7, "name": "ladina"})));
    assert_eq!(
        driver.statements(),
        vec!["select * from users where name = 'ladina' limit 0, 1"]
    );
    assert_eq!(qb.state().limit(), None);
}

#[tokio::test]
async fn one_without_rows_is_none() {
    let driver = RecordingDriver::default();
    let mut qb = QueryBuilder::new("users", &driver);
    assert_eq!(qb.where_("id", 404).one::<Row>().await.unwrap(), None);
}

#[tokio::test]
async fn scalar_returns_first_column() {
    let driver =
        RecordingDriver::returning(vec![vec![Row::new().with("total", "12").with("x", 1)]]);
    let mut qb = QueryBuilder::new("users", &driver);

    let total = qb.select_count("", Some("total")).scalar().await.unwrap();

    assert_eq!(total, Some(Value::Text("12".into())));
    assert_eq!(
        driver.statements(),
        vec!["select count(*) as total from users limit 0, 1"]
    );
}

#[tokio::test]
async fn update_renders_pending_values() {
    let driver = RecordingDriver {
        affected: 1,
        ..RecordingDriver::default()
    };
    let mut qb = QueryBuilder::new("phpunit", &driver);

    let affected = qb
        .set("foo", "bar")
        .set("bar", "foo")
        .where_("id", 1)
        .limit(1)
        .update()
        .await
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        driver.statements(),
        vec!["update phpunit set foo = 'bar', bar = 'foo' where id = 1 limit 0, 1"]
    );
    assert!(qb.state().pending_values().is_empty());
}

#[tokio::test]
async fn update_without_values_fails_before_driver() {
    let driver = RecordingDriver::default();
    let mut qb = QueryBuilder::new("phpunit", &driver);

    let err = qb.where_("id", 1).update().await.unwrap_err();

    assert!(matches!(err, QbError::Validation(_)));
    assert!(driver.statements().is_empty());
    assert!(qb.state().where_tree().is_empty());
}

#[tokio::test]
async fn delete_renders_where_and_limit() {
    let driver = RecordingDriver::default();
    let mut qb = QueryBuilder::new("phpunit", &driver);

    qb.where_("id", 1).limit(1).delete().await.unwrap();

    assert_eq!(
        driver.statements(),
        vec!["delete from phpunit where id = 1 limit 0, 1"]
    );
}

#[tokio::test]
async fn truncate_and_raw_bypass_translation() {
    let driver = RecordingDriver::default();
    let mut qb = QueryBuilder::new("phpunit", &driver);
    qb.where_("id", 1);

    qb.truncate().await.unwrap();
    qb.raw_query("optimize table phpunit").await.unwrap();

    assert_eq!(
        driver.statements(),
        vec!["truncate table phpunit", "optimize table phpunit"]
    );
    // Neither call consumes accumulated clauses.
    assert_eq!(qb.state().where_tree().len(), 1);
}

#[tokio::test]
async fn found_rows_follow_up_query() {
    let driver = RecordingDriver::returning(vec![
        vec![user(1, "a")],
        vec![Row::new().with("FOUND_ROWS()", "42")],
    ]);
    let mut qb = QueryBuilder::new("users", &driver);

    let rows = qb.found_rows(true).limit(1).get::<Row>().await.unwrap();
    let total = qb.found_rows_count().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(total, 42);
    assert_eq!(
        driver.statements(),
        vec![
            "select SQL_CALC_FOUND_ROWS * from users limit 0, 1",
            "SELECT FOUND_ROWS()",
        ]
    );
}

#[tokio::test]
async fn found_rows_without_result_is_not_found() {
    let driver = RecordingDriver::default();
    let qb = QueryBuilder::new("users", &driver);
    assert!(qb.found_rows_count().await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn insert_uses_driver_primitive() {
    let driver = RecordingDriver::default();
    let qb = QueryBuilder::new("users", &driver);

    qb.insert([("name", Value::from("o'neil")), ("age", Value::from(30))])
        .await
        .unwrap();

    assert_eq!(
        driver.statements(),
        vec![r"insert into users (name, age) values ('o\'neil', 30)"]
    );
}

#[tokio::test]
async fn insert_formatted_coerces_values() {
    let driver = RecordingDriver::default();
    let qb = QueryBuilder::new("users", &driver);

    qb.insert_formatted(
        [("age", "30"), ("score", "1.5"), ("name", "x")],
        &[Format::Int, Format::Float],
    )
    .await
    .unwrap();

    assert_eq!(
        driver.statements(),
        vec!["insert into users (age, score, name) values (30, 1.5, 'x')"]
    );
}

#[tokio::test]
async fn driver_errors_pass_through_and_still_reset() {
    let driver = RecordingDriver::failing();
    let mut qb = QueryBuilder::new("users", &driver);

    let err = qb.where_("id", 1).get::<Row>().await.unwrap_err();

    assert!(err.is_driver());
    assert!(err.driver_error::<Offline>().is_some());
    assert!(qb.state().where_tree().is_empty());
}

#[tokio::test]
async fn database_hands_out_independent_builders() {
    let driver = Arc::new(RecordingDriver::default());
    let config = QbConfig::new()
        .with_default_page_size(10)
        .disable_sql_logging();
    let db = Database::from_arc(Arc::clone(&driver)).with_config(config);

    let mut users = db.table("users");
    users.where_("id", 1);
    let mut posts = db.table("posts");
    posts.paginate(1).get::<Row>().await.unwrap();
    users.get::<Row>().await.unwrap();

    assert_eq!(
        driver.statements(),
        vec![
            "select * from posts limit 10, 10",
            "select * from users where id = 1",
        ]
    );
}
