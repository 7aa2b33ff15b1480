use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tableqb::{
    Cond, Connector, Direction, Driver, Escaper, MySqlEscaper, QbResult, QueryBuilder, Row,
};

/// Driver that never runs anything; only the escaper is exercised.
struct NullDriver;

impl Escaper for NullDriver {
    fn quote_str(&self, s: &str) -> String {
        MySqlEscaper.quote_str(s)
    }

    fn escape_like(&self, s: &str) -> String {
        MySqlEscaper.escape_like(s)
    }
}

impl Driver for NullDriver {
    async fn query(&self, _sql: &str) -> QbResult<Vec<Row>> {
        Ok(Vec::new())
    }

    async fn execute(&self, _sql: &str) -> QbResult<u64> {
        Ok(0)
    }
}

/// select * from t where col0 = 'v0' and col1 = 'v1' ... or ( ... ) order by id desc limit 0, 10
fn build_select(n: usize) -> QueryBuilder<NullDriver> {
    let mut qb = QueryBuilder::new("t", NullDriver);
    for i in 0..n {
        qb.and_where(&format!("col{i}"), format!("v{i}"));
    }
    let group: Vec<Cond> = (0..n)
        .map(|i| Cond::from((format!("g{i}"), ">", i as i64)))
        .collect();
    qb.where_nested(Connector::Or, Connector::And, group)
        .order_by("id", Direction::Desc)
        .limit(10);
    qb
}

fn bench_to_select_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate/to_select_sql");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.to_select_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_take(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate/build_and_take");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut qb = build_select(n);
                black_box(qb.take_select_sql());
            });
        });
    }

    group.finish();
}

fn bench_where_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate/where_in");

    for n in [10, 100, 1000] {
        let values: Vec<i64> = (0..n).map(|i| i % (n / 2)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut qb = QueryBuilder::new("t", NullDriver);
                qb.where_in("id", values.clone());
                black_box(qb.take_select_sql());
            });
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate/escape");

    for len in [16, 256, 4096] {
        let input: String = "ab'c\\d\n".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| black_box(MySqlEscaper.quote_str(input)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_select_sql,
    bench_build_and_take,
    bench_where_in,
    bench_escape
);
criterion_main!(benches);
