use super::QueryBuilder;
use crate::driver::Driver;
use crate::input::{ColumnList, SelectInput};
use crate::state::ColumnSpec;

impl<D: Driver> QueryBuilder<D> {
    /// Append SELECT columns. Calls are cumulative.
    ///
    /// ```ignore
    /// qb.select("id, foo as f");               // comma separated
    /// qb.select(["id", "foo"]);                // list
    /// qb.select([("id", "d"), ("foo", "f")]);  // expr => alias
    /// ```
    pub fn select(&mut self, fields: impl Into<SelectInput>) -> &mut Self {
        match fields.into() {
            SelectInput::All => {}
            SelectInput::Columns(cols) => self
                .state
                .select_columns
                .extend(cols.into_inner().into_iter().map(ColumnSpec::Raw)),
            SelectInput::Aliased(pairs) => self.state.select_columns.extend(
                pairs
                    .into_iter()
                    .map(|(expr, alias)| ColumnSpec::Aliased { expr, alias }),
            ),
        }
        self
    }

    /// Append `count(field)`. An empty `field` counts `*`.
    pub fn select_count(&mut self, field: &str, alias: Option<&str>) -> &mut Self {
        let field = if field.trim().is_empty() { "*" } else { field };
        self.select_func("count", field, alias)
    }

    /// Append `sum(field)`.
    pub fn select_sum(&mut self, field: &str, alias: Option<&str>) -> &mut Self {
        self.select_func("sum", field, alias)
    }

    /// Append `avg(field)`.
    pub fn select_avg(&mut self, field: &str, alias: Option<&str>) -> &mut Self {
        self.select_func("avg", field, alias)
    }

    /// Append `min(field)`.
    pub fn select_min(&mut self, field: &str, alias: Option<&str>) -> &mut Self {
        self.select_func("min", field, alias)
    }

    /// Append `max(field)`.
    pub fn select_max(&mut self, field: &str, alias: Option<&str>) -> &mut Self {
        self.select_func("max", field, alias)
    }

    /// Append `func(field)[ as alias]`.
    pub fn select_func(&mut self, func: &str, field: &str, alias: Option<&str>) -> &mut Self {
        self.state.select_columns.push(ColumnSpec::Func {
            func: func.to_string(),
            field: field.to_string(),
            alias: alias.map(str::to_string),
        });
        self
    }

    /// Toggle `select distinct`.
    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.state.distinct = distinct;
        self
    }

    /// Toggle `SQL_CALC_FOUND_ROWS`, see [`QueryBuilder::found_rows_count`].
    pub fn found_rows(&mut self, found_rows: bool) -> &mut Self {
        self.state.found_rows = found_rows;
        self
    }

    /// Append GROUP BY columns; columns already grouped are skipped.
    pub fn group_by(&mut self, columns: impl Into<ColumnList>) -> &mut Self {
        for column in columns.into().into_inner() {
            if !self.state.group_by.contains(&column) {
                self.state.group_by.push(column);
            }
        }
        self
    }
}
