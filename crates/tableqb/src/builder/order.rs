use super::QueryBuilder;
use crate::driver::Driver;
use crate::input::ColumnList;
use crate::state::Direction;

impl<D: Driver> QueryBuilder<D> {
    /// Add ORDER BY columns sharing one direction.
    ///
    /// A column ordered again keeps its position and takes the new direction.
    /// A `None` direction emits the key alone, for raw expressions.
    ///
    /// ```ignore
    /// qb.order_by("created_at", Direction::Asc);
    /// qb.order_by("firstname, lastname", Direction::Desc);
    /// qb.order_by("firstname <> nick", None);
    /// ```
    pub fn order_by(
        &mut self,
        columns: impl Into<ColumnList>,
        direction: impl Into<Option<Direction>>,
    ) -> &mut Self {
        let direction = direction.into();
        for column in columns.into().into_inner() {
            self.state.put_order(column, direction);
        }
        self
    }

    /// Add ORDER BY columns each with their own direction.
    pub fn order_by_each<K, I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Direction)>,
        K: Into<String>,
    {
        for (column, direction) in columns {
            self.state.put_order(column.into(), Some(direction));
        }
        self
    }

    /// Add a raw ORDER BY expression, rendered without a direction.
    pub fn order_by_raw(&mut self, expr: &str) -> &mut Self {
        let expr = expr.trim();
        if !expr.is_empty() {
            self.state.put_order(expr.to_string(), None);
        }
        self
    }
}
