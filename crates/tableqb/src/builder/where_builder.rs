//! WHERE clause methods.
//!
//! Conditions are appended to the WHERE tree in call order. The first node of
//! the tree always takes the [`Connector::Where`] position, whatever connector
//! the caller asked for, so a query can start with `or_where` and still render
//! `where ...`.

use super::QueryBuilder;
use crate::driver::Driver;
use crate::error::QbResult;
use crate::input::Cond;
use crate::state::{Connector, WhereNode};
use crate::value::{Operand, Value};

impl<D: Driver> QueryBuilder<D> {
    /// Add `column = value`, joined with `and`.
    pub fn where_(&mut self, column: &str, value: impl Into<Operand>) -> &mut Self {
        self.push_condition(Connector::And, Cond::eq(column, value))
    }

    /// Add `column <op> value`, joined with `and`.
    ///
    /// ```ignore
    /// qb.where_op("age", ">", 18);
    /// qb.where_op("name", "in", ["charles", "john", "jeffry"]);
    /// ```
    pub fn where_op(&mut self, column: &str, op: &str, value: impl Into<Operand>) -> &mut Self {
        self.push_condition(Connector::And, Cond::new(column, op, value))
    }

    /// Add `column = value`, joined with `and`.
    pub fn and_where(&mut self, column: &str, value: impl Into<Operand>) -> &mut Self {
        self.where_(column, value)
    }

    /// Add `column <op> value`, joined with `and`.
    pub fn and_where_op(&mut self, column: &str, op: &str, value: impl Into<Operand>) -> &mut Self {
        self.where_op(column, op, value)
    }

    /// Add `column = value`, joined with `or`.
    pub fn or_where(&mut self, column: &str, value: impl Into<Operand>) -> &mut Self {
        self.push_condition(Connector::Or, Cond::eq(column, value))
    }

    /// Add `column <op> value`, joined with `or`.
    pub fn or_where_op(&mut self, column: &str, op: &str, value: impl Into<Operand>) -> &mut Self {
        self.push_condition(Connector::Or, Cond::new(column, op, value))
    }

    /// Add a condition with a connector given as text (`and`, `or` or `where`).
    ///
    /// Fails with [`QbError::InvalidConnector`](crate::QbError::InvalidConnector)
    /// for any other connector, leaving the builder untouched.
    pub fn where_with(&mut self, connector: &str, cond: impl Into<Cond>) -> QbResult<&mut Self> {
        let connector = connector.parse::<Connector>()?;
        Ok(self.push_condition(connector, cond.into()))
    }

    /// Add a parenthesized group of conditions joined with `and`.
    ///
    /// ```ignore
    /// qb.where_group([("a", ">", 10), ("a", "<", 20)]); // where ( a > 10 and a < 20 )
    /// ```
    pub fn where_group<C, I>(&mut self, conds: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cond>,
    {
        self.where_nested(Connector::And, Connector::And, conds)
    }

    /// Add a parenthesized group of conditions joined with `or`, itself joined with `or`.
    ///
    /// ```ignore
    /// qb.or_where_group([("a", "b"), ("c", "d")]); // where ( a = 'b' or c = 'd' )
    /// ```
    pub fn or_where_group<C, I>(&mut self, conds: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cond>,
    {
        self.where_nested(Connector::Or, Connector::Or, conds)
    }

    /// Add a parenthesized group.
    ///
    /// `connector` joins the group to the preceding nodes, `joiner` joins the
    /// conditions inside it. An empty `conds` adds nothing.
    pub fn where_nested<C, I>(
        &mut self,
        connector: Connector,
        joiner: Connector,
        conds: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cond>,
    {
        let joiner = match joiner {
            Connector::Where => Connector::And,
            other => other,
        };
        let children: Vec<WhereNode> = conds
            .into_iter()
            .enumerate()
            .map(|(i, cond)| {
                let cond = cond.into();
                WhereNode::Condition {
                    connector: if i == 0 { Connector::Where } else { joiner },
                    column: cond.column,
                    operator: cond.operator,
                    value: cond.value,
                }
            })
            .collect();
        if children.is_empty() {
            return self;
        }

        let is_first = self.state.where_tree.is_empty();
        let connector = self.resolve_connector(connector);
        self.state.where_tree.push(WhereNode::Group {
            connector,
            children,
            is_first,
        });
        self
    }

    /// Add `column in (..)`. An empty list adds nothing.
    pub fn where_in<T, I>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return self;
        }
        self.where_op(column, "in", Operand::List(values))
    }

    /// Add `column like '%value%'` with LIKE wildcards in `value` escaped.
    pub fn where_like(&mut self, column: &str, value: &str) -> &mut Self {
        let pattern = format!("%{}%", self.driver.escape_like(value));
        self.where_op(column, "like", pattern)
    }

    fn resolve_connector(&self, requested: Connector) -> Connector {
        if self.state.where_tree.is_empty() {
            Connector::Where
        } else if requested == Connector::Where {
            Connector::And
        } else {
            requested
        }
    }

    fn push_condition(&mut self, connector: Connector, cond: Cond) -> &mut Self {
        let connector = self.resolve_connector(connector);
        self.state.where_tree.push(WhereNode::Condition {
            connector,
            column: cond.column,
            operator: cond.operator,
            // `Cond` constructors already deduplicate; values built by hand may not be.
            value: cond.value.dedup(),
        });
        self
    }
}
