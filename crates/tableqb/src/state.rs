//! Accumulated query state for one table.

use crate::error::QbError;
use crate::value::{Operand, Value};
use std::fmt;
use std::str::FromStr;

/// Boolean keyword placed in front of a WHERE node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Clause-introducing position: the first node at its nesting level.
    Where,
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::Where => "where",
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Connector {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "where" => Ok(Connector::Where),
            "and" => Ok(Connector::And),
            "or" => Ok(Connector::Or),
            other => Err(QbError::InvalidConnector(other.to_string())),
        }
    }
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(QbError::InvalidDirection(s.to_string())),
        }
    }
}

/// One entry of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    /// Column name or arbitrary expression, rendered verbatim.
    Raw(String),
    /// `expr as alias`
    Aliased { expr: String, alias: String },
    /// `func(field)[ as alias]`
    Func {
        func: String,
        field: String,
        alias: Option<String>,
    },
}

/// A node of the WHERE tree.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereNode {
    /// `<connector> <column> <operator> <value>`
    Condition {
        connector: Connector,
        column: String,
        operator: String,
        value: Operand,
    },
    /// Parenthesized sub-tree.
    Group {
        connector: Connector,
        children: Vec<WhereNode>,
        /// Whether this group opened the WHERE clause.
        is_first: bool,
    },
}

impl WhereNode {
    pub fn connector(&self) -> Connector {
        match self {
            WhereNode::Condition { connector, .. } | WhereNode::Group { connector, .. } => {
                *connector
            }
        }
    }
}

/// Everything a builder has accumulated since its last terminal operation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    table: String,
    pub(crate) select_columns: Vec<ColumnSpec>,
    pub(crate) distinct: bool,
    pub(crate) found_rows: bool,
    pub(crate) where_tree: Vec<WhereNode>,
    pub(crate) group_by: Vec<String>,
    /// Insertion ordered; `None` direction renders the key as a raw expression.
    pub(crate) order_specs: Vec<(String, Option<Direction>)>,
    /// `(count, offset)`
    pub(crate) limit: Option<(u64, u64)>,
    pub(crate) pending_values: Vec<(String, Value)>,
}

impl QueryState {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select_columns: Vec::new(),
            distinct: false,
            found_rows: false,
            where_tree: Vec::new(),
            group_by: Vec::new(),
            order_specs: Vec::new(),
            limit: None,
            pending_values: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn select_columns(&self) -> &[ColumnSpec] {
        &self.select_columns
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn calc_found_rows(&self) -> bool {
        self.found_rows
    }

    pub fn where_tree(&self) -> &[WhereNode] {
        &self.where_tree
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    pub fn order_specs(&self) -> &[(String, Option<Direction>)] {
        &self.order_specs
    }

    pub fn limit(&self) -> Option<(u64, u64)> {
        self.limit
    }

    pub fn pending_values(&self) -> &[(String, Value)] {
        &self.pending_values
    }

    /// Clear every clause, keeping the table binding.
    pub fn reset(&mut self) {
        let table = std::mem::take(&mut self.table);
        *self = Self::new(table);
    }

    /// Set or overwrite an ORDER BY entry, keeping the position of an existing key.
    pub(crate) fn put_order(&mut self, column: String, direction: Option<Direction>) {
        match self.order_specs.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = direction,
            None => self.order_specs.push((column, direction)),
        }
    }
}
