//! Rendering of [`QueryState`] into SQL text.
//!
//! Translation is pure: it reads the state, asks the escaper for literals and
//! returns a string. Clauses are joined with single spaces and omitted when
//! empty.

use crate::escape::Escaper;
use crate::state::{ColumnSpec, Connector, QueryState, WhereNode};
use crate::value::Operand;

/// `select [SQL_CALC_FOUND_ROWS] [distinct] <columns> from <table> [where] [group by] [order by] [limit]`
pub fn select(state: &QueryState, esc: &dyn Escaper) -> String {
    let mut build: Vec<String> = vec!["select".to_string()];

    if state.calc_found_rows() {
        build.push("SQL_CALC_FOUND_ROWS".to_string());
    }
    if state.is_distinct() {
        build.push("distinct".to_string());
    }

    build.push(columns(state.select_columns()));
    build.push(format!("from {}", state.table()));

    if !state.where_tree().is_empty() {
        build.push(where_clause(state.where_tree(), esc));
    }
    if !state.group_by().is_empty() {
        build.push(format!("group by {}", state.group_by().join(", ")));
    }
    if !state.order_specs().is_empty() {
        build.push(order_by(state));
    }
    if let Some(limit) = limit(state) {
        build.push(limit);
    }

    build.join(" ")
}

/// `update <table> set <col> = <value>, ... [where] [limit]`
pub fn update(state: &QueryState, esc: &dyn Escaper) -> String {
    let assignments: Vec<String> = state
        .pending_values()
        .iter()
        .map(|(column, value)| format!("{} = {}", column, esc.escape_value(value)))
        .collect();

    let mut build = vec![format!("update {} set", state.table())];
    if !assignments.is_empty() {
        build.push(assignments.join(", "));
    }
    if !state.where_tree().is_empty() {
        build.push(where_clause(state.where_tree(), esc));
    }
    if let Some(limit) = limit(state) {
        build.push(limit);
    }

    build.join(" ")
}

/// `delete from <table> [where] [limit]`
pub fn delete(state: &QueryState, esc: &dyn Escaper) -> String {
    let mut build = vec![format!("delete from {}", state.table())];
    if !state.where_tree().is_empty() {
        build.push(where_clause(state.where_tree(), esc));
    }
    if let Some(limit) = limit(state) {
        build.push(limit);
    }

    build.join(" ")
}

/// Render a top-level WHERE tree, starting with the `where` keyword.
pub fn where_clause(nodes: &[WhereNode], esc: &dyn Escaper) -> String {
    render_nodes(nodes, esc, true)
}

fn render_nodes(nodes: &[WhereNode], esc: &dyn Escaper, top_level: bool) -> String {
    let mut build: Vec<String> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            WhereNode::Condition {
                connector,
                column,
                operator,
                value,
            } => {
                let value = match value {
                    Operand::List(values) => format!("({})", esc.escape_values(values).join(", ")),
                    Operand::Scalar(v) => esc.escape_value(v),
                };
                match keyword(*connector, top_level) {
                    Some(kw) => build.push(format!("{kw} {column} {operator} {value}")),
                    None => build.push(format!("{column} {operator} {value}")),
                }
            }
            WhereNode::Group {
                connector,
                children,
                is_first,
            } => {
                let inner = render_nodes(children, esc, false);
                let prefix = if *is_first && top_level {
                    Some(Connector::Where.as_str())
                } else {
                    keyword(*connector, top_level)
                };
                match prefix {
                    Some(kw) => build.push(format!("{kw} ( {inner} )")),
                    None => build.push(format!("( {inner} )")),
                }
            }
        }
    }

    build.join(" ")
}

/// The leading keyword for a node. Inside a group the first node has none.
fn keyword(connector: Connector, top_level: bool) -> Option<&'static str> {
    match connector {
        Connector::Where if !top_level => None,
        other => Some(other.as_str()),
    }
}

fn columns(specs: &[ColumnSpec]) -> String {
    if specs.is_empty() {
        return "*".to_string();
    }
    specs
        .iter()
        .map(|spec| match spec {
            ColumnSpec::Raw(expr) => expr.clone(),
            ColumnSpec::Aliased { expr, alias } => format!("{expr} as {alias}"),
            ColumnSpec::Func {
                func,
                field,
                alias: Some(alias),
            } => format!("{func}({field}) as {alias}"),
            ColumnSpec::Func {
                func,
                field,
                alias: None,
            } => format!("{func}({field})"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `order by <col> [<dir>], ...`
pub fn order_by(state: &QueryState) -> String {
    let items: Vec<String> = state
        .order_specs()
        .iter()
        .map(|(column, direction)| match direction {
            Some(dir) => format!("{column} {dir}"),
            None => column.clone(),
        })
        .collect();
    format!("order by {}", items.join(", "))
}

/// `limit <offset>, <count>`
pub fn limit(state: &QueryState) -> Option<String> {
    state
        .limit()
        .map(|(count, offset)| format!("limit {offset}, {count}"))
}
