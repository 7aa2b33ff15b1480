//! Argument shapes accepted by the clause builders.
//!
//! Each builder method takes one of these types via `impl Into<..>`, so the
//! different call styles (`"a, b"`, `["a", "b"]`, `[("a", "x")]`, ...) are
//! resolved once at the call boundary.

use crate::value::Operand;

/// A single WHERE condition before it is placed in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub column: String,
    pub operator: String,
    pub value: Operand,
}

impl Cond {
    /// `column <operator> value`. List values are deduplicated.
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into().dedup(),
        }
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::new(column, "=", value)
    }
}

impl<C: Into<String>, V: Into<Operand>> From<(C, V)> for Cond {
    fn from((column, value): (C, V)) -> Self {
        Cond::eq(column, value)
    }
}

impl<C: Into<String>, V: Into<Operand>> From<(C, &str, V)> for Cond {
    fn from((column, operator, value): (C, &str, V)) -> Self {
        Cond::new(column, operator, value)
    }
}

/// A list of column names or expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnList(pub Vec<String>);

impl ColumnList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ColumnList {
    fn from(s: &str) -> Self {
        ColumnList(split_columns(s))
    }
}

impl From<String> for ColumnList {
    fn from(s: String) -> Self {
        ColumnList::from(s.as_str())
    }
}

impl From<&String> for ColumnList {
    fn from(s: &String) -> Self {
        ColumnList::from(s.as_str())
    }
}

impl From<Vec<String>> for ColumnList {
    fn from(v: Vec<String>) -> Self {
        ColumnList(trimmed(v))
    }
}

impl From<Vec<&str>> for ColumnList {
    fn from(v: Vec<&str>) -> Self {
        ColumnList(trimmed(v))
    }
}

impl From<&[&str]> for ColumnList {
    fn from(v: &[&str]) -> Self {
        ColumnList(trimmed(v.iter().copied()))
    }
}

impl<const N: usize> From<[&str; N]> for ColumnList {
    fn from(v: [&str; N]) -> Self {
        ColumnList(trimmed(v))
    }
}

fn trimmed<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Argument to `select`.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectInput {
    /// Nothing appended; renders `*` when no other column is selected.
    All,
    Columns(ColumnList),
    /// `(expr, alias)` pairs.
    Aliased(Vec<(String, String)>),
}

impl From<&str> for SelectInput {
    fn from(s: &str) -> Self {
        SelectInput::Columns(s.into())
    }
}

impl From<String> for SelectInput {
    fn from(s: String) -> Self {
        SelectInput::Columns(s.into())
    }
}

impl From<Vec<&str>> for SelectInput {
    fn from(v: Vec<&str>) -> Self {
        SelectInput::Columns(v.into())
    }
}

impl From<Vec<String>> for SelectInput {
    fn from(v: Vec<String>) -> Self {
        SelectInput::Columns(v.into())
    }
}

impl From<&[&str]> for SelectInput {
    fn from(v: &[&str]) -> Self {
        SelectInput::Columns(v.into())
    }
}

impl<const N: usize> From<[&str; N]> for SelectInput {
    fn from(v: [&str; N]) -> Self {
        SelectInput::Columns(v.into())
    }
}

impl From<ColumnList> for SelectInput {
    fn from(v: ColumnList) -> Self {
        SelectInput::Columns(v)
    }
}

impl From<Vec<(&str, &str)>> for SelectInput {
    fn from(v: Vec<(&str, &str)>) -> Self {
        SelectInput::Aliased(
            v.into_iter()
                .map(|(expr, alias)| (expr.to_string(), alias.to_string()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for SelectInput {
    fn from(v: [(&str, &str); N]) -> Self {
        SelectInput::from(Vec::from(v))
    }
}

/// Split on commas that are not inside parentheses or quotes.
///
/// `"id, concat(a, ',', b) as ab"` yields `["id", "concat(a, ',', b) as ab"]`.
pub(crate) fn split_columns(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in s.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    parts.push(current);

    trimmed(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn split_trims_and_drops_empty() {
        assert_eq!(split_columns("a, b ,c,"), vec!["a", "b", "c"]);
        assert_eq!(split_columns("   "), Vec::<String>::new());
        assert_eq!(split_columns("id"), vec!["id"]);
    }

    #[test]
    fn split_respects_parens_and_quotes() {
        assert_eq!(
            split_columns("id, concat(a, ',', b) as ab, field(x, 1, 2)"),
            vec!["id", "concat(a, ',', b) as ab", "field(x, 1, 2)"]
        );
        assert_eq!(split_columns(r"'a\', b', c"), vec![r"'a\', b'", "c"]);
    }

    #[test]
    fn string_and_list_forms_agree() {
        assert_eq!(ColumnList::from("a, b"), ColumnList::from(["a", "b"]));
        assert_eq!(ColumnList::from("a, b"), ColumnList::from(vec!["a", "b"]));
    }

    #[test]
    fn cond_tuples() {
        assert_eq!(Cond::from(("id", 2)), Cond::new("id", "=", 2));
        assert_eq!(
            Cond::from(("a", ">", 10)),
            Cond {
                column: "a".into(),
                operator: ">".into(),
                value: Operand::Scalar(Value::Int(10)),
            }
        );
    }

    #[test]
    fn cond_deduplicates_lists() {
        let cond = Cond::new("id", "in", vec![1, 1, 2]);
        assert_eq!(cond.value, Operand::List(vec![Value::Int(1), Value::Int(2)]));
    }
}
