//! WHERE-clause builder for typed search criteria.
//!
//! Absent criteria add nothing, so an empty criteria struct lists every row.

use rusqlite::types::Value;

#[derive(Default)]
pub(crate) struct Filter {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Filter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `column = ?`
    pub(crate) fn eq(&mut self, column: &str, value: Option<Value>) -> &mut Self {
        if let Some(value) = value {
            self.clauses.push(format!("{column} = ?"));
            self.values.push(value);
        }
        self
    }

    /// Case-insensitive substring match.
    pub(crate) fn contains(&mut self, column: &str, needle: Option<&str>) -> &mut Self {
        if let Some(needle) = needle {
            self.clauses.push(format!("{column} LIKE ? ESCAPE '\\'"));
            self.values.push(Value::Text(like_pattern(needle)));
        }
        self
    }

    /// Substring match against either of two columns.
    pub(crate) fn contains_either(
        &mut self,
        first: &str,
        second: &str,
        needle: Option<&str>,
    ) -> &mut Self {
        if let Some(needle) = needle {
            self.clauses.push(format!(
                "({first} LIKE ? ESCAPE '\\' OR {second} LIKE ? ESCAPE '\\')"
            ));
            let pattern = like_pattern(needle);
            self.values.push(Value::Text(pattern.clone()));
            self.values.push(Value::Text(pattern));
        }
        self
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}

pub(crate) fn text(value: Option<&str>) -> Option<Value> {
    value.map(|v| Value::Text(v.to_string()))
}

pub(crate) fn integer(value: Option<i64>) -> Option<Value> {
    value.map(Value::Integer)
}

pub(crate) fn boolean(value: Option<bool>) -> Option<Value> {
    value.map(|v| Value::Integer(i64::from(v)))
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
