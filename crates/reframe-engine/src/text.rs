//! Regex helpers over Text columns
//!
//! Both operations compile the pattern once, apply it cell-wise, and add
//! (or replace in place) a column on a new table. Missing cells stay
//! Missing; the source column must be Text.

use regex::Regex;
use reframe_table::{Column, Table, TableError};
use reframe_types::{DataType, Value};

use crate::EngineError;

/// Add a Boolean column `name`: true where `column` matches `pattern`
pub fn detect(
    table: &Table,
    name: &str,
    column: &str,
    pattern: &str,
) -> Result<Table, EngineError> {
    let re = compile(pattern)?;
    let source = text_column(table, column)?;

    let values = source
        .iter()
        .map(|v| match v {
            Value::Text(s) => Value::Boolean(re.is_match(s)),
            _ => Value::Missing,
        })
        .collect();

    Ok(table.with_column(name, Column::new(DataType::Boolean, values)?)?)
}

/// Add a Text column `name`: `column` with the first `pattern` match
/// replaced by `replacement`. Capture group references (`$1`, `$name`)
/// work as in the regex crate.
///
/// Passing `name == column` rewrites the column in place.
pub fn replace(
    table: &Table,
    name: &str,
    column: &str,
    pattern: &str,
    replacement: &str,
) -> Result<Table, EngineError> {
    replace_impl(table, name, column, pattern, replacement, false)
}

/// Like [`replace`], but replaces every match
pub fn replace_all(
    table: &Table,
    name: &str,
    column: &str,
    pattern: &str,
    replacement: &str,
) -> Result<Table, EngineError> {
    replace_impl(table, name, column, pattern, replacement, true)
}

fn replace_impl(
    table: &Table,
    name: &str,
    column: &str,
    pattern: &str,
    replacement: &str,
    all: bool,
) -> Result<Table, EngineError> {
    let re = compile(pattern)?;
    let source = text_column(table, column)?;

    let values = source
        .iter()
        .map(|v| match v {
            Value::Text(s) => {
                let replaced =
                    if all { re.replace_all(s, replacement) } else { re.replace(s, replacement) };
                Value::Text(replaced.into_owned())
            }
            _ => Value::Missing,
        })
        .collect();

    Ok(table.with_column(name, Column::new(DataType::Text, values)?)?)
}

fn compile(pattern: &str) -> Result<Regex, EngineError> {
    Regex::new(pattern).map_err(|e| EngineError::Pattern(e.to_string()))
}

fn text_column<'a>(table: &'a Table, column: &str) -> Result<&'a Column, EngineError> {
    let col = table.column(column)?;
    if col.dtype() != &DataType::Text {
        return Err(TableError::TypeMismatch {
            column: column.to_string(),
            expected: DataType::Text.to_string(),
            actual: col.dtype().to_string(),
        }
        .into());
    }
    Ok(col)
}

#[cfg(test)]
mod tests {
    use reframe_table::TableBuilder;

    use super::*;

    fn notes() -> Table {
        let mut b = TableBuilder::new(vec![("note", DataType::Text)]).unwrap();
        for s in ["order 123", "no number here"] {
            b.push_row(vec![Value::Text(s.into())]).unwrap();
        }
        b.push_row(vec![Value::Missing]).unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn detect_is_boolean_with_missing_passthrough() {
        let out = detect(&notes(), "has_digit", "note", r"\d+").unwrap();
        assert_eq!(out.column("has_digit").unwrap().values(), &[
            Value::Boolean(true),
            Value::Boolean(false),
            Value::Missing,
        ]);
    }

    #[test]
    fn replace_first_vs_all() {
        let mut b = TableBuilder::new(vec![("s", DataType::Text)]).unwrap();
        b.push_row(vec![Value::Text("a1b2".into())]).unwrap();
        let t = b.finish().unwrap();

        let first = replace(&t, "s", "s", r"\d", "#").unwrap();
        assert_eq!(first.column("s").unwrap().get(0), Some(&Value::Text("a#b2".into())));

        let all = replace_all(&t, "s", "s", r"\d", "#").unwrap();
        assert_eq!(all.column("s").unwrap().get(0), Some(&Value::Text("a#b#".into())));
    }

    #[test]
    fn replace_supports_capture_groups() {
        let out = replace(&notes(), "note", "note", r"order (\d+)", "order #$1").unwrap();
        assert_eq!(out.column("note").unwrap().get(0), Some(&Value::Text("order #123".into())));
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = detect(&notes(), "x", "note", r"(unclosed").unwrap_err();
        assert!(matches!(err, EngineError::Pattern(_)));
    }

    #[test]
    fn non_text_column_is_rejected() {
        let mut b = TableBuilder::new(vec![("n", DataType::Integer)]).unwrap();
        b.push_row(vec![Value::Integer(1)]).unwrap();
        let t = b.finish().unwrap();

        let err = detect(&t, "x", "n", r"\d").unwrap_err();
        assert!(matches!(err, EngineError::Table(TableError::TypeMismatch { .. })));
    }
}
