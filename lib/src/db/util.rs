//! Helpers that turn store results into the plain answers models return.
//!
//! Errors are logged here and then dropped: callers only see `false` or an
//! empty result.

use super::{DbResult, DbResults, Row, Table};

/// Whether the query returned at least one row.
pub fn any_rows(table: Table, r: DbResults<Row>) -> bool {
    !rows_or_empty(table, r).is_empty()
}

pub fn rows_or_empty(table: Table, r: DbResults<Row>) -> Vec<Row> {
    r.unwrap_or_else(|e| {
        log::warn!("query on {table} failed: {e}");
        Vec::new()
    })
}

/// Whether a mutating statement ran.  Affecting zero rows still counts.
pub fn succeeded(table: Table, r: DbResult<usize>) -> bool {
    match r {
        Ok(n) => {
            log::debug!("{n} row(s) changed in {table}");
            true
        }
        Err(e) => {
            log::warn!("write to {table} failed: {e}");
            false
        }
    }
}

/// Hydrate each row with `f`, skipping rows that cannot be read.
pub fn hydrate<T, F>(table: Table, rows: Vec<Row>, f: F) -> Vec<T>
where
    F: Fn(Row) -> DbResult<T>,
{
    rows.into_iter()
        .filter_map(|row| f(row)
            .map_err(|e| log::warn!("skipping unreadable row in {table}: {e}"))
            .ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::db::{DbError, Value};
    use super::*;

    fn broken() -> DbError {
        DbError::Query { sql: "SELECT".to_owned(), reason: "gone".to_owned() }
    }

    #[test]
    fn errors_collapse() {
        assert!(!any_rows(Table::ConfigVars, Err(broken())));
        assert!(rows_or_empty(Table::ConfigVars, Err(broken())).is_empty());
        assert!(!succeeded(Table::ConfigVars, Err(broken())));
    }

    #[test]
    fn zero_affected_rows_is_success() {
        assert!(succeeded(Table::AccessGrants, Ok(0)));
    }

    #[test]
    fn hydrate_skips_bad_rows() {
        let rows = vec![
            [("v", Value::Text("a".to_owned()))].into_iter().collect(),
            Row::default(),
        ];
        let out = hydrate(Table::ConfigVars, rows, |r: Row| r.text("v"));
        assert_eq!(out, vec![Some("a".to_owned())]);
    }
}
