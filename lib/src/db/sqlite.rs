//! SQLite database implementation.

use std::fs;
use std::path::Path;
use std::time::Duration;
use rusqlite::Connection;
use crate::db::{DbError, DbResult, DbResults, Literal, Row};

mod dbtypes;
mod fromdb;
pub(crate) mod todb;

pub use dbtypes::Table;

/// SQLite [`Db`](crate::db::Db) implementation.
#[derive(Debug)]
pub struct SqliteDb { conn: Connection }

/// Create the library's tables if they do not exist yet.
fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(dbtypes::SCHEMA)
        .map_err(|e| DbError::Schema(e.to_string()))?;
    log::info!("database schema ready");
    Ok(())
}

/// Connect to the database at `db_path` and perform any required
/// initialisation.
pub fn open(db_path: &Path, busy_timeout: Duration) -> DbResult<SqliteDb> {
    let open_err = |reason: String| DbError::Open {
        path: db_path.display().to_string(),
        reason,
    };

    let db_path_parent = db_path.parent()
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .unwrap_or(db_path);
    fs::create_dir_all(db_path_parent)
        .map_err(|e| open_err(format!(
            "error creating directory ({}): {e}", db_path_parent.display())))?;

    let conn = Connection::open(db_path)
        .map_err(|e| open_err(e.to_string()))?;
    conn.busy_timeout(busy_timeout)
        .map_err(|e| open_err(e.to_string()))?;
    log::debug!("opened database at {}", db_path.display());
    init_schema(&conn)?;
    Ok(SqliteDb { conn })
}

/// Open a private database that lives as long as the returned value.
pub fn open_in_memory() -> DbResult<SqliteDb> {
    let conn = Connection::open_in_memory()
        .map_err(|e| DbError::Open {
            path: ":memory:".to_owned(),
            reason: e.to_string(),
        })?;
    init_schema(&conn)?;
    Ok(SqliteDb { conn })
}

impl crate::db::Db for SqliteDb {
    fn select(&self, sql: &str) -> DbResults<Row> {
        log::debug!("select: {sql}");
        let mut stmt = fromdb::query_err(sql, self.conn.prepare(sql))?;
        let columns: Vec<String> = stmt.column_names().into_iter()
            .map(str::to_owned)
            .collect();
        let mut rows = fromdb::query_err(sql, stmt.query(()))?;

        let mut result = Vec::new();
        while let Some(r) = fromdb::query_err(sql, rows.next())? {
            result.push(fromdb::row(r, &columns)?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str) -> DbResult<usize> {
        log::debug!("exec: {sql}");
        fromdb::query_err(sql, self.conn.execute(sql, ()))
    }

    fn encode_literal(&self, value: Literal) -> String {
        todb::literal(value)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use crate::db::{Db, Value};
    use super::*;

    #[test]
    fn schema_creates_every_table() {
        let db = open_in_memory().unwrap();
        for table in Table::iter() {
            let rows = db.select(&format!(
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name = '{table}'")).unwrap();
            assert_eq!(rows.len(), 1, "missing table {table}");
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let db = open_in_memory().unwrap();
        init_schema(&db.conn).unwrap();
    }

    #[test]
    fn select_returns_named_columns() {
        let db = open_in_memory().unwrap();
        let rows = db.select("SELECT 1 AS one, 'x' AS ex, NULL AS nil")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("one"), Some(&Value::Integer(1)));
        assert_eq!(rows[0].get("ex"), Some(&Value::Text("x".to_owned())));
        assert_eq!(rows[0].get("nil"), Some(&Value::Null));
    }

    #[test]
    fn select_with_no_rows_is_empty() {
        let db = open_in_memory().unwrap();
        assert!(db.select("SELECT * FROM tbl_access_grants").unwrap().is_empty());
    }

    #[test]
    fn malformed_query_is_an_error() {
        let db = open_in_memory().unwrap();
        assert!(matches!(db.select("SELEC nonsense"),
                         Err(DbError::Query { .. })));
        assert!(matches!(db.exec("DELETE FROM no_such_table"),
                         Err(DbError::Query { .. })));
    }

    #[test]
    fn exec_reports_affected_rows() {
        let db = open_in_memory().unwrap();
        let n = db.exec("INSERT INTO tbl_config_vars (name, value, updated_date) \
                         VALUES ('a', 'b', 0)").unwrap();
        assert_eq!(n, 1);
        assert_eq!(db.exec("DELETE FROM tbl_config_vars WHERE name = 'zz'")
                   .unwrap(), 0);
    }

    #[test]
    fn undecodable_text_fails_only_its_column() {
        let db = open_in_memory().unwrap();
        let rows = db.select("SELECT CAST(X'FF' AS TEXT) AS bad, 'ok' AS good")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0].text("bad"), Err(DbError::Decode(_))));
        assert_eq!(rows[0].text("good").unwrap().as_deref(), Some("ok"));
    }

    #[test]
    fn encoded_literal_round_trips_quotes() {
        let db = open_in_memory().unwrap();
        let lit = db.encode_literal(Literal::Text("it's"));
        let rows = db.select(&format!("SELECT {lit} AS v")).unwrap();
        assert_eq!(rows[0].get("v"), Some(&Value::Text("it's".to_owned())));
    }
}
