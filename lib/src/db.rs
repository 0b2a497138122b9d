use std::collections::HashMap;
use crate::config::{self, Config};
use crate::configrefs;

pub mod sqlite;
pub mod util;

pub use sqlite::Table;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("error opening database ({path}): {reason}")]
    Open { path: String, reason: String },

    #[error("error initialising schema: {0}")]
    Schema(String),

    #[error("error running query ({sql}): {reason}")]
    Query { sql: String, reason: String },

    #[error("error reading row: {0}")]
    Decode(String),

    #[error("invalid database configuration: {0}")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;
pub type DbResults<T> = DbResult<Vec<T>>;

/// A single column value as returned by [`Db::select`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// A value to be embedded in query text by [`Db::encode_literal`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Literal<'a> {
    Null,
    Integer(i64),
    Text(&'a str),
}

impl<'a> From<Option<&'a str>> for Literal<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Literal::Null, Literal::Text)
    }
}

impl<'a> From<&'a str> for Literal<'a> {
    fn from(value: &'a str) -> Self {
        Literal::Text(value)
    }
}

impl From<i64> for Literal<'_> {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

/// A result row, keyed by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row(HashMap<String, Value>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Read a text column.  `NULL` becomes `None`; a missing column is an
    /// error.
    pub fn text(&self, column: &str) -> DbResult<Option<String>> {
        match self.0.get(column) {
            None => Err(DbError::Decode(format!("missing column: {column}"))),
            Some(Value::Null) => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.to_owned())),
            Some(Value::Integer(i)) => Ok(Some(i.to_string())),
            Some(Value::Real(f)) => Ok(Some(f.to_string())),
            Some(Value::Blob(_)) => Err(DbError::Decode(format!(
                "not valid text: {column}"))),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Row(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Raw access to the backing store.
///
/// "No rows" is an empty result, never an error.
pub trait Db {
    fn select(&self, sql: &str) -> DbResults<Row>;

    /// Run a mutating statement and return the number of affected rows.
    fn exec(&self, sql: &str) -> DbResult<usize>;

    /// Render `value` as a literal that is safe to embed in query text.
    fn encode_literal(&self, value: Literal) -> String;
}

/// Open the database described by the configuration.
pub fn open<C>(cfg: &C) -> DbResult<sqlite::SqliteDb>
where
    C: Config + ?Sized,
{
    let path = config::get_ref(cfg, &configrefs::DB_SQLITE_PATH)
        .map_err(DbError::Config)?;
    let busy_timeout = config::get_ref(cfg, &configrefs::DB_SQLITE_BUSY_TIMEOUT)
        .map_err(DbError::Config)?;
    sqlite::open(&path, busy_timeout)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use super::{Db, DbError, DbResult, DbResults, Literal, Row};
    use super::sqlite::{self, SqliteDb};

    /// Store whose every query fails.
    #[derive(Debug, Default)]
    pub struct BrokenDb;

    impl Db for BrokenDb {
        fn select(&self, sql: &str) -> DbResults<Row> {
            Err(DbError::Query { sql: sql.to_owned(), reason: "offline".to_owned() })
        }

        fn exec(&self, sql: &str) -> DbResult<usize> {
            Err(DbError::Query { sql: sql.to_owned(), reason: "offline".to_owned() })
        }

        fn encode_literal(&self, value: Literal) -> String {
            sqlite::todb::literal(value)
        }
    }

    /// In-memory SQLite store that remembers every mutating statement.
    #[derive(Debug)]
    pub struct RecordingDb {
        pub inner: SqliteDb,
        pub execs: RefCell<Vec<String>>,
    }

    impl RecordingDb {
        pub fn new() -> RecordingDb {
            RecordingDb {
                inner: sqlite::open_in_memory().expect("in-memory database"),
                execs: RefCell::new(Vec::new()),
            }
        }

        pub fn exec_count(&self) -> usize {
            self.execs.borrow().len()
        }

        pub fn count(&self, sql: &str) -> usize {
            self.inner.select(sql).expect("count query").len()
        }
    }

    impl Db for RecordingDb {
        fn select(&self, sql: &str) -> DbResults<Row> {
            self.inner.select(sql)
        }

        fn exec(&self, sql: &str) -> DbResult<usize> {
            self.execs.borrow_mut().push(sql.to_owned());
            self.inner.exec(sql)
        }

        fn encode_literal(&self, value: Literal) -> String {
            self.inner.encode_literal(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_text_maps_null_to_none() {
        let row: Row = [("name", Value::Null)].into_iter().collect();
        assert_eq!(row.text("name").unwrap(), None);
    }

    #[test]
    fn row_text_rejects_missing_column() {
        let row = Row::default();
        assert!(matches!(row.text("name"), Err(DbError::Decode(_))));
    }

    #[test]
    fn literal_from_option() {
        assert_eq!(Literal::from(None::<&str>), Literal::Null);
        assert_eq!(Literal::from(Some("x")), Literal::Text("x"));
    }

    #[test]
    fn open_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db.sqlite");
        let cfg = config::map::new([
            ("db".to_owned(), config::map::Entry::Section([
                ("sqlite".to_owned(), config::map::Entry::Section([
                    ("db-path".to_owned(), config::map::Entry::Value(
                        path.to_string_lossy().into_owned())),
                ].into_iter().collect())),
            ].into_iter().collect())),
        ].into_iter().collect());

        let db = open(&cfg).unwrap();
        assert!(path.exists());
        assert!(db.select("SELECT * FROM tbl_config_vars").unwrap().is_empty());
    }
}
