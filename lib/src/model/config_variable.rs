use std::fmt;
use chrono::Utc;
use crate::db::{util, Db, DbResult, Literal, Row, Table};
use crate::db::sqlite::todb;
use super::{column_eq, Model};

const COLUMNS: &str = "name, value";

/// Names must be longer than this many characters.
pub const NAME_MIN_EXCLUSIVE: usize = 1;
/// Names must be shorter than this many characters.
pub const NAME_MAX_EXCLUSIVE: usize = 20;

/// A named string setting.
pub struct ConfigVariable<'d, D: Db + ?Sized> {
    db: &'d D,
    pub name: Option<String>,
    pub value: Option<String>,
}

impl<'d, D: Db + ?Sized> ConfigVariable<'d, D> {
    pub fn new(db: &'d D, name: impl Into<String>, value: Option<String>)
    -> Self {
        ConfigVariable { db, name: Some(name.into()), value }
    }

    /// for rows selected with both `name` and `value` columns
    pub fn from_row(db: &'d D, row: &Row) -> DbResult<Self> {
        Ok(ConfigVariable {
            db,
            name: row.text("name")?,
            value: row.text("value")?,
        })
    }

    /// Load the variable called `name`, if it is stored.
    pub fn find(db: &'d D, name: &str) -> Option<Self> {
        let sql = format!("
            SELECT {COLUMNS} FROM {}
            WHERE {}
        ", Self::TABLE, column_eq(db, "name", Some(name)));
        let rows = util::rows_or_empty(Self::TABLE, db.select(&sql));
        util::hydrate(Self::TABLE, rows, |row| Self::from_row(db, &row))
            .into_iter()
            .next()
    }

    /// Every stored variable, ordered by name.
    pub fn list(db: &'d D) -> Vec<Self> {
        let sql = format!("
            SELECT {COLUMNS} FROM {}
            ORDER BY name
        ", Self::TABLE);
        let rows = util::rows_or_empty(Self::TABLE, db.select(&sql));
        util::hydrate(Self::TABLE, rows, |row| Self::from_row(db, &row))
    }

    fn name_clause(&self) -> String {
        column_eq(self.db, "name", self.name.as_deref())
    }

    fn insert(&self) -> bool {
        let sql = format!("
            INSERT INTO {} (name, value, updated_date)
            VALUES ({}, {}, {})
        ", Self::TABLE,
           self.db.encode_literal(Literal::from(self.name.as_deref())),
           self.db.encode_literal(Literal::from(self.value.as_deref())),
           self.db.encode_literal(Literal::from(todb::date(Utc::now()))));
        util::succeeded(Self::TABLE, self.db.exec(&sql))
    }

    fn update(&self) -> bool {
        let sql = format!("
            UPDATE {}
            SET value = {}, updated_date = {}
            WHERE {}
        ", Self::TABLE,
           self.db.encode_literal(Literal::from(self.value.as_deref())),
           self.db.encode_literal(Literal::from(todb::date(Utc::now()))),
           self.name_clause());
        util::succeeded(Self::TABLE, self.db.exec(&sql))
    }
}

impl<D: Db + ?Sized> Model for ConfigVariable<'_, D> {
    const TABLE: Table = Table::ConfigVars;

    /// Length is counted in characters.
    fn validate(&self) -> bool {
        self.name.as_deref().is_some_and(|name| {
            let len = name.chars().count();
            len > NAME_MIN_EXCLUSIVE && len < NAME_MAX_EXCLUSIVE
        })
    }

    fn exists(&self) -> bool {
        if self.name.is_none() {
            return false;
        }
        let sql = format!("
            SELECT 1 FROM {}
            WHERE {}
            LIMIT 1
        ", Self::TABLE, self.name_clause());
        util::any_rows(Self::TABLE, self.db.select(&sql))
    }

    /// Invalid names are rejected before touching the store.
    fn save(&self) -> bool {
        if !self.validate() {
            log::debug!("not saving config variable with invalid name: {:?}",
                        self.name);
            return false;
        }
        if self.exists() {
            self.update()
        } else {
            self.insert()
        }
    }

    fn delete(&self) -> bool {
        let sql = format!("
            DELETE FROM {}
            WHERE {}
        ", Self::TABLE, self.name_clause());
        util::succeeded(Self::TABLE, self.db.exec(&sql))
    }
}

impl<D: Db + ?Sized> Clone for ConfigVariable<'_, D> {
    fn clone(&self) -> Self {
        ConfigVariable {
            db: self.db,
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

impl<D: Db + ?Sized> fmt::Debug for ConfigVariable<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigVariable")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
