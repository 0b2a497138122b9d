use std::fmt;
use chrono::Utc;
use crate::db::{util, Db, DbResult, Literal, Row, Table};
use crate::db::sqlite::todb;
use super::{column_eq, Model};

const COLUMNS: &str = "user, page";

/// Permission for `user` to see `page`.
pub struct AccessGrant<'d, D: Db + ?Sized> {
    db: &'d D,
    pub user: Option<String>,
    pub page: Option<String>,
}

impl<'d, D: Db + ?Sized> AccessGrant<'d, D> {
    pub fn new(db: &'d D, user: impl Into<String>, page: impl Into<String>)
    -> Self {
        AccessGrant { db, user: Some(user.into()), page: Some(page.into()) }
    }

    /// for rows selected with both `user` and `page` columns
    pub fn from_row(db: &'d D, row: &Row) -> DbResult<Self> {
        Ok(AccessGrant {
            db,
            user: row.text("user")?,
            page: row.text("page")?,
        })
    }

    /// Every grant held by `name`, in the order the store returns them.
    pub fn list_by_user(db: &'d D, name: &str) -> Vec<Self> {
        let sql = format!("
            SELECT {COLUMNS} FROM {}
            WHERE {}
        ", Self::TABLE, column_eq(db, "user", Some(name)));
        let rows = util::rows_or_empty(Self::TABLE, db.select(&sql));
        util::hydrate(Self::TABLE, rows, |row| Self::from_row(db, &row))
    }

    fn key_clause(&self) -> String {
        format!("{} AND {}",
                column_eq(self.db, "user", self.user.as_deref()),
                column_eq(self.db, "page", self.page.as_deref()))
    }
}

impl<D: Db + ?Sized> Model for AccessGrant<'_, D> {
    const TABLE: Table = Table::AccessGrants;

    fn validate(&self) -> bool {
        true
    }

    fn exists(&self) -> bool {
        if self.page.is_none() {
            return false;
        }
        let sql = format!("
            SELECT 1 FROM {}
            WHERE {}
            LIMIT 1
        ", Self::TABLE, self.key_clause());
        util::any_rows(Self::TABLE, self.db.select(&sql))
    }

    /// Saving a grant that already exists writes nothing and succeeds.
    fn save(&self) -> bool {
        if self.exists() {
            return true;
        }
        let sql = format!("
            INSERT INTO {} (user, page, created_date)
            VALUES ({}, {}, {})
        ", Self::TABLE,
           self.db.encode_literal(Literal::from(self.user.as_deref())),
           self.db.encode_literal(Literal::from(self.page.as_deref())),
           self.db.encode_literal(Literal::from(todb::date(Utc::now()))));
        util::succeeded(Self::TABLE, self.db.exec(&sql))
    }

    fn delete(&self) -> bool {
        let sql = format!("
            DELETE FROM {}
            WHERE {}
        ", Self::TABLE, self.key_clause());
        util::succeeded(Self::TABLE, self.db.exec(&sql))
    }
}

impl<D: Db + ?Sized> Clone for AccessGrant<'_, D> {
    fn clone(&self) -> Self {
        AccessGrant {
            db: self.db,
            user: self.user.clone(),
            page: self.page.clone(),
        }
    }
}

impl<D: Db + ?Sized> fmt::Debug for AccessGrant<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGrant")
            .field("user", &self.user)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
