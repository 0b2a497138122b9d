//! Records stored one row per value.
//!
//! Each record borrows a [`Db`] for its lifetime and reports the outcome of
//! every operation as a plain `bool`: store errors are logged and collapse to
//! `false`, and lookups collapse to an empty result.
//!
//! Saving is a check followed by a write, two separate round-trips with no
//! transaction around them.  Two callers saving the same key at the same time
//! can both see it missing; the table's primary key then rejects the second
//! insert, which reports `false`.

use crate::db::{Db, Literal, Table};

mod access_grant;
mod config_variable;

pub use access_grant::AccessGrant;
pub use config_variable::{ConfigVariable, NAME_MAX_EXCLUSIVE,
                          NAME_MIN_EXCLUSIVE};

/// Operations shared by every record type.
pub trait Model {
    const TABLE: Table;

    fn table(&self) -> Table {
        Self::TABLE
    }

    /// Tables are created when the store is opened, so there is nothing to do.
    fn install(&self) -> bool {
        true
    }

    fn validate(&self) -> bool;

    fn exists(&self) -> bool;

    fn save(&self) -> bool;

    fn delete(&self) -> bool;
}

/// `column = <literal>`, for use in a `WHERE` clause.
fn column_eq<D>(db: &D, column: &str, value: Option<&str>) -> String
where
    D: Db + ?Sized,
{
    format!("{column} = {}", db.encode_literal(Literal::from(value)))
}
