use std::path::PathBuf;
use std::time::Duration;
use crate::config::{ValueRef, parse, validate};

pub const DB_SQLITE_PATH: ValueRef<'_, PathBuf> = ValueRef {
    names: &["db", "sqlite", "db-path"],
    def: "~/.local/share/pagegate/db.sqlite",
    type_: &parse::FILE_PATH,
    validators: &[validate::NON_EMPTY_PATH],
};

/// How long to wait on a locked database before failing a query.
pub const DB_SQLITE_BUSY_TIMEOUT: ValueRef<'_, Duration> = ValueRef {
    names: &["db", "sqlite", "busy-timeout-ms"],
    def: "5000",
    type_: &parse::MILLIS,
    validators: &[],
};
