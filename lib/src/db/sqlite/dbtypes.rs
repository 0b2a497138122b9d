/// Tables owned by this library.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq,
         strum::AsRefStr, strum::Display, strum::EnumIter)]
pub enum Table {
    #[strum(serialize = "tbl_access_grants")]
    AccessGrants,
    #[strum(serialize = "tbl_config_vars")]
    ConfigVars,
}

/// Executed on every open, so every statement must be idempotent.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tbl_access_grants (
        user TEXT NOT NULL,
        page TEXT NOT NULL,
        created_date INTEGER NOT NULL,
        PRIMARY KEY (user, page)
    );

    CREATE INDEX IF NOT EXISTS idx_access_grants_user
        ON tbl_access_grants (user);

    CREATE TABLE IF NOT EXISTS tbl_config_vars (
        name TEXT NOT NULL PRIMARY KEY,
        value TEXT,
        updated_date INTEGER NOT NULL
    );
";
