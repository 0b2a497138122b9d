use chrono::{DateTime, Utc};
use crate::db::Literal;

/// SQLite literal syntax: text is single-quoted with embedded quotes doubled.
pub fn literal(value: Literal) -> String {
    match value {
        Literal::Null => "NULL".to_owned(),
        Literal::Integer(i) => i.to_string(),
        Literal::Text(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

pub fn date(date: DateTime<Utc>) -> i64 {
    date.timestamp()
}
