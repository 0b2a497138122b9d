use rusqlite::types::ValueRef;
use crate::db::{DbError, DbResult, Row, Value};

pub fn query_err<T>(sql: &str, r: rusqlite::Result<T>) -> DbResult<T> {
    r.map_err(|e| DbError::Query { sql: sql.to_owned(), reason: e.to_string() })
}

pub fn value(v: ValueRef<'_>) -> DbResult<Value> {
    Ok(match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        // left as bytes so only readers of this column fail
        ValueRef::Text(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Value::Text(s),
            Err(e) => Value::Blob(e.into_bytes()),
        },
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    })
}

/// Read every column of `r`; `columns` gives the names in select order.
pub fn row(r: &rusqlite::Row, columns: &[String]) -> DbResult<Row> {
    columns.iter()
        .enumerate()
        .map(|(i, name)| {
            let raw = r.get_ref(i)
                .map_err(|e| DbError::Decode(format!("column {name}: {e}")))?;
            Ok((name.as_str(), value(raw)?))
        })
        .collect()
}
