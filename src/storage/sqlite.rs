//! SQLite adapter for optional values
//!
//! Reads column values by their runtime storage class and binds
//! [`StorageValue`]s as query parameters.

use log::trace;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};

use super::{StorageCoercible, StorageValue};
use crate::error::{IncompatibleStorageTypeError, StorageError};
use crate::optional::Optional;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Read a column as a [`StorageValue`].
///
/// SQLite values carry one of four storage classes; booleans come back as
/// integers and timestamps as text.
pub fn read_value(row: &SqliteRow, column: &str) -> Result<StorageValue, StorageError> {
    let storage_class = {
        let raw = row.try_get_raw(column)?;
        if raw.is_null() {
            return Ok(StorageValue::Null);
        }
        raw.type_info().name().to_string()
    };

    trace!("Column '{}' has storage class {}", column, storage_class);

    let value = match storage_class.as_str() {
        "INTEGER" => StorageValue::Integer(row.try_get(column)?),
        "REAL" => StorageValue::Real(row.try_get(column)?),
        "TEXT" => StorageValue::Text(row.try_get(column)?),
        "BLOB" => StorageValue::Blob(row.try_get(column)?),
        _ => return Err(IncompatibleStorageTypeError::new::<StorageValue>("unknown storage class").into()),
    };
    Ok(value)
}

/// Read a column as an [`Optional`]. `NULL` is absent.
pub fn read_optional<T>(row: &SqliteRow, column: &str) -> Result<Optional<T>, StorageError>
where
    T: StorageCoercible,
{
    let value = read_value(row, column)?;
    Ok(Optional::from_storage(value)?)
}

/// Bind a storage value as the next query parameter.
pub fn bind_value(query: SqliteQuery<'_>, value: StorageValue) -> SqliteQuery<'_> {
    match value {
        StorageValue::Null => query.bind(None::<String>),
        StorageValue::Bool(v) => query.bind(v),
        StorageValue::Integer(v) => query.bind(v),
        StorageValue::Real(v) => query.bind(v),
        StorageValue::Text(v) => query.bind(v),
        StorageValue::Blob(v) => query.bind(v),
        StorageValue::Timestamp(v) => query.bind(v),
    }
}

/// Bind an optional as the next query parameter. Absent and null bind `NULL`.
pub fn bind_optional<'q, T>(query: SqliteQuery<'q>, value: &Optional<T>) -> SqliteQuery<'q>
where
    T: StorageCoercible,
{
    bind_value(query, value.to_storage())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_pool() -> SqlitePool {
        // A single connection keeps the in-memory database alive across queries
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE records (
                id INTEGER PRIMARY KEY,
                count INTEGER,
                label TEXT,
                flag BOOLEAN,
                ratio REAL,
                seen_at TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn insert(
        pool: &SqlitePool,
        id: i64,
        count: Optional<i64>,
        label: Optional<String>,
        flag: Optional<bool>,
        ratio: Optional<f64>,
        seen_at: Optional<DateTime<Utc>>,
    ) {
        let query = sqlx::query("INSERT INTO records (id, count, label, flag, ratio, seen_at) VALUES (?, ?, ?, ?, ?, ?)").bind(id);
        let query = bind_optional(query, &count);
        let query = bind_optional(query, &label);
        let query = bind_optional(query, &flag);
        let query = bind_optional(query, &ratio);
        let query = bind_optional(query, &seen_at);
        query.execute(pool).await.unwrap();
    }

    async fn fetch(pool: &SqlitePool, id: i64) -> SqliteRow {
        sqlx::query("SELECT * FROM records WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_present_values_roundtrip() {
        let pool = setup_test_pool().await;
        let seen_at = Utc.with_ymd_and_hms(2024, 9, 13, 0, 0, 0).unwrap();

        insert(
            &pool,
            1,
            Optional::some(42),
            Optional::some("hello".to_string()),
            Optional::some(true),
            Optional::some(0.5),
            Optional::some(seen_at),
        )
        .await;

        let row = fetch(&pool, 1).await;
        assert_eq!(read_optional::<i64>(&row, "count").unwrap(), Optional::some(42));
        assert_eq!(read_optional::<String>(&row, "label").unwrap(), Optional::some("hello".to_string()));
        assert_eq!(read_optional::<bool>(&row, "flag").unwrap(), Optional::some(true));
        assert_eq!(read_optional::<f64>(&row, "ratio").unwrap(), Optional::some(0.5));
        assert_eq!(read_optional::<DateTime<Utc>>(&row, "seen_at").unwrap(), Optional::some(seen_at));
    }

    #[tokio::test]
    async fn test_absent_and_null_store_null() {
        let pool = setup_test_pool().await;

        insert(
            &pool,
            2,
            Optional::none(),
            Optional::null(),
            Optional::none(),
            Optional::null(),
            Optional::none(),
        )
        .await;

        let row = fetch(&pool, 2).await;
        assert_eq!(read_value(&row, "count").unwrap(), StorageValue::Null);
        assert_eq!(read_value(&row, "label").unwrap(), StorageValue::Null);
        assert!(read_optional::<i64>(&row, "count").unwrap().is_none());
        assert!(read_optional::<String>(&row, "label").unwrap().is_none());
        assert!(read_optional::<f64>(&row, "ratio").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_incompatible_column() {
        let pool = setup_test_pool().await;

        insert(
            &pool,
            3,
            Optional::none(),
            Optional::some("not a number".to_string()),
            Optional::none(),
            Optional::none(),
            Optional::none(),
        )
        .await;

        let row = fetch(&pool, 3).await;
        let err = read_optional::<i64>(&row, "label").unwrap_err();
        assert!(matches!(err, StorageError::Incompatible(ref e) if e.found == "text"));
    }

    #[tokio::test]
    async fn test_missing_column_is_database_error() {
        let pool = setup_test_pool().await;
        insert(&pool, 4, Optional::some(1), Optional::none(), Optional::none(), Optional::none(), Optional::none()).await;

        let row = fetch(&pool, 4).await;
        assert!(matches!(read_value(&row, "nope"), Err(StorageError::Database(_))));
    }
}
