/* Adattatore di storage: espone al controller solo quattro primitive (query_all, query_one,
    execute, last_inserted_id) su SQL parametrizzato. Le righe tornano come mappe JSON
    colonna -> valore, così il controller non dipende da sqlx.
*/
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::pool::PoolConnection;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, Sqlite, SqliteConnection, SqlitePool, TypeInfo, ValueRef};

/// Riga restituita dallo store, nell'ordine delle colonne della SELECT.
pub type Row = Map<String, Value>;

/// Parametro posizionale per i placeholder `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("db error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send {
    async fn query_all(&mut self, sql: &str) -> Result<Vec<Row>, StoreError>;

    async fn query_one(&mut self, sql: &str, params: &[Param]) -> Result<Option<Row>, StoreError>;

    /// Restituisce il numero di righe coinvolte.
    async fn execute(&mut self, sql: &str, params: &[Param]) -> Result<u64, StoreError>;

    /// Id assegnato dall'ultima INSERT eseguita da questo store.
    async fn last_inserted_id(&mut self) -> Result<i64, StoreError>;
}

/// Store SQLite con scope di richiesta: la connessione viene presa dal pool al primo statement
/// e restituita quando lo store viene droppato.
pub struct SqliteStore {
    pool: SqlitePool,
    conn: Option<PoolConnection<Sqlite>>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, conn: None }
    }

    async fn conn(&mut self) -> Result<&mut SqliteConnection, StoreError> {
        if self.conn.is_none() {
            self.conn = Some(self.pool.acquire().await?);
        }
        match self.conn.as_mut() {
            Some(conn) => Ok(&mut **conn),
            None => Err(StoreError::Database(sqlx::Error::PoolClosed)),
        }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn query_all(&mut self, sql: &str) -> Result<Vec<Row>, StoreError> {
        let rows = sqlx::query(sql).fetch_all(self.conn().await?).await?;
        rows.iter().map(row_to_map).collect()
    }

    async fn query_one(&mut self, sql: &str, params: &[Param]) -> Result<Option<Row>, StoreError> {
        let row = bind_params(sqlx::query(sql), params)
            .fetch_optional(self.conn().await?)
            .await?;
        row.as_ref().map(row_to_map).transpose()
    }

    async fn execute(&mut self, sql: &str, params: &[Param]) -> Result<u64, StoreError> {
        let done = bind_params(sqlx::query(sql), params)
            .execute(self.conn().await?)
            .await?;
        Ok(done.rows_affected())
    }

    async fn last_inserted_id(&mut self) -> Result<i64, StoreError> {
        // last_insert_rowid() è per connessione: va letto sulla stessa usata dalla INSERT
        let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
            .fetch_one(self.conn().await?)
            .await?;
        Ok(id)
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Param],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Int(v) => query.bind(*v),
            Param::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

// Converte una riga SQLite in mappa JSON in base alla storage class di ogni valore.
fn row_to_map(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut out = Map::new();
    for column in row.columns() {
        let i = column.ordinal();
        let raw = row.try_get_raw(i)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(i)?),
                "REAL" => Value::from(row.try_get::<f64, _>(i)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(i)?;
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::String(row.try_get::<String, _>(i)?),
            }
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}
