use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::filter::types::SqlResult;

/// Runs a prepared statement with its JSON-typed parameters bound in order
pub struct QueryBuilder<T> {
    sql_result: SqlResult,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(sql_result: SqlResult) -> Self {
        Self {
            sql_result,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        tracing::debug!(query = %self.sql_result.query, params = self.sql_result.params.len(), "select_all");
        let mut q = sqlx::query_as::<_, T>(&self.sql_result.query);
        for p in self.sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        tracing::debug!(query = %self.sql_result.query, params = self.sql_result.params.len(), "select_optional");
        let mut q = sqlx::query_as::<_, T>(&self.sql_result.query);
        for p in self.sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }
}

/// UPDATE statement listing only the columns that were supplied
pub struct UpdateBuilder {
    table_name: &'static str,
    assignments: Vec<String>,
    params: Vec<Value>,
}

impl UpdateBuilder {
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            assignments: vec![],
            params: vec![],
        }
    }

    /// Adds `column = $n` when a value is present; absent values are skipped
    pub fn set(self, column: &str, value: Option<Value>) -> Self {
        self.set_cast(column, value, None)
    }

    /// Like `set`, with a SQL cast applied to the placeholder (`$n::numeric`)
    pub fn set_cast(mut self, column: &str, value: Option<Value>, cast: Option<&str>) -> Self {
        if let Some(value) = value {
            self.params.push(value);
            let placeholder = match cast {
                Some(ty) => format!("${}::{}", self.params.len(), ty),
                None => format!("${}", self.params.len()),
            };
            self.assignments.push(format!("\"{}\" = {}", column, placeholder));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// `UPDATE … SET … WHERE key = $last RETURNING …`. Fails when nothing was set.
    pub fn build(mut self, key_column: &str, key: Value, returning: &str) -> Result<SqlResult, DatabaseError> {
        if self.is_empty() {
            return Err(DatabaseError::BadRequest("No data".to_string()));
        }
        self.params.push(key);
        let query = format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = ${} RETURNING {}",
            self.table_name,
            self.assignments.join(", "),
            key_column,
            self.params.len(),
            returning
        );
        Ok(SqlResult { query, params: self.params })
    }
}

/// Runs a statement that returns no rows, yielding the affected-row count
pub async fn execute(sql_result: &SqlResult, pool: &PgPool) -> Result<u64, DatabaseError> {
    tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "execute");
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    let result = q.execute(pool).await?;
    Ok(result.rows_affected())
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
