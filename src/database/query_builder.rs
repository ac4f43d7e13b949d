use std::time::Instant;

use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::filter::types::SqlResult;
use crate::filter::{Filter, FilterData};

pub struct QueryBuilder<T> {
    table_name: String,
    filter: Option<Filter>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let name = table_name.into();
        // Reuse Filter table name validation
        Filter::new(&name)?;
        Ok(Self {
            table_name: name,
            filter: None,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn filter(mut self, filter_data: FilterData) -> Result<Self, DatabaseError> {
        let mut filter = Filter::new(&self.table_name)?;
        filter.assign(filter_data)?;
        self.filter = Some(filter);
        Ok(self)
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.sql_result()?;
        let started = Instant::now();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await;
        log_query(&sql_result, started, rows.as_ref().err());
        Ok(rows?)
    }

    pub async fn select_optional(self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let sql_result = self.sql_result()?;
        let started = Instant::now();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await;
        log_query(&sql_result, started, row.as_ref().err());
        Ok(row?)
    }

    fn sql_result(&self) -> Result<SqlResult, DatabaseError> {
        match &self.filter {
            Some(filter) => Ok(filter.to_sql()?),
            None => Ok(SqlResult { query: format!("SELECT * FROM \"{}\"", self.table_name), params: vec![] }),
        }
    }
}

/// Which lines a finished query logs: (debug line with its SQL, slow-query warning)
fn log_plan(config: &DatabaseConfig, elapsed_ms: u64, failed: bool) -> (bool, bool) {
    let debug = failed || config.enable_query_logging;
    let slow = config.enable_slow_query_warning && elapsed_ms > config.slow_query_threshold_ms;
    (debug, slow)
}

fn log_query(sql_result: &SqlResult, started: Instant, error: Option<&sqlx::Error>) {
    let config = &crate::config::config().database;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let (debug, slow) = log_plan(config, elapsed_ms, error.is_some());

    if debug {
        match error {
            Some(error) => {
                tracing::debug!(elapsed_ms, params = ?sql_result.params, %error, "Query failed: {}", sql_result.query)
            }
            None => tracing::debug!(elapsed_ms, params = ?sql_result.params, "{}", sql_result.query),
        }
    }
    if slow {
        tracing::warn!(elapsed_ms, "Slow query: {}", sql_result.query);
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
            // year and vote columns are INT4
            if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                q.bind(i)
            } else if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        // Arrays are expanded by FilterWhere before binding
        Value::Array(_) => q,
        Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enable_query_logging: bool) -> DatabaseConfig {
        DatabaseConfig {
            url: None,
            max_connections: 1,
            connection_timeout: 1,
            enable_query_logging,
            enable_slow_query_warning: true,
            slow_query_threshold_ms: 100,
            run_migrations: false,
        }
    }

    #[test]
    fn failed_queries_are_logged_even_when_logging_is_off() {
        assert_eq!(log_plan(&config(false), 5, true), (true, false));
        assert_eq!(log_plan(&config(false), 5, false), (false, false));
        assert_eq!(log_plan(&config(true), 5, false), (true, false));
    }

    #[test]
    fn slow_failures_also_warn() {
        assert_eq!(log_plan(&config(false), 250, true), (true, true));
        assert_eq!(log_plan(&config(false), 100, false), (false, false));
    }
}
