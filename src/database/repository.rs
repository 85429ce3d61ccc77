use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::job::JOB_COLUMNS;
use crate::database::models::{Job, JobDetail, JobListing};
use crate::database::query_builder::{self, QueryBuilder, UpdateBuilder};
use crate::filter::{JobFilter, SqlResult};
use crate::schemas::{JobUpdate, NewJob};

/// Accessor for the jobs table. Every operation is a single statement.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a job; the database assigns the id
    async fn create(&self, data: NewJob) -> Result<Job, DatabaseError>;

    /// All jobs matching the filter, with company names, ordered by title
    async fn find_all(&self, filter: JobFilter) -> Result<Vec<JobListing>, DatabaseError>;

    /// One job with its company embedded
    async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError>;

    /// Change only the supplied fields. An empty update is a `BadRequest`.
    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job, DatabaseError>;

    async fn remove(&self, id: i32) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn no_job(id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("No job: {}", id))
}

#[async_trait]
impl JobStore for JobRepository {
    async fn create(&self, data: NewJob) -> Result<Job, DatabaseError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3::numeric, $4) \
             RETURNING {}",
            JOB_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(data.equity.as_deref())
            .bind(&data.company_handle)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id = job.id, company = %job.company_handle, "job created");
        Ok(job)
    }

    async fn find_all(&self, filter: JobFilter) -> Result<Vec<JobListing>, DatabaseError> {
        QueryBuilder::<JobListing>::new(filter.to_sql())
            .select_all(&self.pool)
            .await
    }

    async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError> {
        let sql = SqlResult {
            query: "SELECT j.id, j.title, j.salary, j.equity::text AS equity, \
                    c.handle, c.name, c.description, c.num_employees, c.logo_url \
                    FROM jobs j JOIN companies c ON c.handle = j.company_handle \
                    WHERE j.id = $1"
                .to_string(),
            params: vec![json!(id)],
        };

        QueryBuilder::<JobDetail>::new(sql)
            .select_optional(&self.pool)
            .await?
            .ok_or_else(|| no_job(id))
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job, DatabaseError> {
        let sql = UpdateBuilder::new("jobs")
            .set("title", data.title.map(|v| json!(v)))
            .set("salary", data.salary.map(|v| json!(v)))
            .set_cast("equity", data.equity.map(|v| json!(v)), Some("numeric"))
            .build("id", json!(id), JOB_COLUMNS)?;

        let job = QueryBuilder::<Job>::new(sql)
            .select_optional(&self.pool)
            .await?
            .ok_or_else(|| no_job(id))?;

        tracing::info!(id = job.id, "job updated");
        Ok(job)
    }

    async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = SqlResult {
            query: "DELETE FROM jobs WHERE id = $1".to_string(),
            params: vec![json!(id)],
        };

        if query_builder::execute(&sql, &self.pool).await? == 0 {
            return Err(no_job(id));
        }

        tracing::info!(id, "job removed");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
