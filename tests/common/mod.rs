#![allow(dead_code)]

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use uuid::Uuid;

use jobly_api::database::DatabaseManager;

/// An isolated copy of the jobly tables in a throwaway schema, seeded with
/// companies c1..c3 and jobs Job1..Job4 (all under c1).
pub struct TestDb {
    pub pool: PgPool,
    pub job_ids: Vec<i32>,
    schema: String,
    admin_pool: PgPool,
}

impl TestDb {
    /// None when DATABASE_URL is not set; callers skip the test
    pub async fn setup() -> Result<Option<Self>> {
        let _ = dotenvy::dotenv();
        let Ok(database_url) = DatabaseManager::database_url() else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return Ok(None);
        };

        let admin_pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .context("failed to connect to DATABASE_URL")?;

        let schema = format!("test_{}", Uuid::new_v4().simple());
        admin_pool
            .execute(format!("CREATE SCHEMA \"{}\"", schema).as_str())
            .await?;

        let search_path = schema.clone();
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let sql = format!("SET search_path TO \"{}\"", search_path);
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&database_url)
            .await?;

        DatabaseManager::migrate(&pool).await?;

        let mut db = Self {
            pool,
            job_ids: vec![],
            schema,
            admin_pool,
        };
        db.seed().await?;
        Ok(Some(db))
    }

    async fn seed(&mut self) -> Result<()> {
        sqlx::query(
            "INSERT INTO companies (handle, name, num_employees, description, logo_url)
             VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
                    ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
                    ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
        )
        .execute(&self.pool)
        .await?;

        let jobs: [(&str, Option<i32>, Option<&str>); 4] = [
            ("Job1", Some(100), Some("0.1")),
            ("Job2", Some(200), Some("0.2")),
            ("Job3", Some(300), Some("0")),
            ("Job4", None, None),
        ];
        for (title, salary, equity) in jobs {
            let id: i32 = sqlx::query_scalar(
                "INSERT INTO jobs (title, salary, equity, company_handle)
                 VALUES ($1, $2, $3::numeric, 'c1')
                 RETURNING id",
            )
            .bind(title)
            .bind(salary)
            .bind(equity)
            .fetch_one(&self.pool)
            .await?;
            self.job_ids.push(id);
        }
        Ok(())
    }

    /// Drop the schema. Not run when a test panics; leftover test_* schemas
    /// are safe to drop by hand.
    pub async fn cleanup(self) -> Result<()> {
        self.pool.close().await;
        self.admin_pool
            .execute(format!("DROP SCHEMA \"{}\" CASCADE", self.schema).as_str())
            .await?;
        self.admin_pool.close().await;
        Ok(())
    }
}
