//! Local durable store: a SQLite mirror of the simulated backend's data.
//!
//! Rows hold the serialized entity plus the columns needed for point
//! lookups (id, slug/status/order, email/job/stage). The store is written
//! reactively from backend responses and read only at startup seeding.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::Result;
use crate::models::assessment::{Assessment, AssessmentResponse};
use crate::models::candidate::Candidate;
use crate::models::job::Job;

#[derive(Clone)]
pub struct DurableStore {
    pool: SqlitePool,
}

impl DurableStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    /// An in-memory store for tests. A single persistent connection keeps
    /// the database alive for the pool's lifetime.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| crate::error::Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(Self { pool })
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    pub async fn upsert_job(&self, job: &Job) -> Result<()> {
        Self::put_job(&self.pool, job).await
    }

    pub async fn bulk_upsert_jobs(&self, jobs: &[Job]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for job in jobs {
            Self::put_job(&mut *tx, job).await?;
        }
        tx.commit().await?;
        debug!(count = jobs.len(), "persisted jobs");
        Ok(())
    }

    async fn put_job<'e, E>(executor: E, job: &Job) -> Result<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            "INSERT INTO jobs (id, slug, status, sort_order, data)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 slug = excluded.slug,
                 status = excluded.status,
                 sort_order = excluded.sort_order,
                 data = excluded.data",
        )
        .bind(job.id.to_string())
        .bind(&job.slug)
        .bind(job.status.as_str())
        .bind(job.order)
        .bind(serde_json::to_string(job)?)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn load_jobs(&self) -> Result<Vec<Job>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT data FROM jobs ORDER BY sort_order")
            .fetch_all(&self.pool)
            .await?;
        decode_rows(rows)
    }

    // ------------------------------------------------------------------
    // Candidates
    // ------------------------------------------------------------------

    pub async fn upsert_candidate(&self, candidate: &Candidate) -> Result<()> {
        Self::put_candidate(&self.pool, candidate).await
    }

    pub async fn bulk_upsert_candidates(&self, candidates: &[Candidate]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for candidate in candidates {
            Self::put_candidate(&mut *tx, candidate).await?;
        }
        tx.commit().await?;
        debug!(count = candidates.len(), "persisted candidates");
        Ok(())
    }

    async fn put_candidate<'e, E>(executor: E, candidate: &Candidate) -> Result<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            "INSERT INTO candidates (id, email, job_id, stage, data)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 email = excluded.email,
                 job_id = excluded.job_id,
                 stage = excluded.stage,
                 data = excluded.data",
        )
        .bind(candidate.id.to_string())
        .bind(&candidate.email)
        .bind(candidate.job_id.map(|id| id.to_string()))
        .bind(candidate.stage.as_str())
        .bind(serde_json::to_string(candidate)?)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn load_candidates(&self) -> Result<Vec<Candidate>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT data FROM candidates")
            .fetch_all(&self.pool)
            .await?;
        decode_rows(rows)
    }

    // ------------------------------------------------------------------
    // Assessments
    // ------------------------------------------------------------------

    pub async fn upsert_assessment(&self, assessment: &Assessment) -> Result<()> {
        Self::put_assessment(&self.pool, assessment).await
    }

    pub async fn bulk_upsert_assessments(&self, assessments: &[Assessment]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for assessment in assessments {
            Self::put_assessment(&mut *tx, assessment).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn put_assessment<'e, E>(executor: E, assessment: &Assessment) -> Result<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            "INSERT INTO assessments (id, job_id, data)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 job_id = excluded.job_id,
                 data = excluded.data",
        )
        .bind(assessment.id.to_string())
        .bind(assessment.job_id.map(|id| id.to_string()))
        .bind(serde_json::to_string(assessment)?)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn load_assessments(&self) -> Result<Vec<Assessment>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT data FROM assessments")
            .fetch_all(&self.pool)
            .await?;
        decode_rows(rows)
    }

    // ------------------------------------------------------------------
    // Assessment responses
    // ------------------------------------------------------------------

    pub async fn upsert_response(&self, response: &AssessmentResponse) -> Result<()> {
        sqlx::query(
            "INSERT INTO assessment_responses (id, assessment_id, candidate_id, data)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        )
        .bind(response.id.to_string())
        .bind(response.assessment_id.to_string())
        .bind(response.candidate_id.to_string())
        .bind(serde_json::to_string(response)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn load_responses(&self) -> Result<Vec<AssessmentResponse>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT data FROM assessment_responses")
            .fetch_all(&self.pool)
            .await?;
        decode_rows(rows)
    }
}

fn decode_rows<T: serde::de::DeserializeOwned>(rows: Vec<String>) -> Result<Vec<T>> {
    rows.iter()
        .map(|data| serde_json::from_str(data).map_err(Into::into))
        .collect()
}
