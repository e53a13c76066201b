//! View Tracking Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::RepoResult;

#[derive(Clone)]
pub struct ViewRepository {
    pool: SqlitePool,
}

impl ViewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one proposal view
    pub async fn record(&self, proposal_id: &str, viewer_email: Option<&str>) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO proposal_views (id, proposal_id, viewer_email, viewed_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(proposal_id)
        .bind(viewer_email)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn count_for_proposal(&self, proposal_id: &str) -> RepoResult<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM proposal_views WHERE proposal_id = ?")
                .bind(proposal_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }
}
