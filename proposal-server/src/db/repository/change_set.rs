//! Change Set Repository

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::{ChangeStatus, ProposalChangeSet};

use super::{RepoError, RepoResult};
use crate::db::models::ChangeSetRow;

#[derive(Clone)]
pub struct ChangeSetRepository {
    pool: SqlitePool,
}

impl ChangeSetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, set: &ProposalChangeSet) -> RepoResult<()> {
        let changes = serde_json::to_string(&set.changes)
            .map_err(|e| RepoError::Database(format!("serialize changes: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO change_sets (
                id, proposal_id, changes, comment, client_name, client_email,
                status, created_at, reviewed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&set.id)
        .bind(&set.proposal_id)
        .bind(changes)
        .bind(&set.comment)
        .bind(&set.client_name)
        .bind(&set.client_email)
        .bind(set.status.as_str())
        .bind(set.created_at)
        .bind(set.reviewed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Change sets for one proposal, newest first
    pub async fn find_by_proposal(&self, proposal_id: &str) -> RepoResult<Vec<ProposalChangeSet>> {
        let rows: Vec<ChangeSetRow> = sqlx::query_as(
            "SELECT * FROM change_sets WHERE proposal_id = ? ORDER BY created_at DESC",
        )
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ChangeSetRow::into_model).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProposalChangeSet>> {
        let row: Option<ChangeSetRow> = sqlx::query_as("SELECT * FROM change_sets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ChangeSetRow::into_model).transpose()
    }

    pub async fn get(&self, id: &str) -> RepoResult<ProposalChangeSet> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Change set {} not found", id)))
    }

    /// Record the review decision. The bundle itself stays immutable —
    /// only the status transition is written.
    pub async fn set_status(&self, id: &str, status: ChangeStatus) -> RepoResult<ProposalChangeSet> {
        let result = sqlx::query("UPDATE change_sets SET status = ?, reviewed_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now().timestamp_millis())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Change set {} not found", id)));
        }
        self.get(id).await
    }
}
