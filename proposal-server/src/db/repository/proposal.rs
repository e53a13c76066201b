//! Proposal Repository

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::{ChangeSource, Proposal, ProposalData, ProposalStatus};

use super::{RepoError, RepoResult};
use crate::db::models::ProposalRow;

fn to_json(data: &ProposalData) -> RepoResult<String> {
    serde_json::to_string(data).map_err(|e| RepoError::Database(format!("serialize proposal: {e}")))
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Clone)]
pub struct ProposalRepository {
    pool: SqlitePool,
}

impl ProposalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All proposals, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Proposal>> {
        let rows: Vec<ProposalRow> =
            sqlx::query_as("SELECT * FROM proposals ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(ProposalRow::into_model).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Proposal>> {
        let row: Option<ProposalRow> = sqlx::query_as("SELECT * FROM proposals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ProposalRow::into_model).transpose()
    }

    /// Fetch a proposal or fail with NotFound
    pub async fn get(&self, id: &str) -> RepoResult<Proposal> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Proposal {} not found", id)))
    }

    /// Mutually-exclusive proposal options presented together
    pub async fn find_by_group(&self, group_id: &str) -> RepoResult<Vec<Proposal>> {
        let rows: Vec<ProposalRow> = sqlx::query_as(
            "SELECT * FROM proposals WHERE proposal_group_id = ? ORDER BY created_at ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ProposalRow::into_model).collect()
    }

    /// Insert a freshly generated proposal. `data` and `original_data`
    /// start identical — the snapshot is the document as first sent.
    pub async fn insert(&self, proposal: &Proposal) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO proposals (
                id, proposal_group_id, client_name, client_email,
                data, original_data, status, pending_review, has_changes,
                change_source, client_comment, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&proposal.id)
        .bind(&proposal.proposal_group_id)
        .bind(&proposal.client_name)
        .bind(&proposal.client_email)
        .bind(to_json(&proposal.data)?)
        .bind(to_json(&proposal.original_data)?)
        .bind(proposal.status.as_str())
        .bind(proposal.pending_review)
        .bind(proposal.has_changes)
        .bind(proposal.change_source.map(|s| s.as_str()))
        .bind(&proposal.client_comment)
        .bind(&proposal.notes)
        .bind(proposal.created_at)
        .bind(proposal.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Staff edit: replace the working document, snapshot untouched
    pub async fn save_staff_edit(
        &self,
        id: &str,
        data: &ProposalData,
        notes: Option<&str>,
    ) -> RepoResult<Proposal> {
        let result = sqlx::query(
            r#"
            UPDATE proposals
            SET data = ?, notes = COALESCE(?, notes), change_source = ?,
                has_changes = 1, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(to_json(data)?)
        .bind(notes)
        .bind(ChangeSource::Staff.as_str())
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Proposal {} not found", id)));
        }
        self.get(id).await
    }

    /// Client submission: replace the working document and flag it for
    /// review; the retained snapshot stays as the diff baseline
    pub async fn save_client_submission(
        &self,
        id: &str,
        data: &ProposalData,
        comment: Option<&str>,
    ) -> RepoResult<Proposal> {
        let result = sqlx::query(
            r#"
            UPDATE proposals
            SET data = ?, change_source = ?, client_comment = ?,
                pending_review = 1, has_changes = 1, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(to_json(data)?)
        .bind(ChangeSource::Client.as_str())
        .bind(comment)
        .bind(ProposalStatus::Pending.as_str())
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Proposal {} not found", id)));
        }
        self.get(id).await
    }

    /// Replace the snapshot with the current document and clear the review
    /// flags (change-set approval, proposal approval)
    pub async fn promote_snapshot(&self, id: &str) -> RepoResult<Proposal> {
        sqlx::query(
            r#"
            UPDATE proposals
            SET original_data = data, pending_review = 0, has_changes = 0, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.get(id).await
    }

    /// Restore the working document from the snapshot and clear the review
    /// flags (change-set rejection)
    pub async fn restore_snapshot(&self, id: &str) -> RepoResult<Proposal> {
        sqlx::query(
            r#"
            UPDATE proposals
            SET data = original_data, pending_review = 0, has_changes = 0, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.get(id).await
    }

    pub async fn set_status(&self, id: &str, status: ProposalStatus) -> RepoResult<Proposal> {
        let result = sqlx::query("UPDATE proposals SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(now_millis())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Proposal {} not found", id)));
        }
        self.get(id).await
    }
}
