//! Database row types
//!
//! Raw rows as stored (JSON documents as TEXT), converted to the shared
//! models at the repository boundary.

use shared::models::{
    ChangeSource, ChangeStatus, Proposal, ProposalChangeSet, ProposalStatus,
};

use super::repository::{RepoError, RepoResult};

/// Raw `proposals` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProposalRow {
    pub id: String,
    pub proposal_group_id: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub data: String,
    pub original_data: String,
    pub status: String,
    pub pending_review: bool,
    pub has_changes: bool,
    pub change_source: Option<String>,
    pub client_comment: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProposalRow {
    /// Parse the JSON document columns and enumerated strings
    pub fn into_model(self) -> RepoResult<Proposal> {
        let data = serde_json::from_str(&self.data)
            .map_err(|e| RepoError::Corrupt(format!("proposal {} data: {e}", self.id)))?;
        let original_data = serde_json::from_str(&self.original_data)
            .map_err(|e| RepoError::Corrupt(format!("proposal {} original_data: {e}", self.id)))?;
        let status = ProposalStatus::parse_str(&self.status)
            .ok_or_else(|| RepoError::Corrupt(format!("proposal {} status: {}", self.id, self.status)))?;
        let change_source = match self.change_source.as_deref() {
            None => None,
            Some(s) => Some(
                ChangeSource::parse_str(s)
                    .ok_or_else(|| RepoError::Corrupt(format!("proposal {} change_source: {s}", self.id)))?,
            ),
        };

        Ok(Proposal {
            id: self.id,
            proposal_group_id: self.proposal_group_id,
            client_name: self.client_name,
            client_email: self.client_email,
            data,
            original_data,
            status,
            pending_review: self.pending_review,
            has_changes: self.has_changes,
            change_source,
            client_comment: self.client_comment,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Raw `change_sets` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChangeSetRow {
    pub id: String,
    pub proposal_id: String,
    pub changes: String,
    pub comment: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
}

impl ChangeSetRow {
    pub fn into_model(self) -> RepoResult<ProposalChangeSet> {
        let changes = serde_json::from_str(&self.changes)
            .map_err(|e| RepoError::Corrupt(format!("change set {} changes: {e}", self.id)))?;
        let status = ChangeStatus::parse_str(&self.status)
            .ok_or_else(|| RepoError::Corrupt(format!("change set {} status: {}", self.id, self.status)))?;

        Ok(ProposalChangeSet {
            id: self.id,
            proposal_id: self.proposal_id,
            changes,
            comment: self.comment,
            client_name: self.client_name,
            client_email: self.client_email,
            status,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        })
    }
}
