//! Change Tracking API Handlers
//!
//! A submission recalculates the edited document, diffs it against the
//! retained snapshot, and persists the resulting change set for review.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use shared::error::ErrorCode;
use shared::models::{
    ChangeStatus, ChangeSubmission, ProposalChange, ProposalChangeSet, ReviewDecision, Submitter,
};

use crate::auth::StaffAccess;
use crate::core::ServerState;
use crate::db::repository::{ChangeSetRepository, ProposalRepository};
use crate::notify::{NotificationEvent, NotificationEventType};
use crate::pricing::recalculate;
use crate::tracking::{change_display_info, track_proposal_changes, ChangeDisplayInfo};
use crate::utils::{AppError, AppResult};

/// One change with its rendered display strings
#[derive(Debug, Clone, Serialize)]
pub struct ChangeView {
    #[serde(flatten)]
    pub change: ProposalChange,
    pub display: ChangeDisplayInfo,
}

/// A change set with every change rendered for display
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSetView {
    pub id: String,
    pub proposal_id: String,
    pub comment: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub status: ChangeStatus,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
    pub changes: Vec<ChangeView>,
}

impl From<ProposalChangeSet> for ChangeSetView {
    fn from(set: ProposalChangeSet) -> Self {
        Self {
            id: set.id,
            proposal_id: set.proposal_id,
            comment: set.comment,
            client_name: set.client_name,
            client_email: set.client_email,
            status: set.status,
            created_at: set.created_at,
            reviewed_at: set.reviewed_at,
            changes: set
                .changes
                .into_iter()
                .map(|change| ChangeView {
                    display: change_display_info(&change),
                    change,
                })
                .collect(),
        }
    }
}

/// POST /api/proposals/{id}/changes - client submits an edited document
pub async fn submit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangeSubmission>,
) -> AppResult<Json<ProposalChangeSet>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let proposals = ProposalRepository::new(state.db.pool.clone());
    let proposal = proposals.get(&id).await?;

    let submitter = Submitter {
        client_name: payload.client_name.clone(),
        client_email: payload.client_email.clone(),
    };
    let data = recalculate(payload.data);
    let changes = track_proposal_changes(&proposal.original_data, &data, &submitter);
    if changes.is_empty() {
        return Err(AppError::new(ErrorCode::NoChangesDetected));
    }

    let set = ProposalChangeSet {
        id: Uuid::new_v4().to_string(),
        proposal_id: id.clone(),
        changes,
        comment: payload.comment,
        client_name: payload.client_name,
        client_email: payload.client_email,
        status: ChangeStatus::Pending,
        created_at: Utc::now().timestamp_millis(),
        reviewed_at: None,
    };

    let change_sets = ChangeSetRepository::new(state.db.pool.clone());
    change_sets.insert(&set).await?;
    let proposal = proposals
        .save_client_submission(&id, &data, set.comment.as_deref())
        .await?;

    state.notify(NotificationEvent::for_proposal(
        NotificationEventType::ChangesSubmitted,
        &proposal,
    ));

    Ok(Json(set))
}

/// GET /api/proposals/{id}/changes - change sets with display rendering
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ChangeSetView>>> {
    let proposals = ProposalRepository::new(state.db.pool.clone());
    proposals.get(&id).await?;

    let change_sets = ChangeSetRepository::new(state.db.pool.clone());
    let sets = change_sets.find_by_proposal(&id).await?;
    Ok(Json(sets.into_iter().map(ChangeSetView::from).collect()))
}

/// POST /api/change-sets/{id}/review - staff approves or rejects a set
pub async fn review(
    _staff: StaffAccess,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(decision): Json<ReviewDecision>,
) -> AppResult<Json<ChangeSetView>> {
    let change_sets = ChangeSetRepository::new(state.db.pool.clone());
    let set = change_sets.get(&id).await?;

    if set.status != ChangeStatus::Pending {
        return Err(AppError::new(ErrorCode::ChangeSetAlreadyReviewed));
    }

    let proposals = ProposalRepository::new(state.db.pool.clone());
    let set = if decision.approve {
        // Approval makes the edited document the new snapshot
        let set = change_sets.set_status(&id, ChangeStatus::Approved).await?;
        proposals.promote_snapshot(&set.proposal_id).await?;
        set
    } else {
        // Rejection restores the document from the snapshot
        let set = change_sets.set_status(&id, ChangeStatus::Rejected).await?;
        proposals.restore_snapshot(&set.proposal_id).await?;
        set
    };

    Ok(Json(ChangeSetView::from(set)))
}
