//! Proposal API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use shared::error::ErrorCode;
use shared::models::{
    Proposal, ProposalCreate, ProposalDataUpdate, ProposalStatus, ViewEvent,
};

use crate::auth::StaffAccess;
use crate::core::ServerState;
use crate::db::repository::{ProposalRepository, ViewRepository};
use crate::export::ExportDocument;
use crate::notify::{ApprovalEmailRequest, NotificationEvent, NotificationEventType};
use crate::pricing::recalculate;
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/proposals - all proposals, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Proposal>>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let proposals = repo.find_all().await?;
    Ok(Json(proposals))
}

/// GET /api/proposals/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Proposal>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let proposal = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::ProposalNotFound, format!("Proposal {} not found", id)))?;
    Ok(Json(proposal))
}

/// GET /api/proposals/group/{group_id} - mutually-exclusive options
pub async fn list_by_group(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> AppResult<Json<Vec<Proposal>>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let proposals = repo.find_by_group(&group_id).await?;
    Ok(Json(proposals))
}

/// POST /api/proposals - store a freshly generated proposal
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProposalCreate>,
) -> AppResult<Json<Proposal>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let now = Utc::now().timestamp_millis();
    let data = recalculate(payload.data);
    let proposal = Proposal {
        id: Uuid::new_v4().to_string(),
        proposal_group_id: payload.proposal_group_id,
        client_name: payload.client_name,
        client_email: payload.client_email,
        original_data: data.clone(),
        data,
        status: ProposalStatus::Draft,
        pending_review: false,
        has_changes: false,
        change_source: None,
        client_comment: None,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };

    let repo = ProposalRepository::new(state.db.pool.clone());
    repo.insert(&proposal).await?;

    Ok(Json(proposal))
}

/// PUT /api/proposals/{id}/data - staff edit of the working document
pub async fn update_data(
    _staff: StaffAccess,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProposalDataUpdate>,
) -> AppResult<Json<Proposal>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let data = recalculate(payload.data);
    let proposal = repo
        .save_staff_edit(&id, &data, payload.notes.as_deref())
        .await?;

    state.notify(NotificationEvent::for_proposal(
        NotificationEventType::Edit,
        &proposal,
    ));

    Ok(Json(proposal))
}

/// POST /api/proposals/{id}/approve - client approves the proposal
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Proposal>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let proposal = repo.get(&id).await?;

    if proposal.status == ProposalStatus::Approved {
        return Err(AppError::new(ErrorCode::ProposalAlreadyApproved));
    }

    state.notify(NotificationEvent::for_proposal(
        NotificationEventType::Approve,
        &proposal,
    ));

    // Approval replaces the retained snapshot with the approved document
    repo.set_status(&id, ProposalStatus::Approved).await?;
    let proposal = repo.promote_snapshot(&id).await?;

    let email = ApprovalEmailRequest::for_proposal(&proposal);
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        notifier.send_approval_email(email).await;
    });
    state.notify(NotificationEvent::for_proposal(
        NotificationEventType::Approved,
        &proposal,
    ));

    Ok(Json(proposal))
}

/// POST /api/proposals/{id}/view - record a view
pub async fn record_view(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ViewEvent>,
) -> AppResult<ApiResponse<()>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let proposals = ProposalRepository::new(state.db.pool.clone());
    let proposal = proposals.get(&id).await?;

    let views = ViewRepository::new(state.db.pool.clone());
    views.record(&id, payload.viewer_email.as_deref()).await?;

    state.notify(NotificationEvent::for_proposal(
        NotificationEventType::View,
        &proposal,
    ));

    Ok(ApiResponse::ok())
}

/// GET /api/proposals/{id}/export - rendered document + download name
pub async fn export(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ExportDocument>> {
    let repo = ProposalRepository::new(state.db.pool.clone());
    let proposal = repo.get(&id).await?;
    Ok(Json(ExportDocument::for_proposal(&proposal)))
}
