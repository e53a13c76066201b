//! End-to-end proposal lifecycle over a temporary database:
//! create → client submission (recalculate + diff + change set) →
//! review → approval, plus the schema-missing error mapping.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use proposal_server::db::DbService;
use proposal_server::db::repository::{
    ChangeSetRepository, ProposalRepository, RepoError, ViewRepository,
};
use proposal_server::pricing::recalculate;
use proposal_server::tracking::track_proposal_changes;
use shared::models::{
    ChangeStatus, ChangeType, DateData, LocationData, Proposal, ProposalChangeSet, ProposalData,
    ProposalStatus, Service, ServiceType, Submitter,
};

async fn open_db() -> (TempDir, DbService) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("proposals.db");
    let db = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open database");
    (dir, db)
}

fn sample_data() -> ProposalData {
    let mut service = Service::new(ServiceType::Massage);
    service.total_hours = Some(2.0);
    service.num_pros = Some(3);
    service.hourly_rate = Some(150.0);

    let mut data = ProposalData {
        client_name: "Acme".to_string(),
        client_email: Some("ops@acme.com".to_string()),
        event_dates: vec!["2025-06-01".to_string()],
        locations: vec!["Boston".to_string()],
        ..Default::default()
    };
    let mut dates = LocationData::new();
    dates.insert(
        "2025-06-01".to_string(),
        DateData {
            services: vec![service],
            ..Default::default()
        },
    );
    data.services.insert("Boston".to_string(), dates);
    recalculate(data)
}

fn sample_proposal() -> Proposal {
    let data = sample_data();
    Proposal {
        id: "prop-1".to_string(),
        proposal_group_id: Some("group-1".to_string()),
        client_name: "Acme".to_string(),
        client_email: Some("ops@acme.com".to_string()),
        original_data: data.clone(),
        data,
        status: ProposalStatus::Draft,
        pending_review: false,
        has_changes: false,
        change_source: None,
        client_comment: None,
        notes: None,
        created_at: 1,
        updated_at: 1,
    }
}

#[tokio::test]
async fn proposal_roundtrip() {
    let (_dir, db) = open_db().await;
    let repo = ProposalRepository::new(db.pool.clone());

    repo.insert(&sample_proposal()).await.unwrap();

    let loaded = repo.get("prop-1").await.unwrap();
    assert_eq!(loaded.client_name, "Acme");
    assert_eq!(loaded.status, ProposalStatus::Draft);
    assert_eq!(loaded.data.summary.total_cost, 900.0);
    assert_eq!(loaded.data, loaded.original_data);

    let by_group = repo.find_by_group("group-1").await.unwrap();
    assert_eq!(by_group.len(), 1);

    assert!(repo.find_by_id("missing").await.unwrap().is_none());
    assert!(matches!(
        repo.get("missing").await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn client_submission_and_rejection_restores_snapshot() {
    let (_dir, db) = open_db().await;
    let proposals = ProposalRepository::new(db.pool.clone());
    let change_sets = ChangeSetRepository::new(db.pool.clone());

    proposals.insert(&sample_proposal()).await.unwrap();
    let proposal = proposals.get("prop-1").await.unwrap();

    // Client bumps the professional count
    let mut edited = proposal.data.clone();
    edited
        .services
        .get_mut("Boston")
        .unwrap()
        .get_mut("2025-06-01")
        .unwrap()
        .services[0]
        .num_pros = Some(5);
    let edited = recalculate(edited);

    let submitter = Submitter {
        client_name: Some("Dana".to_string()),
        client_email: Some("dana@acme.com".to_string()),
    };
    let changes = track_proposal_changes(&proposal.original_data, &edited, &submitter);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, ChangeType::Update);

    let set = ProposalChangeSet {
        id: "set-1".to_string(),
        proposal_id: "prop-1".to_string(),
        changes,
        comment: Some("More coverage please".to_string()),
        client_name: submitter.client_name.clone(),
        client_email: submitter.client_email.clone(),
        status: ChangeStatus::Pending,
        created_at: 2,
        reviewed_at: None,
    };
    change_sets.insert(&set).await.unwrap();
    let updated = proposals
        .save_client_submission("prop-1", &edited, set.comment.as_deref())
        .await
        .unwrap();

    assert!(updated.pending_review);
    assert!(updated.has_changes);
    assert_eq!(updated.status, ProposalStatus::Pending);
    assert_eq!(
        updated.data.services["Boston"]["2025-06-01"].services[0].num_pros,
        Some(5)
    );
    // The snapshot is still the diff baseline
    assert_eq!(
        updated.original_data.services["Boston"]["2025-06-01"].services[0].num_pros,
        Some(3)
    );

    // Rejection restores the document from the snapshot
    let reviewed = change_sets
        .set_status("set-1", ChangeStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(reviewed.status, ChangeStatus::Rejected);
    assert!(reviewed.reviewed_at.is_some());

    let restored = proposals.restore_snapshot("prop-1").await.unwrap();
    assert!(!restored.pending_review);
    assert!(!restored.has_changes);
    assert_eq!(
        restored.data.services["Boston"]["2025-06-01"].services[0].num_pros,
        Some(3)
    );
}

#[tokio::test]
async fn approval_promotes_snapshot() {
    let (_dir, db) = open_db().await;
    let proposals = ProposalRepository::new(db.pool.clone());

    proposals.insert(&sample_proposal()).await.unwrap();

    let mut edited = sample_data();
    edited.client_name = "Acme Corp".to_string();
    proposals
        .save_client_submission("prop-1", &recalculate(edited), None)
        .await
        .unwrap();

    proposals
        .set_status("prop-1", ProposalStatus::Approved)
        .await
        .unwrap();
    let approved = proposals.promote_snapshot("prop-1").await.unwrap();

    assert_eq!(approved.status, ProposalStatus::Approved);
    assert!(!approved.pending_review);
    assert_eq!(approved.original_data.client_name, "Acme Corp");
    assert_eq!(approved.data, approved.original_data);
}

#[tokio::test]
async fn change_sets_listed_newest_first() {
    let (_dir, db) = open_db().await;
    let proposals = ProposalRepository::new(db.pool.clone());
    let change_sets = ChangeSetRepository::new(db.pool.clone());

    proposals.insert(&sample_proposal()).await.unwrap();
    for (id, created_at) in [("set-old", 10), ("set-new", 20)] {
        change_sets
            .insert(&ProposalChangeSet {
                id: id.to_string(),
                proposal_id: "prop-1".to_string(),
                changes: vec![],
                comment: None,
                client_name: None,
                client_email: None,
                status: ChangeStatus::Pending,
                created_at,
                reviewed_at: None,
            })
            .await
            .unwrap();
    }

    let sets = change_sets.find_by_proposal("prop-1").await.unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].id, "set-new");
    assert_eq!(sets[1].id, "set-old");
}

#[tokio::test]
async fn view_tracking_counts() {
    let (_dir, db) = open_db().await;
    let proposals = ProposalRepository::new(db.pool.clone());
    let views = ViewRepository::new(db.pool.clone());

    proposals.insert(&sample_proposal()).await.unwrap();
    views.record("prop-1", Some("dana@acme.com")).await.unwrap();
    views.record("prop-1", None).await.unwrap();

    assert_eq!(views.count_for_proposal("prop-1").await.unwrap(), 2);
}

#[tokio::test]
async fn missing_schema_maps_to_distinct_error() {
    // A database that never had migrations applied: the repository must
    // surface the dedicated schema-missing error, not a generic failure
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .unwrap()
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let repo = ProposalRepository::new(pool);
    assert!(matches!(
        repo.find_all().await,
        Err(RepoError::SchemaMissing)
    ));
}
