//! Review eligibility integration tests

use assert_matches::assert_matches;
use EventHub::models::event::ParticipationRecord;
use EventHub::participation::{ReviewEligibility, ReviewGate};
use EventHub::EventHubError;

use crate::helpers::*;
use crate::integration::setup_integration_test;

fn joined() -> ParticipationRecord {
    serde_json::from_value(participation_json("evt-1")).unwrap()
}

#[tokio::test]
async fn test_participant_without_review_is_eligible_and_submits_once() {
    let ctx = setup_integration_test().await;
    ctx.api.mock_review_lookup("evt-1", TEST_USER_ID, vec![], MockResponseConfig::default()).await;
    ctx.api
        .mock_create_review(
            review_json("rev-1", "evt-1", TEST_USER_ID, 5, "Wonderful evening, great host"),
            MockResponseConfig::default(),
        )
        .await;

    let mut gate = ReviewGate::new(&ctx.signed_in(), "evt-1");
    assert_eq!(gate.refresh(Some(&joined())).await.unwrap(), ReviewEligibility::Eligible);
    assert!(gate.show_control());

    let created = gate.submit(5, "  Wonderful evening, great host  ").await.unwrap();
    assert_eq!(created.map(|r| r.id), Some("rev-1".to_string()));
    assert_eq!(gate.eligibility(), ReviewEligibility::AlreadyReviewed);
    assert!(!gate.show_control());

    let requests = ctx.api.server.received_requests().await.unwrap();
    let body: serde_json::Value = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/api/review")
        .expect("review should be posted")
        .body_json()
        .unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "eventId": "evt-1", "rating": 5, "comment": "Wonderful evening, great host" })
    );

    assert_matches!(
        gate.submit(4, "Trying to review a second time").await,
        Err(EventHubError::InvalidStateTransition { .. })
    );
    assert_eq!(ctx.api.request_count("POST", "/api/review").await, 1);
}

#[tokio::test]
async fn test_existing_review_hides_control() {
    let ctx = setup_integration_test().await;
    ctx.api
        .mock_review_lookup(
            "evt-1",
            TEST_USER_ID,
            vec![review_json("rev-1", "evt-1", TEST_USER_ID, 4, "Great night out")],
            MockResponseConfig::default(),
        )
        .await;

    let mut gate = ReviewGate::new(&ctx.signed_in(), "evt-1");
    assert_eq!(gate.refresh(Some(&joined())).await.unwrap(), ReviewEligibility::AlreadyReviewed);
    assert!(!gate.show_control());
}

#[tokio::test]
async fn test_lookup_failure_is_unknown_and_hidden() {
    let ctx = setup_integration_test().await;
    ctx.api
        .mock_review_lookup("evt-1", TEST_USER_ID, vec![], MockResponseConfig::failing(500, "Database unavailable"))
        .await;

    let mut gate = ReviewGate::new(&ctx.signed_in(), "evt-1");
    assert!(gate.refresh(Some(&joined())).await.is_err());
    assert_eq!(gate.eligibility(), ReviewEligibility::Unknown);
    assert!(!gate.show_control());
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let ctx = setup_integration_test().await;
    ctx.api.mock_review_lookup("evt-1", TEST_USER_ID, vec![], MockResponseConfig::default()).await;

    let mut gate = ReviewGate::new(&ctx.signed_in(), "evt-1");
    gate.refresh(Some(&joined())).await.unwrap();

    assert_matches!(gate.submit(0, "A perfectly long comment").await, Err(EventHubError::InvalidInput(_)));
    assert_matches!(gate.submit(5, "short").await, Err(EventHubError::InvalidInput(_)));
    assert_eq!(gate.eligibility(), ReviewEligibility::Eligible);
    assert_eq!(ctx.api.request_count("POST", "/api/review").await, 0);
}

#[tokio::test]
async fn test_server_rejection_keeps_control_visible() {
    let ctx = setup_integration_test().await;
    ctx.api.mock_review_lookup("evt-1", TEST_USER_ID, vec![], MockResponseConfig::default()).await;
    ctx.api
        .mock_create_review(serde_json::Value::Null, MockResponseConfig::failing(400, "You have already reviewed this host"))
        .await;

    let mut gate = ReviewGate::new(&ctx.signed_in(), "evt-1");
    gate.refresh(Some(&joined())).await.unwrap();

    let err = gate.submit(3, "It was fine overall").await.unwrap_err();
    assert_matches!(err, EventHubError::Rejected { status: 400, ref message } if message == "You have already reviewed this host");
    assert!(gate.show_control());
}
