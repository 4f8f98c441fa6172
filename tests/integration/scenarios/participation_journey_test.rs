//! Participation journey scenarios

use assert_matches::assert_matches;
use chrono::NaiveDate;
use EventHub::participation::{GateReason, JoinPhase, ReviewEligibility};
use EventHub::state::EventView;
use EventHub::{EventHubError, JoinFailure};

use crate::helpers::*;
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_free_join_takes_last_spot() {
    let ctx = setup_integration_test().await;
    let event = EventJson::open("evt-last").spots(9, 10).fee(0.0);

    ctx.api.mock_get_event(event.build(), MockResponseConfig::default().once()).await;
    ctx.api.mock_get_event(event.clone().spots(10, 10).build(), MockResponseConfig::default()).await;
    ctx.api.mock_participation("evt-last", None, MockResponseConfig::default().once()).await;
    ctx.api
        .mock_participation("evt-last", Some(participation_json("evt-last")), MockResponseConfig::default())
        .await;
    ctx.api.mock_participate("evt-last", MockResponseConfig::default()).await;
    ctx.api.mock_favorites(&[], MockResponseConfig::default()).await;
    ctx.api.mock_host_reviews("evt-last", vec![], MockResponseConfig::default()).await;
    ctx.api.mock_review_lookup("evt-last", TEST_USER_ID, vec![], MockResponseConfig::default()).await;

    let mut view = EventView::load(ctx.signed_in(), "evt-last").await.unwrap();
    assert_eq!(view.verdict().reason, GateReason::Joinable);
    assert!(!view.review_control_visible());

    let mut flow = view.begin_join().unwrap();
    assert_eq!(flow.confirm().await.unwrap(), JoinPhase::Joined);
    assert!(view.apply_join(&flow).await);

    assert_eq!(view.event().current_participants, 10);
    assert!(view.has_joined());
    assert_eq!(view.verdict().reason, GateReason::AlreadyJoined);
    assert!(view.review_control_visible());
    assert_eq!(ctx.api.request_count("POST", "/api/payments").await, 0);

    let other_viewer = EventView::load(ctx.anonymous(), "evt-last").await.unwrap();
    assert_eq!(other_viewer.verdict().reason, GateReason::Full);
    assert!(!other_viewer.verdict().join_enabled);
}

#[tokio::test]
async fn test_paid_join_with_failed_verification_leaves_no_participation() {
    let ctx = setup_integration_test().await;
    let event = EventJson::open("evt-paid").fee(25.0);

    ctx.api.mock_get_event(event.build(), MockResponseConfig::default()).await;
    ctx.api.mock_participation("evt-paid", None, MockResponseConfig::default()).await;
    ctx.api.mock_favorites(&[], MockResponseConfig::default()).await;
    ctx.api.mock_host_reviews("evt-paid", vec![], MockResponseConfig::default()).await;
    ctx.api
        .mock_create_payment("evt-paid", "pi_777_secret_s", 25.0, MockResponseConfig::default())
        .await;
    ctx.api
        .mock_verify_payment("pi_777", "evt-paid", MockResponseConfig::delayed(2_500))
        .await;
    ctx.gateway.succeed_with("pi_777");

    let mut view = EventView::load(ctx.signed_in(), "evt-paid").await.unwrap();
    let mut flow = view.begin_join().unwrap();

    assert_eq!(flow.confirm().await.unwrap(), JoinPhase::PaymentConfirming);
    assert_eq!(flow.payment_intent().map(|i| i.amount), Some(25.0));

    let err = flow.submit_payment("pm_card_visa").await.unwrap_err();
    assert_matches!(err, EventHubError::Join(JoinFailure::VerificationPending(_)));
    assert_eq!(flow.phase(), JoinPhase::Failed);

    assert!(!view.apply_join(&flow).await);
    view.refresh().await.unwrap();
    assert!(!view.has_joined());
    assert!(view.participation().is_none());
    assert_eq!(view.verdict().reason, GateReason::Joinable);
}

#[tokio::test]
async fn test_seven_pm_event_window() {
    let ctx = setup_integration_test().await;
    let event = EventJson::open("evt-tonight").date("2025-06-01").time(Some("7PM"));

    ctx.api.mock_get_event(event.build(), MockResponseConfig::default()).await;
    ctx.api.mock_participation("evt-tonight", None, MockResponseConfig::default()).await;
    ctx.api.mock_favorites(&[], MockResponseConfig::default()).await;
    ctx.api.mock_host_reviews("evt-tonight", vec![], MockResponseConfig::default()).await;

    let view = EventView::load(ctx.signed_in(), "evt-tonight").await.unwrap();
    let window = view.window().expect("window should resolve");
    let june_first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    assert_eq!(window.start, june_first.and_hms_opt(19, 0, 0).unwrap());
    assert_eq!(window.end, june_first.and_hms_milli_opt(23, 59, 59, 999).unwrap());
    assert!(window.time_precise);

    assert_eq!(view.verdict().reason, GateReason::Joinable);
    let midnight = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(view.verdict_at(midnight).reason, GateReason::Ended);
}

#[tokio::test]
async fn test_participant_reviews_once() {
    let ctx = setup_integration_test().await;
    let posted = review_json("rev-1", "evt-done", TEST_USER_ID, 5, "Fantastic night of dancing");

    ctx.api.mock_get_event(EventJson::open("evt-done").build(), MockResponseConfig::default()).await;
    ctx.api
        .mock_participation("evt-done", Some(participation_json("evt-done")), MockResponseConfig::default())
        .await;
    ctx.api.mock_favorites(&[], MockResponseConfig::default()).await;
    ctx.api
        .mock_review_lookup("evt-done", TEST_USER_ID, vec![], MockResponseConfig::default().once())
        .await;
    ctx.api
        .mock_review_lookup("evt-done", TEST_USER_ID, vec![posted.clone()], MockResponseConfig::default())
        .await;
    ctx.api.mock_host_reviews("evt-done", vec![], MockResponseConfig::default().once()).await;
    ctx.api.mock_host_reviews("evt-done", vec![posted.clone()], MockResponseConfig::default()).await;
    ctx.api.mock_create_review(posted, MockResponseConfig::default()).await;

    let mut view = EventView::load(ctx.signed_in(), "evt-done").await.unwrap();
    assert_eq!(view.review_eligibility(), ReviewEligibility::Eligible);
    assert!(view.review_control_visible());
    assert!(view.host_reviews().is_empty());

    view.submit_review(5, "Fantastic night of dancing").await.unwrap();
    assert!(!view.review_control_visible());
    assert_eq!(view.host_reviews().len(), 1);

    let reloaded = EventView::load(ctx.signed_in(), "evt-done").await.unwrap();
    assert_eq!(reloaded.review_eligibility(), ReviewEligibility::AlreadyReviewed);
    assert!(!reloaded.review_control_visible());
}
