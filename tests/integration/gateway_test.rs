//! Stripe-compatible gateway integration tests

use serde_json::json;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use EventHub::config::PaymentConfig;
use EventHub::services::{PaymentGateway, StripeGateway};
use EventHub::GatewayError;

const SECRET: &str = "pi_123_secret_abc";

async fn gateway() -> (MockServer, StripeGateway) {
    let server = MockServer::start().await;
    let config = PaymentConfig {
        gateway_url: server.uri(),
        publishable_key: "pk_test_123".to_string(),
        timeout_seconds: 2,
    };
    let gateway = StripeGateway::new(&config).unwrap();
    (server, gateway)
}

#[tokio::test]
async fn test_confirm_succeeds() {
    let (server, gateway) = gateway().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents/pi_123/confirm"))
        .and(header("authorization", "Bearer pk_test_123"))
        .and(body_string_contains("payment_method=pm_card_visa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "pi_123", "status": "succeeded" })))
        .expect(1)
        .mount(&server)
        .await;

    let intent_id = gateway.confirm_card_payment(SECRET, "pm_card_visa").await.unwrap();
    assert_eq!(intent_id, "pi_123");
}

#[tokio::test]
async fn test_card_error_is_passed_through() {
    let (server, gateway) = gateway().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents/pi_123/confirm"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": { "type": "card_error", "code": "card_declined", "message": "Your card was declined." }
        })))
        .mount(&server)
        .await;

    let result = gateway.confirm_card_payment(SECRET, "pm_card_chargeDeclined").await;
    assert_eq!(result, Err(GatewayError::Card("Your card was declined.".to_string())));
}

#[tokio::test]
async fn test_incomplete_intent_is_card_error() {
    let (server, gateway) = gateway().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents/pi_123/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "pi_123", "status": "requires_action" })))
        .mount(&server)
        .await;

    let result = gateway.confirm_card_payment(SECRET, "pm_card_threeDSecure2Required").await;
    assert_eq!(
        result,
        Err(GatewayError::Card("Payment was not completed (status: requires_action)".to_string()))
    );
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let (server, gateway) = gateway().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents/pi_123/confirm"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = gateway.confirm_card_payment(SECRET, "pm_card_visa").await;
    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}

#[tokio::test]
async fn test_malformed_secret_is_not_sent() {
    let (server, gateway) = gateway().await;

    let result = gateway.confirm_card_payment("not-a-secret", "pm_card_visa").await;
    assert_eq!(result, Err(GatewayError::MalformedSecret));
    assert!(server.received_requests().await.unwrap().is_empty());
}
