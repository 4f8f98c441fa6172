//! Payment models

use serde::{Deserialize, Serialize};

/// Gateway-issued intent authorizing one client-side confirmation
#[derive(Clone, PartialEq)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub amount: f64,
}

impl std::fmt::Debug for PaymentIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentIntent")
            .field("client_secret", &"<redacted>")
            .field("amount", &self.amount)
            .finish()
    }
}

/// `POST /payments` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest<'a> {
    pub event_id: &'a str,
}

/// `POST /payments` response data
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentData {
    pub client_secret: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// `POST /payments/verify` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest<'a> {
    pub payment_intent_id: &'a str,
}

/// Server acknowledgement that a payment settled
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}
