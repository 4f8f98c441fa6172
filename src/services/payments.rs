//! Payment service
//!
//! Creates payment intents for fee-based joins and asks the server to verify
//! settlement after the gateway confirmed the card payment.

use tracing::{debug, info};
use crate::models::event::EventRecord;
use crate::models::payment::{
    CreatePaymentData, CreatePaymentRequest, PaymentIntent, PaymentVerification, VerifyPaymentRequest,
};
use crate::utils::errors::{EventHubError, Result};
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct PaymentService {
    api: ApiClient,
}

impl PaymentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Request a fresh payment intent for an event
    pub async fn create_intent(&self, event: &EventRecord) -> Result<PaymentIntent> {
        debug!(event_id = %event.id, "Creating payment intent");

        let body = CreatePaymentRequest { event_id: &event.id };
        let data: CreatePaymentData = self
            .api
            .post(&["payments"], Some(&body))
            .await?
            .ok_or_else(|| EventHubError::rejected(200, Some("Payment intent was not returned".to_string())))?;

        if data.client_secret.trim().is_empty() {
            return Err(EventHubError::rejected(200, Some("Payment intent was not returned".to_string())));
        }

        let intent = PaymentIntent {
            client_secret: data.client_secret,
            amount: data.amount.unwrap_or(event.joining_fee),
        };

        info!(event_id = %event.id, amount = intent.amount, "Payment intent created");
        Ok(intent)
    }

    /// Server-side settlement check for a gateway-confirmed intent
    pub async fn verify(&self, payment_intent_id: &str) -> Result<PaymentVerification> {
        debug!(payment_intent_id = payment_intent_id, "Verifying payment");

        let body = VerifyPaymentRequest { payment_intent_id };
        let verification = self
            .api
            .post::<_, PaymentVerification>(&["payments", "verify"], Some(&body))
            .await?
            .unwrap_or_default();

        info!(payment_intent_id = payment_intent_id, event_id = ?verification.event_id, "Payment verified");
        Ok(verification)
    }
}
