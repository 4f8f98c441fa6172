//! Payment gateway integration
//!
//! The gateway is a black box exposing one operation: confirm a card payment
//! for a client secret. [`StripeGateway`] talks to a Stripe-compatible
//! `payment_intents/{id}/confirm` endpoint with the publishable key.

use std::sync::Arc;
use std::time::Duration;
use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;
use crate::config::PaymentConfig;
use crate::utils::errors::{EventHubError, GatewayError, GatewayResult, Result};

/// Client-side payment confirmation
pub trait PaymentGateway: Send + Sync {
    /// Confirm a card payment; returns the settled intent's identifier
    ///
    /// # Errors
    ///
    /// Card-level problems come back as [`GatewayError::Card`] with the gateway's text.
    fn confirm_card_payment<'a>(
        &'a self,
        client_secret: &'a str,
        payment_method: &'a str,
    ) -> BoxFuture<'a, GatewayResult<String>>;
}

/// Intent id embedded in a client secret (`pi_123_secret_abc` -> `pi_123`)
pub fn intent_id_from_secret(client_secret: &str) -> GatewayResult<&str> {
    match client_secret.split_once("_secret_") {
        Some((id, rest)) if !id.is_empty() && !rest.is_empty() => Ok(id),
        _ => Err(GatewayError::MalformedSecret),
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Stripe-compatible gateway client
#[derive(Clone, Debug)]
pub struct StripeGateway {
    client: Client,
    base_url: Url,
    publishable_key: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Result<Self> {
        let base_url = Url::parse(&config.gateway_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(EventHubError::Http)?;

        Ok(Self {
            client,
            base_url,
            publishable_key: config.publishable_key.clone(),
        })
    }

    pub fn shared(config: &PaymentConfig) -> Result<Arc<dyn PaymentGateway>> {
        Ok(Arc::new(Self::new(config)?))
    }

    fn confirm_url(&self, intent_id: &str) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Unavailable("Gateway URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v1", "payment_intents", intent_id, "confirm"]);
        Ok(url)
    }

    async fn confirm(&self, client_secret: &str, payment_method: &str) -> GatewayResult<String> {
        if self.publishable_key.is_empty() {
            return Err(GatewayError::NotConfigured);
        }

        let intent_id = intent_id_from_secret(client_secret)?;
        let url = self.confirm_url(intent_id)?;

        debug!(intent_id = intent_id, "Confirming card payment");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.publishable_key)
            .form(&[("client_secret", client_secret), ("payment_method", payment_method)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorResponse>(&body).ok().map(|r| r.error);
            let message = error.as_ref().and_then(|e| e.message.clone());
            let is_card = status.as_u16() == 402
                || error.as_ref().and_then(|e| e.kind.as_deref()) == Some("card_error");

            warn!(intent_id = intent_id, status = status.as_u16(), message = ?message, "Gateway rejected confirmation");

            return Err(match (is_card, message) {
                (true, Some(message)) => GatewayError::Card(message),
                (true, None) => GatewayError::Card("Your card could not be charged.".to_string()),
                (false, _) if status.is_server_error() => GatewayError::Unavailable(format!("HTTP {}", status)),
                (false, Some(message)) => GatewayError::InvalidResponse(message),
                (false, None) => GatewayError::InvalidResponse(format!("HTTP {}", status)),
            });
        }

        let intent: IntentResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if intent.status != "succeeded" {
            warn!(intent_id = %intent.id, status = %intent.status, "Payment not completed");
            return Err(GatewayError::Card(format!(
                "Payment was not completed (status: {})",
                intent.status
            )));
        }

        info!(intent_id = %intent.id, "Card payment confirmed");
        Ok(intent.id)
    }
}

impl PaymentGateway for StripeGateway {
    fn confirm_card_payment<'a>(
        &'a self,
        client_secret: &'a str,
        payment_method: &'a str,
    ) -> BoxFuture<'a, GatewayResult<String>> {
        Box::pin(self.confirm(client_secret, payment_method))
    }
}
