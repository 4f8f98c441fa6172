//! Scripted payment gateway for testing
//!
//! Plays back queued outcomes in order and records every confirmation call.

use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::Mutex;
use EventHub::services::PaymentGateway;
use EventHub::utils::errors::{GatewayError, GatewayResult};

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub client_secret: String,
    pub payment_method: String,
}

#[derive(Debug, Default)]
pub struct ScriptedGateway {
    outcomes: Mutex<VecDeque<GatewayResult<String>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next confirmation's outcome
    pub fn push(&self, outcome: GatewayResult<String>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn succeed_with(&self, intent_id: &str) {
        self.push(Ok(intent_id.to_string()));
    }

    pub fn decline(&self, message: &str) {
        self.push(Err(GatewayError::Card(message.to_string())));
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl PaymentGateway for ScriptedGateway {
    fn confirm_card_payment<'a>(
        &'a self,
        client_secret: &'a str,
        payment_method: &'a str,
    ) -> BoxFuture<'a, GatewayResult<String>> {
        self.calls.lock().unwrap().push(GatewayCall {
            client_secret: client_secret.to_string(),
            payment_method: payment_method.to_string(),
        });
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Unavailable("no scripted outcome".to_string())));
        Box::pin(async move { outcome })
    }
}
