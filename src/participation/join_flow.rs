//! Join and payment orchestration
//!
//! A [`JoinFlow`] drives one viewer through joining one event:
//!
//! ```text
//! Idle -> ConfirmPending -> FreeJoining ---------------------------> Joined
//!                        \-> PaymentCreating -> PaymentConfirming
//!                                            -> PaymentVerifying -> Joined
//! ```
//!
//! Steps are sequential and every mutating method takes `&mut self`, so a
//! second submission cannot start while one is in flight. `Joined` is only
//! reached after the server acknowledged the participation (free join) or the
//! settlement (paid join). A verification that fails after the card was
//! charged lands in `Failed` with [`JoinFailure::VerificationPending`] and is
//! never reported as joined.

use std::sync::Arc;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;
use crate::models::event::{EventRecord, ParticipationRecord};
use crate::models::payment::{PaymentIntent, PaymentVerification};
use crate::services::{intent_id_from_secret, EventService, PaymentGateway, PaymentService};
use crate::state::context::{AppContext, ViewerContext};
use crate::utils::errors::{EventHubError, JoinFailure, Result, GENERIC_REJECTION, VERIFICATION_PENDING};
use crate::utils::logging::{log_join_transition, log_payment_step, log_viewer_action};
use super::gate::GateVerdict;

/// Discriminant of [`JoinState`], published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPhase {
    Idle,
    ConfirmPending,
    FreeJoining,
    PaymentCreating,
    PaymentConfirming,
    PaymentVerifying,
    Joined,
    Failed,
}

impl JoinPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinPhase::Idle => "idle",
            JoinPhase::ConfirmPending => "confirm_pending",
            JoinPhase::FreeJoining => "free_joining",
            JoinPhase::PaymentCreating => "payment_creating",
            JoinPhase::PaymentConfirming => "payment_confirming",
            JoinPhase::PaymentVerifying => "payment_verifying",
            JoinPhase::Joined => "joined",
            JoinPhase::Failed => "failed",
        }
    }

    /// A network call is outstanding
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            JoinPhase::FreeJoining | JoinPhase::PaymentCreating | JoinPhase::PaymentVerifying
        )
    }
}

impl std::fmt::Display for JoinPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The server's answer when participation is re-read after a join
#[derive(Debug, Clone, PartialEq)]
pub enum ParticipationRefetch {
    Found(ParticipationRecord),
    /// The server answered "not joined"
    NotFound,
    /// No answer was observed
    Failed,
}

impl ParticipationRefetch {
    pub fn record(&self) -> Option<&ParticipationRecord> {
        match self {
            ParticipationRefetch::Found(record) => Some(record),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinState {
    Idle,
    ConfirmPending {
        fee: f64,
    },
    FreeJoining,
    PaymentCreating,
    PaymentConfirming {
        intent: PaymentIntent,
    },
    PaymentVerifying {
        intent_id: String,
    },
    /// `event` and `participation` are the post-join refetch; `event` is
    /// `None` when its refetch failed
    Joined {
        event: Option<EventRecord>,
        participation: ParticipationRefetch,
        verification: Option<PaymentVerification>,
    },
    Failed {
        failure: JoinFailure,
    },
}

impl JoinState {
    pub fn phase(&self) -> JoinPhase {
        match self {
            JoinState::Idle => JoinPhase::Idle,
            JoinState::ConfirmPending { .. } => JoinPhase::ConfirmPending,
            JoinState::FreeJoining => JoinPhase::FreeJoining,
            JoinState::PaymentCreating => JoinPhase::PaymentCreating,
            JoinState::PaymentConfirming { .. } => JoinPhase::PaymentConfirming,
            JoinState::PaymentVerifying { .. } => JoinPhase::PaymentVerifying,
            JoinState::Joined { .. } => JoinPhase::Joined,
            JoinState::Failed { .. } => JoinPhase::Failed,
        }
    }
}

/// One viewer's attempt at joining one event
pub struct JoinFlow {
    viewer: ViewerContext,
    events: EventService,
    payments: PaymentService,
    gateway: Arc<dyn PaymentGateway>,
    event: EventRecord,
    state: JoinState,
    attempt_id: String,
    phase_tx: watch::Sender<JoinPhase>,
}

impl JoinFlow {
    /// Open a flow on the event snapshot the viewer is looking at
    pub fn new(context: &AppContext, event: EventRecord) -> Self {
        let (phase_tx, _) = watch::channel(JoinPhase::Idle);
        Self {
            viewer: context.viewer.clone(),
            events: context.services.events.clone(),
            payments: context.services.payments.clone(),
            gateway: Arc::clone(&context.services.gateway),
            event,
            state: JoinState::Idle,
            attempt_id: Uuid::new_v4().to_string(),
            phase_tx,
        }
    }

    pub fn state(&self) -> &JoinState {
        &self.state
    }

    pub fn phase(&self) -> JoinPhase {
        self.state.phase()
    }

    pub fn event(&self) -> &EventRecord {
        &self.event
    }

    /// Correlation id carried by every log line of this attempt
    pub fn attempt_id(&self) -> &str {
        &self.attempt_id
    }

    /// Observe phase changes, including those made while a call is pending
    pub fn subscribe(&self) -> watch::Receiver<JoinPhase> {
        self.phase_tx.subscribe()
    }

    /// Whether the join control may accept input
    pub fn join_control_enabled(&self) -> bool {
        !self.phase().is_in_flight() && self.phase() != JoinPhase::Joined
    }

    /// The intent awaiting card confirmation, if any
    pub fn payment_intent(&self) -> Option<&PaymentIntent> {
        match &self.state {
            JoinState::PaymentConfirming { intent } => Some(intent),
            _ => None,
        }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.state, JoinState::Joined { .. })
    }

    /// The viewer pressed the join control
    pub fn request_join(&mut self, verdict: &GateVerdict) -> Result<JoinPhase> {
        self.expect_phase(JoinPhase::Idle, JoinPhase::ConfirmPending)?;
        let viewer = self.viewer.require_viewer("join events")?;

        if !verdict.join_enabled {
            return Err(JoinFailure::Rejected(verdict.reason.message().to_string()).into());
        }

        log_viewer_action(&viewer.id, "request_join", &self.event.id, None);
        let fee = self.event.joining_fee;
        self.transition(JoinState::ConfirmPending { fee });
        Ok(self.phase())
    }

    /// The viewer accepted the confirmation
    ///
    /// Free events are joined directly. Paid events stop in
    /// `PaymentConfirming` waiting for [`JoinFlow::submit_payment`].
    pub async fn confirm(&mut self) -> Result<JoinPhase> {
        let fee = match self.state {
            JoinState::ConfirmPending { fee } => fee,
            _ => return Err(self.invalid_transition(JoinPhase::ConfirmPending)),
        };

        if fee <= 0.0 {
            self.join_free().await
        } else {
            self.create_payment().await
        }
    }

    /// Confirm the card payment with the gateway and verify it with the server
    ///
    /// A card decline leaves the flow in `PaymentConfirming` so the viewer can
    /// fix the card and retry against the same intent.
    pub async fn submit_payment(&mut self, payment_method: &str) -> Result<JoinPhase> {
        let intent = match &self.state {
            JoinState::PaymentConfirming { intent } => intent.clone(),
            _ => return Err(self.invalid_transition(JoinPhase::PaymentVerifying)),
        };

        if payment_method.trim().is_empty() {
            return Err(EventHubError::InvalidInput("Card details are incomplete".to_string()));
        }

        let confirmed = self
            .gateway
            .confirm_card_payment(&intent.client_secret, payment_method)
            .await;

        let intent_id = match confirmed {
            Ok(id) => id,
            Err(e) => {
                let error = EventHubError::Gateway(e);
                log_payment_step(&self.attempt_id, &self.event.id, "confirm", false, Some(&error.to_string()));
                return Err(JoinFailure::classify(&error).into());
            }
        };
        log_payment_step(&self.attempt_id, &self.event.id, "confirm", true, None);

        // The gateway may answer with an empty id; the secret still names the intent
        let intent_id = if intent_id.is_empty() {
            match intent_id_from_secret(&intent.client_secret) {
                Ok(id) => id.to_string(),
                Err(e) => {
                    warn!(attempt_id = %self.attempt_id, event_id = %self.event.id, error = %e, "No intent id to verify");
                    let failure = JoinFailure::Rejected(GENERIC_REJECTION.to_string());
                    self.transition(JoinState::Failed { failure: failure.clone() });
                    return Err(failure.into());
                }
            }
        } else {
            intent_id
        };

        self.transition(JoinState::PaymentVerifying { intent_id: intent_id.clone() });

        match self.payments.verify(&intent_id).await {
            Ok(verification) => {
                log_payment_step(&self.attempt_id, &self.event.id, "verify", true, None);
                self.finish_join(Some(verification)).await;
                Ok(self.phase())
            }
            Err(e) => {
                warn!(
                    attempt_id = %self.attempt_id,
                    event_id = %self.event.id,
                    intent_id = %intent_id,
                    error = %e,
                    "Card charged but payment verification failed"
                );
                log_payment_step(&self.attempt_id, &self.event.id, "verify", false, Some(&e.to_string()));
                let failure = JoinFailure::VerificationPending(VERIFICATION_PENDING.to_string());
                self.transition(JoinState::Failed { failure: failure.clone() });
                Err(failure.into())
            }
        }
    }

    /// Close the dialog; an outstanding intent is abandoned, never reused
    pub fn dismiss(&mut self) -> JoinPhase {
        match self.phase() {
            JoinPhase::Joined | JoinPhase::Idle => {}
            phase if phase.is_in_flight() => {
                warn!(attempt_id = %self.attempt_id, phase = %phase, "Dismiss ignored while a call is pending");
            }
            _ => {
                if self.payment_intent().is_some() {
                    info!(attempt_id = %self.attempt_id, event_id = %self.event.id, "Payment intent abandoned");
                }
                self.transition(JoinState::Idle);
                self.attempt_id = Uuid::new_v4().to_string();
            }
        }
        self.phase()
    }

    async fn join_free(&mut self) -> Result<JoinPhase> {
        self.transition(JoinState::FreeJoining);

        match self.events.participate(&self.event.id).await {
            Ok(()) => {
                self.finish_join(None).await;
                Ok(self.phase())
            }
            Err(e) => {
                warn!(attempt_id = %self.attempt_id, event_id = %self.event.id, error = %e, "Free join failed");
                self.transition(JoinState::Idle);
                Err(JoinFailure::classify(&e).into())
            }
        }
    }

    async fn create_payment(&mut self) -> Result<JoinPhase> {
        self.transition(JoinState::PaymentCreating);

        match self.payments.create_intent(&self.event).await {
            Ok(intent) => {
                log_payment_step(&self.attempt_id, &self.event.id, "create_intent", true, None);
                self.transition(JoinState::PaymentConfirming { intent });
                Ok(self.phase())
            }
            Err(e) => {
                log_payment_step(&self.attempt_id, &self.event.id, "create_intent", false, Some(&e.to_string()));
                self.transition(JoinState::Idle);
                Err(JoinFailure::classify(&e).into())
            }
        }
    }

    /// Refetch event and participation once the server acknowledged the join
    async fn finish_join(&mut self, verification: Option<PaymentVerification>) {
        let event = match self.events.fetch_event(&self.event.id).await {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(attempt_id = %self.attempt_id, event_id = %self.event.id, error = %e, "Event refetch after join failed");
                None
            }
        };

        let participation = match self.events.check_participation(&self.event.id).await {
            Ok(Some(record)) => ParticipationRefetch::Found(record),
            Ok(None) => {
                warn!(attempt_id = %self.attempt_id, event_id = %self.event.id, "Join acknowledged but no participation record yet");
                ParticipationRefetch::NotFound
            }
            Err(e) => {
                warn!(attempt_id = %self.attempt_id, event_id = %self.event.id, error = %e, "Participation refetch after join failed");
                ParticipationRefetch::Failed
            }
        };

        if let Some(event) = &event {
            self.event = event.clone();
        }

        info!(attempt_id = %self.attempt_id, event_id = %self.event.id, "Viewer joined event");
        self.transition(JoinState::Joined { event, participation, verification });
    }

    fn transition(&mut self, next: JoinState) {
        let from = self.phase();
        let to = next.phase();
        log_join_transition(&self.attempt_id, &self.event.id, from.as_str(), to.as_str());
        self.state = next;
        self.phase_tx.send_replace(to);
    }

    fn expect_phase(&self, expected: JoinPhase, to: JoinPhase) -> Result<()> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.invalid_transition(to))
        }
    }

    fn invalid_transition(&self, to: JoinPhase) -> EventHubError {
        EventHubError::InvalidStateTransition {
            from: self.phase().to_string(),
            to: to.to_string(),
        }
    }
}

impl std::fmt::Debug for JoinFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinFlow")
            .field("event_id", &self.event.id)
            .field("attempt_id", &self.attempt_id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
