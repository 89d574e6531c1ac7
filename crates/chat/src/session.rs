use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use grantime_compliance::{ComplianceMatcher, Inquiry};
use grantime_core::{DecisionResult, Message};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cancel::CancellationToken;
use crate::responder::{respond, ChatError, Latency};
use crate::state::{reduce, Action, ChatState, Phase};

/// A reply in flight. Await [`PendingReply::finish`] and hand the outcome
/// back to [`ChatSession::resolve`].
pub struct PendingReply {
    pub inquiry: Inquiry,
    pub delay: Duration,
    token: CancellationToken,
    task: smol::Task<Result<DecisionResult, ChatError>>,
}

impl PendingReply {
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub async fn finish(self) -> Result<DecisionResult, ChatError> {
        self.task.await
    }
}

/// One user's conversation: reducer state plus the matcher that answers it.
///
/// Dropping a session while a reply is pending cancels that reply.
pub struct ChatSession {
    state: ChatState,
    matcher: Arc<dyn ComplianceMatcher>,
    latency: Latency,
    rng: StdRng,
    pending: Option<CancellationToken>,
}

impl ChatSession {
    pub fn new(matcher: Arc<dyn ComplianceMatcher>, latency: Latency) -> Self {
        Self::with_rng(matcher, latency, StdRng::from_entropy())
    }

    /// Reproducible latency draws.
    pub fn seeded(matcher: Arc<dyn ComplianceMatcher>, latency: Latency, seed: u64) -> Self {
        Self::with_rng(matcher, latency, StdRng::seed_from_u64(seed))
    }

    fn with_rng(matcher: Arc<dyn ComplianceMatcher>, latency: Latency, rng: StdRng) -> Self {
        log::info!("chat session started ({} matcher)", matcher.name());
        Self {
            state: ChatState::with_greeting(Utc::now()),
            matcher,
            latency,
            rng,
            pending: None,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.state.phase == Phase::AwaitingResponse
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetInput(text.into()));
    }

    /// Submit the current input.
    ///
    /// Returns `None` (and changes nothing) if the input is blank or a reply
    /// is already pending.
    pub fn submit(&mut self) -> Option<PendingReply> {
        self.submit_at(Utc::now())
    }

    pub fn submit_at(&mut self, at: DateTime<Utc>) -> Option<PendingReply> {
        if !self.state.can_submit() {
            return None;
        }
        self.dispatch(Action::Submit { at });

        let inquiry = Inquiry::parse(self.state.pending_question()?);
        let delay = self.latency.sample(&mut self.rng);
        let token = CancellationToken::new();
        log::debug!("reply scheduled in {:?} for {} cents", delay, inquiry.amount_cents);

        let task = smol::spawn(respond(
            Arc::clone(&self.matcher),
            inquiry.clone(),
            delay,
            token.clone(),
        ));
        self.pending = Some(token.clone());

        Some(PendingReply { inquiry, delay, token, task })
    }

    /// Apply the outcome of a pending reply.
    pub fn resolve(&mut self, outcome: Result<DecisionResult, ChatError>) {
        self.resolve_at(outcome, Utc::now());
    }

    pub fn resolve_at(&mut self, outcome: Result<DecisionResult, ChatError>, at: DateTime<Utc>) {
        self.pending = None;
        match outcome {
            Ok(result) => self.dispatch(Action::ReceiveReply { result, at }),
            Err(ChatError::Cancelled) => self.dispatch(Action::AbandonPending),
        }
    }

    /// Cancel the pending reply, if any. The reply task resolves promptly
    /// with [`ChatError::Cancelled`].
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Type, submit, and wait for the reply in one step.
    ///
    /// Returns the assistant message, or `Ok(None)` if the text was blank or
    /// a reply was already pending.
    pub async fn ask(&mut self, text: &str) -> Result<Option<&Message>, ChatError> {
        self.set_input(text);
        let Some(pending) = self.submit() else {
            return Ok(None);
        };
        let outcome = pending.finish().await;
        let cancelled = outcome.is_err();
        self.resolve(outcome);
        if cancelled {
            return Err(ChatError::Cancelled);
        }
        Ok(self.state.messages.last())
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            log::info!("chat session ended with a reply pending; cancelling");
            token.cancel();
        }
    }
}
