//! Chat session state and its reducer.
//!
//! All mutation goes through [`reduce`]: it takes the current state by value
//! and returns the next one. Transitions that do not apply in the current
//! phase return the state untouched.

use chrono::{DateTime, Utc};
use grantime_core::{DecisionResult, Message, Role};

pub const GREETING: &str = "Hello! I'm your AI Compliance Assistant. I can help you check if expenses \
are compliant with your donor restrictions. Try asking something like: \
'Can we spend $5000 on emergency medical supplies?' or 'Is $2000 for office rent allowed?'";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A question is out; input is disabled until the reply lands.
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatState {
    /// Append-only transcript.
    pub messages: Vec<Message>,
    pub input: String,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetInput(String),
    Submit { at: DateTime<Utc> },
    ReceiveReply { result: DecisionResult, at: DateTime<Utc> },
    /// The session is ending while a reply is pending.
    AbandonPending,
}

impl ChatState {
    /// A fresh session opened with the assistant's greeting.
    pub fn with_greeting(at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::assistant_text(GREETING, at)],
            ..Self::default()
        }
    }

    pub fn is_input_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn can_submit(&self) -> bool {
        self.is_input_enabled() && !self.input.trim().is_empty()
    }

    /// The question currently awaiting a reply.
    pub fn pending_question(&self) -> Option<&str> {
        if self.phase != Phase::AwaitingResponse {
            return None;
        }
        self.messages
            .last()
            .filter(|m| m.role == Role::User)
            .and_then(|m| m.text())
    }
}

pub fn reduce(mut state: ChatState, action: Action) -> ChatState {
    match action {
        Action::SetInput(text) => {
            if state.is_input_enabled() {
                state.input = text;
            }
        }
        Action::Submit { at } => {
            if state.can_submit() {
                let text = std::mem::take(&mut state.input);
                log::debug!("chat: submit ({} chars)", text.len());
                state.messages.push(Message::user(text, at));
                state.phase = Phase::AwaitingResponse;
            }
        }
        Action::ReceiveReply { result, at } => {
            if state.phase == Phase::AwaitingResponse {
                log::debug!("chat: reply {} ({}%)", result.decision, result.confidence);
                state.messages.push(Message::assistant_decision(result, at));
                state.phase = Phase::Idle;
            }
        }
        Action::AbandonPending => {
            if state.phase == Phase::AwaitingResponse {
                log::debug!("chat: pending reply abandoned");
                state.phase = Phase::Idle;
            }
        }
    }
    state
}
