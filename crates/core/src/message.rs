use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decision::DecisionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Decision(Box<DecisionResult>),
}

/// One entry in a chat transcript. Never edited once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
            timestamp,
        }
    }

    pub fn assistant_text(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
            timestamp,
        }
    }

    pub fn assistant_decision(result: DecisionResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Decision(Box::new(result)),
            timestamp,
        }
    }

    pub fn decision(&self) -> Option<&DecisionResult> {
        match &self.content {
            MessageContent::Decision(d) => Some(d),
            MessageContent::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(t) => Some(t),
            MessageContent::Decision(_) => None,
        }
    }
}
