//! `grantime-chat`: the chat session behind the assistant.
//!
//! [`state`] holds the pure reducer; [`session`] wires it to a matcher and
//! a cancellable, delayed reply task running on smol.

pub mod cancel;
pub mod responder;
pub mod session;
pub mod state;

pub use cancel::CancellationToken;
pub use responder::{respond, ChatError, Latency};
pub use session::{ChatSession, PendingReply};
pub use state::{reduce, Action, ChatState, Phase, GREETING};
