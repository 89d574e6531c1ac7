//! `grantime-core`: shared types for the compliance assistant.
//!
//! Plain data: grant records, decision results, chat messages, and the
//! money helpers every front end needs. No IO.

pub mod decision;
pub mod grant;
pub mod message;
pub mod money;

pub use decision::{Alternative, Citation, CitationRef, Decision, DecisionResult, FundRef, MatcherMode};
pub use grant::{AgreementFile, GrantPartner, GrantRecord, PartnerStatus};
pub use message::{Message, MessageContent, Role};
pub use money::{extract_amount_cents, format_cad, parse_amount_cents};
