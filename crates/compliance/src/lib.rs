//! `grantime-compliance`: grant store and mock compliance matchers.
//!
//! Pure engine crate: receives a question and an amount, returns a decision.
//! The only IO is loading a grant fixture file on request.

pub mod engine;
pub mod error;
pub mod fixtures;
pub mod matcher;
pub mod scripts;
pub mod store;

pub use engine::{build_matcher, evaluate, Inquiry};
pub use error::ComplianceError;
pub use matcher::{ComplianceMatcher, KeywordMatcher, ScriptedMatcher};
pub use store::{GrantStore, StoreTotals};
