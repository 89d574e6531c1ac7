use grantime_core::{extract_amount_cents, DecisionResult, MatcherMode};
use serde::Serialize;

use crate::matcher::{ComplianceMatcher, KeywordMatcher, ScriptedMatcher};
use crate::store::GrantStore;

/// A question as the matcher sees it: the raw text plus the amount pulled
/// out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    pub text: String,
    pub amount_cents: i64,
}

impl Inquiry {
    /// Parse the amount out of `text`. Unparsable amounts become 0.
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            amount_cents: extract_amount_cents(text),
        }
    }

    /// Use an explicit amount instead of the one in the text.
    pub fn with_amount(text: &str, amount_cents: i64) -> Self {
        Self {
            text: text.to_string(),
            amount_cents,
        }
    }
}

/// Build the matcher for `mode`. The store is only consulted in keyword mode.
pub fn build_matcher(
    mode: MatcherMode,
    store: GrantStore,
    seed: Option<u64>,
) -> Box<dyn ComplianceMatcher> {
    log::debug!("building {mode} matcher over {} grant(s)", store.len());
    match mode {
        MatcherMode::Scripted => Box::new(ScriptedMatcher::default()),
        MatcherMode::Keyword => match seed {
            Some(seed) => Box::new(KeywordMatcher::seeded(store, seed)),
            None => Box::new(KeywordMatcher::new(store)),
        },
    }
}

/// Run one inquiry through a matcher.
pub fn evaluate(matcher: &dyn ComplianceMatcher, inquiry: &Inquiry) -> DecisionResult {
    matcher.evaluate(&inquiry.text, inquiry.amount_cents)
}
