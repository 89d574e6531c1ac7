use std::cmp::Reverse;
use std::ops::RangeInclusive;

use grantime_core::{Alternative, Citation, Decision, DecisionResult, GrantRecord};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scripts::{demo_scripts, find_script, keyword_scripts, placeholder, DemoScript};
use crate::store::GrantStore;

pub const YES_CONFIDENCE: RangeInclusive<u8> = 85..=99;
pub const NO_CONFIDENCE: RangeInclusive<u8> = 90..=99;
pub const CONDITIONAL_CONFIDENCE: RangeInclusive<u8> = 70..=89;

/// Maximum number of alternative funds offered with a decision.
const MAX_ALTERNATIVES: usize = 2;

/// Maps a question and its requested amount to a decision.
///
/// Never fails: anything the matcher does not understand still produces a
/// result.
pub trait ComplianceMatcher: Send + Sync {
    fn evaluate(&self, query: &str, amount_cents: i64) -> DecisionResult;

    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Keyword matcher
// ---------------------------------------------------------------------------

/// Rule-based matcher over a grant store.
///
/// Demo scripts are checked first; otherwise funds are split into those whose
/// allowed keywords appear in the question (and can cover the amount) and
/// those whose prohibited keywords appear, and the decision follows from
/// which of the two sets are empty.
pub struct KeywordMatcher {
    store: GrantStore,
    scripts: Vec<DemoScript>,
    rng: Mutex<StdRng>,
}

impl KeywordMatcher {
    pub fn new(store: GrantStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Deterministic confidence scores for a given seed.
    pub fn seeded(store: GrantStore, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: GrantStore, rng: StdRng) -> Self {
        Self {
            store,
            scripts: keyword_scripts(),
            rng: Mutex::new(rng),
        }
    }

    fn roll(&self, range: RangeInclusive<u8>) -> u8 {
        self.rng.lock().gen_range(range)
    }
}

impl ComplianceMatcher for KeywordMatcher {
    fn evaluate(&self, query: &str, amount_cents: i64) -> DecisionResult {
        let query_lower = query.to_lowercase();

        if let Some(script) = find_script(&self.scripts, &query_lower, amount_cents) {
            log::debug!("keyword matcher: demo script '{}'", script.name);
            return script.response();
        }

        let grants = self.store.grants();
        let matching: Vec<&GrantRecord> = grants
            .iter()
            .filter(|g| g.allows(&query_lower) && g.can_cover(amount_cents))
            .collect();
        let prohibited: Vec<&GrantRecord> =
            grants.iter().filter(|g| g.prohibits(&query_lower)).collect();

        log::debug!(
            "keyword matcher: {} matching, {} prohibited fund(s) for {} cents",
            matching.len(),
            prohibited.len(),
            amount_cents
        );

        match (matching.is_empty(), prohibited.is_empty()) {
            (false, true) => {
                // Richest fund; ties keep store order.
                let best = matching
                    .iter()
                    .min_by_key(|g| Reverse(g.available_cents))
                    .copied()
                    .unwrap_or(matching[0]);
                let mut r = DecisionResult::new(
                    Decision::Yes,
                    self.roll(YES_CONFIDENCE),
                    format!("This expense is compliant and can be funded from the {}.", best.donor),
                );
                r.fund_source = Some(best.fund_ref());
                r.citations = restriction_citations(best);
                r
            }
            (true, _) => {
                let mut r = DecisionResult::new(
                    Decision::No,
                    self.roll(NO_CONFIDENCE),
                    "No funding sources found that specifically allow this type of expense with sufficient funds.",
                );
                r.citations = prohibited
                    .first()
                    .map(|g| restriction_citations(g))
                    .unwrap_or_default();
                r.alternatives = grants
                    .iter()
                    .filter(|g| g.can_cover(amount_cents) && g.is_unrestricted())
                    .take(MAX_ALTERNATIVES)
                    .map(|g| Alternative::from_fund(&g.fund_ref()))
                    .collect();
                r
            }
            (false, false) => {
                let mut r = DecisionResult::new(
                    Decision::Conditional,
                    self.roll(CONDITIONAL_CONFIDENCE),
                    "Some restrictions apply. Manual review recommended.",
                );
                r.fund_source = Some(matching[0].fund_ref());
                r.citations = restriction_citations(prohibited[0]);
                r.alternatives = matching
                    .iter()
                    .skip(1)
                    .take(MAX_ALTERNATIVES)
                    .map(|g| Alternative::from_fund(&g.fund_ref()))
                    .collect();
                r
            }
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

fn restriction_citations(grant: &GrantRecord) -> Vec<Citation> {
    grant
        .restrictions
        .iter()
        .map(|s| Citation::Plain(s.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Scripted matcher
// ---------------------------------------------------------------------------

/// Literal demo matcher: a scripted scenario or the placeholder, nothing else.
pub struct ScriptedMatcher {
    scripts: Vec<DemoScript>,
}

impl Default for ScriptedMatcher {
    fn default() -> Self {
        Self { scripts: demo_scripts() }
    }
}

impl ComplianceMatcher for ScriptedMatcher {
    fn evaluate(&self, query: &str, amount_cents: i64) -> DecisionResult {
        let query_lower = query.to_lowercase();
        match find_script(&self.scripts, &query_lower, amount_cents) {
            Some(script) => {
                log::debug!("scripted matcher: demo script '{}'", script.name);
                script.response()
            }
            None => {
                log::debug!("scripted matcher: no script for {} cents, placeholder", amount_cents);
                placeholder()
            }
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
