use std::path::PathBuf;

use grantime_compliance::scripts::{demo_scripts, placeholder, SHELTER_SETUP, SUBSTANCE_ABUSE_RESEARCH};
use grantime_compliance::{
    build_matcher, evaluate, ComplianceError, ComplianceMatcher, GrantStore, Inquiry, KeywordMatcher,
    ScriptedMatcher,
};
use grantime_core::{Decision, MatcherMode};
use proptest::prelude::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_store() -> GrantStore {
    GrantStore::load_file(&fixtures_dir().join("grants.toml")).unwrap()
}

// -------------------------------------------------------------------------
// Store loading
// -------------------------------------------------------------------------

#[test]
fn loads_fixture_file() {
    let store = fixture_store();
    assert_eq!(store.len(), 2);
    assert_eq!(store.grants()[0].donor, "Riverside Food Bank Trust");
    assert!(store.get(11).unwrap().is_unrestricted());
}

#[test]
fn overdrawn_fixture_is_rejected() {
    let err = GrantStore::load_file(&fixtures_dir().join("overdrawn.toml")).unwrap_err();
    assert!(matches!(err, ComplianceError::BalanceExceedsTotal { id: 1, .. }));
    assert!(err.to_string().contains("exceeds total"));
}

#[test]
fn missing_file_is_io_error() {
    let err = GrantStore::load_file(&fixtures_dir().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ComplianceError::Io(_)));
}

#[test]
fn store_written_to_disk_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.toml");
    std::fs::write(&path, toml::to_string(&GrantStore::builtin()).unwrap()).unwrap();
    assert_eq!(GrantStore::load_file(&path).unwrap(), GrantStore::builtin());
}

// -------------------------------------------------------------------------
// Keyword policy over a custom store
// -------------------------------------------------------------------------

#[test]
fn custom_store_drives_keyword_decisions() {
    let m = KeywordMatcher::seeded(fixture_store(), 42);

    // Both grants allow meals; Youth Futures has the larger balance.
    let yes = evaluate(&m, &Inquiry::parse("Can we spend $500 on meals?"));
    assert_eq!(yes.decision, Decision::Yes);
    assert_eq!(yes.fund_source.unwrap().donor, "Youth Futures Fund");

    // Food is allowed, vehicle is prohibited by the same trust.
    let cond = evaluate(&m, &Inquiry::parse("a vehicle for food delivery, $2,000"));
    assert_eq!(cond.decision, Decision::Conditional);
    assert_eq!(cond.citations[0].text(), "Food security programs only");

    // Nothing allows it; the unrestricted fund is offered instead.
    let no = evaluate(&m, &Inquiry::parse("office chairs for $300"));
    assert_eq!(no.decision, Decision::No);
    assert_eq!(no.alternatives.len(), 1);
    assert_eq!(no.alternatives[0].donor, "Youth Futures Fund");
}

// -------------------------------------------------------------------------
// Scripted demo
// -------------------------------------------------------------------------

#[test]
fn scripted_demo_returns_canned_result_unchanged() {
    let m = build_matcher(MatcherMode::Scripted, GrantStore::builtin(), None);

    let shelter = Inquiry::parse(
        "Can we use $15,000 from the Healthcare Foundation grant for emergency shelter setup?",
    );
    assert_eq!(evaluate(m.as_ref(), &shelter), SHELTER_SETUP.response());

    let research = Inquiry::parse("We want $10,000 for research on substance abuse treatment.");
    assert_eq!(evaluate(m.as_ref(), &research), SUBSTANCE_ABUSE_RESEARCH.response());
}

#[test]
fn scripted_demo_is_amount_exact() {
    let m = ScriptedMatcher::default();
    let r = m.evaluate(
        "Can we use $15,001 from the Healthcare Foundation grant for emergency shelter setup?",
        1_500_100,
    );
    assert_eq!(r, placeholder());
}

proptest! {
    #[test]
    fn scripted_matcher_answers_unknown_to_everything_else(
        text in "[a-z ]{0,60}",
        amount in 0i64..100_000_000,
    ) {
        let m = ScriptedMatcher::default();
        let lower = text.to_lowercase();
        prop_assume!(!demo_scripts().iter().any(|s| s.matches(&lower, amount)));

        let r = m.evaluate(&text, amount);
        prop_assert_eq!(r.decision, Decision::Unknown);
        prop_assert_eq!(r.confidence, 0);
        prop_assert!(r.citations.is_empty());
        prop_assert!(r.alternatives.is_empty());
    }

    #[test]
    fn keyword_results_respect_policy_bounds(
        words in proptest::collection::vec(
            prop_oneof![
                Just("emergency"), Just("medical"), Just("shelter"), Just("food"),
                Just("office"), Just("salaries"), Just("construction"), Just("rent"),
                Just("van"), Just("for"), Just("the"),
            ],
            0..8,
        ),
        amount in 0i64..10_000_000,
        seed in any::<u64>(),
    ) {
        let m = KeywordMatcher::seeded(GrantStore::builtin(), seed);
        let text = words.join(" ");
        let r = m.evaluate(&text, amount);

        prop_assert!(r.alternatives.len() <= 2);
        match r.decision {
            Decision::Yes => {
                prop_assert!((85..=99).contains(&r.confidence));
                let fund = r.fund_source.as_ref().unwrap();
                prop_assert!(fund.available_cents >= amount);
            }
            Decision::No => {
                prop_assert!((90..=99).contains(&r.confidence));
                prop_assert!(r.fund_source.is_none());
                for alt in &r.alternatives {
                    prop_assert!(alt.available_cents >= amount);
                }
            }
            Decision::Conditional => {
                prop_assert!((70..=89).contains(&r.confidence));
                prop_assert!(r.fund_source.is_some());
                prop_assert!(!r.citations.is_empty());
            }
            Decision::Unknown => prop_assert!(false, "keyword matcher never answers UNKNOWN"),
        }
    }
}
