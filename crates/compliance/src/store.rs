use std::collections::HashSet;
use std::path::Path;

use grantime_core::GrantRecord;
use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;
use crate::fixtures::builtin_grants;

/// Read-only set of grant agreements the matchers consult.
///
/// Order is significant: "first matching fund" and alternative lists follow
/// the order grants appear in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantStore {
    grants: Vec<GrantRecord>,
}

/// Portfolio totals across every grant in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreTotals {
    pub grants: usize,
    pub amount_cents: i64,
    pub available_cents: i64,
}

impl Default for GrantStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GrantStore {
    /// The four mock agreements shipped with the assistant.
    pub fn builtin() -> Self {
        Self { grants: builtin_grants() }
    }

    /// Build a store from records, rejecting anything that breaks the
    /// store invariants.
    pub fn new(grants: Vec<GrantRecord>) -> Result<Self, ComplianceError> {
        let store = Self { grants };
        store.validate()?;
        Ok(store)
    }

    pub fn from_toml(input: &str) -> Result<Self, ComplianceError> {
        let parsed: GrantStore =
            toml::from_str(input).map_err(|e| ComplianceError::FixtureParse(e.to_string()))?;
        Self::new(parsed.grants)
    }

    pub fn load_file(path: &Path) -> Result<Self, ComplianceError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ComplianceError::Io(format!("{}: {e}", path.display())))?;
        let store = Self::from_toml(&contents)?;
        log::debug!("loaded {} grant(s) from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn validate(&self) -> Result<(), ComplianceError> {
        if self.grants.is_empty() {
            return Err(ComplianceError::FixtureValidation(
                "at least 1 grant is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut total_cents: i64 = 0;
        for g in &self.grants {
            if !seen.insert(g.id) {
                return Err(ComplianceError::DuplicateGrant(g.id));
            }
            if g.donor.trim().is_empty() {
                return Err(ComplianceError::FixtureValidation(format!(
                    "grant {}: donor must not be blank",
                    g.id
                )));
            }
            if g.amount_cents < 0 || g.available_cents < 0 {
                return Err(ComplianceError::FixtureValidation(format!(
                    "grant {}: amounts must not be negative",
                    g.id
                )));
            }
            if g.available_cents > g.amount_cents {
                return Err(ComplianceError::BalanceExceedsTotal {
                    id: g.id,
                    available_cents: g.available_cents,
                    amount_cents: g.amount_cents,
                });
            }
            // available <= amount per grant, so this bounds both totals.
            total_cents = total_cents.checked_add(g.amount_cents).ok_or_else(|| {
                ComplianceError::FixtureValidation(format!(
                    "grant {}: total awarded across grants exceeds {} cents",
                    g.id,
                    i64::MAX
                ))
            })?;
        }

        Ok(())
    }

    pub fn grants(&self) -> &[GrantRecord] {
        &self.grants
    }

    pub fn get(&self, id: u32) -> Option<&GrantRecord> {
        self.grants.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn totals(&self) -> StoreTotals {
        StoreTotals {
            grants: self.grants.len(),
            amount_cents: self.grants.iter().fold(0, |acc, g| acc.saturating_add(g.amount_cents)),
            available_cents: self
                .grants
                .iter()
                .fold(0, |acc, g| acc.saturating_add(g.available_cents)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_GRANT: &str = r#"
[[grants]]
id = 9
donor = "Arts Council"
amount_cents = 500000
available_cents = 125000
restrictions = ["Arts programming only"]
allowed_categories = ["arts", "music"]
"#;

    #[test]
    fn parses_minimal_grant() {
        let store = GrantStore::from_toml(ONE_GRANT).unwrap();
        assert_eq!(store.len(), 1);
        let g = store.get(9).unwrap();
        assert_eq!(g.donor, "Arts Council");
        assert!(g.prohibited_categories.is_empty());
    }

    #[test]
    fn rejects_overdrawn_grant() {
        let toml = ONE_GRANT.replace("available_cents = 125000", "available_cents = 600000");
        match GrantStore::from_toml(&toml) {
            Err(ComplianceError::BalanceExceedsTotal { id, .. }) => assert_eq!(id, 9),
            other => panic!("expected BalanceExceedsTotal, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let toml = format!("{ONE_GRANT}\n{ONE_GRANT}");
        assert!(matches!(
            GrantStore::from_toml(&toml),
            Err(ComplianceError::DuplicateGrant(9))
        ));
    }

    #[test]
    fn rejects_empty_store() {
        assert!(matches!(
            GrantStore::from_toml("grants = []"),
            Err(ComplianceError::FixtureValidation(_))
        ));
    }

    #[test]
    fn rejects_blank_donor() {
        let toml = ONE_GRANT.replace("donor = \"Arts Council\"", "donor = \"  \"");
        match GrantStore::from_toml(&toml) {
            Err(ComplianceError::FixtureValidation(msg)) => assert!(msg.contains("donor")),
            other => panic!("expected FixtureValidation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_balance() {
        let toml = ONE_GRANT.replace("available_cents = 125000", "available_cents = -1");
        match GrantStore::from_toml(&toml) {
            Err(ComplianceError::FixtureValidation(msg)) => assert!(msg.contains("negative")),
            other => panic!("expected FixtureValidation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_totals_that_overflow() {
        let big = i64::MAX / 2 + 1;
        let grant = |id| GrantRecord {
            id,
            donor: format!("Fund {id}"),
            amount_cents: big,
            available_cents: big,
            restrictions: Vec::new(),
            allowed_categories: Vec::new(),
            prohibited_categories: Vec::new(),
        };
        assert!(GrantStore::new(vec![grant(1)]).is_ok());
        assert!(matches!(
            GrantStore::new(vec![grant(1), grant(2)]),
            Err(ComplianceError::FixtureValidation(_))
        ));
    }

    #[test]
    fn new_applies_the_same_rules_as_toml() {
        let store = GrantStore::new(builtin_grants()).unwrap();
        assert_eq!(store, GrantStore::builtin());
        assert!(matches!(GrantStore::new(Vec::new()), Err(ComplianceError::FixtureValidation(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            GrantStore::from_toml("[[grants]]\nid = \"one\""),
            Err(ComplianceError::FixtureParse(_))
        ));
    }

    #[test]
    fn builtin_totals() {
        let totals = GrantStore::builtin().totals();
        assert_eq!(totals.grants, 4);
        assert_eq!(totals.amount_cents, 52_500_000);
        assert_eq!(totals.available_cents, 20_800_000);
    }
}
