use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decision::FundRef;

// ---------------------------------------------------------------------------
// Grant agreements
// ---------------------------------------------------------------------------

/// A donor's grant with its spending rules.
///
/// Category keywords are matched by plain substring containment against the
/// lower-cased question text.
///
/// JSON output is camelCase like every other record; grant files keep their
/// snake_case keys through the aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRecord {
    pub id: u32,
    pub donor: String,
    #[serde(alias = "amount_cents")]
    pub amount_cents: i64,
    #[serde(alias = "available_cents")]
    pub available_cents: i64,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default, alias = "allowed_categories")]
    pub allowed_categories: Vec<String>,
    #[serde(default, alias = "prohibited_categories")]
    pub prohibited_categories: Vec<String>,
}

impl GrantRecord {
    /// True if any allowed keyword occurs in `query_lower`.
    pub fn allows(&self, query_lower: &str) -> bool {
        contains_any(query_lower, &self.allowed_categories)
    }

    /// True if any prohibited keyword occurs in `query_lower`.
    pub fn prohibits(&self, query_lower: &str) -> bool {
        contains_any(query_lower, &self.prohibited_categories)
    }

    pub fn can_cover(&self, amount_cents: i64) -> bool {
        self.available_cents >= amount_cents
    }

    pub fn is_unrestricted(&self) -> bool {
        self.prohibited_categories.is_empty()
    }

    pub fn fund_ref(&self) -> FundRef {
        FundRef {
            grant_id: Some(self.id),
            donor: self.donor.clone(),
            available_cents: self.available_cents,
            amount_cents: self.amount_cents,
        }
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A grant partner card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPartner {
    pub id: u32,
    pub company: String,
    pub amount_cents: i64,
    pub used_cents: i64,
    pub granted_on: NaiveDate,
    pub status: PartnerStatus,
}

impl GrantPartner {
    pub fn remaining_cents(&self) -> i64 {
        self.amount_cents - self.used_cents
    }

    /// Share of the grant already spent, 0-100, rounded down.
    pub fn utilization_pct(&self) -> u32 {
        if self.amount_cents <= 0 {
            return 0;
        }
        ((self.used_cents.max(0) * 100) / self.amount_cents).min(100) as u32
    }
}

/// A signed agreement available for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementFile {
    pub id: u32,
    pub title: String,
    pub pages: u32,
    pub file_type: String,
    pub last_modified: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant() -> GrantRecord {
        GrantRecord {
            id: 7,
            donor: "Test Fund".into(),
            amount_cents: 10_000_00,
            available_cents: 2_500_00,
            restrictions: vec!["Food only".into()],
            allowed_categories: vec!["Food".into(), "groceries".into()],
            prohibited_categories: vec!["salaries".into()],
        }
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let g = grant();
        assert!(g.allows("can we buy food for the pantry"));
        assert!(!g.allows("can we buy a van"));
        assert!(g.prohibits("staff salaries for june"));
    }

    #[test]
    fn empty_keyword_never_matches() {
        let mut g = grant();
        g.allowed_categories = vec![String::new()];
        assert!(!g.allows("anything at all"));
    }

    #[test]
    fn coverage_is_inclusive() {
        let g = grant();
        assert!(g.can_cover(2_500_00));
        assert!(!g.can_cover(2_500_01));
    }

    #[test]
    fn grant_json_is_camel_case_and_reads_file_keys() {
        let val = serde_json::to_value(grant()).unwrap();
        assert_eq!(val["availableCents"], 2_500_00);
        assert_eq!(val["prohibitedCategories"][0], "salaries");
        assert!(val.get("available_cents").is_none());

        let from_file: GrantRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "donor": "Test Fund",
            "amount_cents": 10_000_00,
            "available_cents": 2_500_00,
            "restrictions": ["Food only"],
            "allowed_categories": ["Food", "groceries"],
            "prohibited_categories": ["salaries"],
        }))
        .unwrap();
        assert_eq!(from_file, grant());
    }

    #[test]
    fn partner_utilization() {
        let p = GrantPartner {
            id: 1,
            company: "Healthcare Foundation".into(),
            amount_cents: 150_000_00,
            used_cents: 105_000_00,
            granted_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: PartnerStatus::Active,
        };
        assert_eq!(p.remaining_cents(), 45_000_00);
        assert_eq!(p.utilization_pct(), 70);
    }
}
