//! Built-in mock data: the four grant agreements the matcher reasons over,
//! plus the dashboard's partner cards and exportable agreement files.

use chrono::NaiveDate;
use grantime_core::{AgreementFile, GrantPartner, GrantRecord, PartnerStatus};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn builtin_grants() -> Vec<GrantRecord> {
    vec![
        GrantRecord {
            id: 1,
            donor: "Healthcare Foundation".into(),
            amount_cents: 15_000_000,
            available_cents: 4_500_000,
            restrictions: strings(&[
                "Emergency medical supplies only",
                "No administrative costs",
                "Must serve low-income populations",
            ]),
            allowed_categories: strings(&["medical supplies", "emergency", "healthcare", "medication"]),
            prohibited_categories: strings(&["administrative", "salaries", "office supplies"]),
        },
        GrantRecord {
            id: 2,
            donor: "Community Support Fund".into(),
            amount_cents: 7_500_000,
            available_cents: 2_800_000,
            restrictions: strings(&[
                "Housing and shelter programs only",
                "Maximum 10% for utilities",
                "Must provide quarterly reports",
            ]),
            allowed_categories: strings(&["housing", "shelter", "utilities", "rent", "emergency housing"]),
            prohibited_categories: strings(&["medical", "food", "transportation"]),
        },
        GrantRecord {
            id: 3,
            donor: "Emergency Relief Grant".into(),
            amount_cents: 20_000_000,
            available_cents: 7_500_000,
            restrictions: strings(&[
                "Emergency response only",
                "Must be used within 30 days of disaster declaration",
                "Transportation and food assistance allowed",
            ]),
            allowed_categories: strings(&["emergency", "disaster", "food", "transportation", "evacuation"]),
            prohibited_categories: strings(&["long-term programs", "construction", "equipment"]),
        },
        GrantRecord {
            id: 4,
            donor: "General Operations Fund".into(),
            amount_cents: 10_000_000,
            available_cents: 6_000_000,
            restrictions: strings(&[
                "Unrestricted use for organizational operations",
                "Preference for program support over administrative",
            ]),
            allowed_categories: strings(&["operations", "administrative", "programs", "general", "office"]),
            prohibited_categories: Vec::new(),
        },
    ]
}

pub fn builtin_partners() -> Vec<GrantPartner> {
    let partner = |id, company: &str, amount_cents, used_cents, granted_on| GrantPartner {
        id,
        company: company.to_string(),
        amount_cents,
        used_cents,
        granted_on,
        status: PartnerStatus::Active,
    };
    vec![
        partner(1, "Healthcare Foundation", 15_000_000, 10_500_000, date(2024, 3, 15)),
        partner(2, "Community Support Fund", 7_500_000, 4_700_000, date(2024, 1, 22)),
        partner(3, "Emergency Relief Grant", 20_000_000, 12_500_000, date(2023, 11, 8)),
        partner(4, "General Operations Fund", 10_000_000, 4_000_000, date(2024, 2, 10)),
    ]
}

pub fn builtin_files() -> Vec<AgreementFile> {
    let file = |id, donor: &str, pages, last_modified| AgreementFile {
        id,
        title: format!("Grant Agreement with {donor}"),
        pages,
        file_type: "PDF".to_string(),
        last_modified,
    };
    vec![
        file(1, "Healthcare Foundation", 23, date(2024, 3, 15)),
        file(2, "Community Support Fund", 18, date(2024, 1, 22)),
        file(3, "Emergency Relief Grant", 27, date(2023, 11, 8)),
        file(4, "General Operations Fund", 15, date(2024, 2, 10)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_balances_never_exceed_totals() {
        for g in builtin_grants() {
            assert!(g.available_cents <= g.amount_cents, "grant {} overdrawn", g.id);
        }
        for p in builtin_partners() {
            assert!(p.used_cents <= p.amount_cents, "partner {} overspent", p.id);
        }
    }

    #[test]
    fn files_track_partners() {
        let partners = builtin_partners();
        for (file, partner) in builtin_files().iter().zip(&partners) {
            assert!(file.title.ends_with(&partner.company));
            assert_eq!(file.last_modified, partner.granted_on);
        }
    }
}
