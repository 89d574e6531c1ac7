//! Scripted demo scenarios.
//!
//! Each script pairs a handful of trigger phrases and an exact amount with a
//! fixed, fully worked answer. A script fires only when every phrase occurs
//! in the question (case-insensitive) and the extracted amount is equal to
//! the script's amount to the cent.

use grantime_core::{Alternative, Citation, CitationRef, Decision, DecisionResult, FundRef};

#[derive(Debug, Clone, Copy)]
pub struct DemoScript {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
    pub amount_cents: i64,
    response: fn() -> DecisionResult,
}

impl DemoScript {
    pub fn matches(&self, query_lower: &str, amount_cents: i64) -> bool {
        amount_cents == self.amount_cents && self.phrases.iter().all(|p| query_lower.contains(p))
    }

    pub fn response(&self) -> DecisionResult {
        (self.response)()
    }
}

/// First script that fires for this question, if any.
pub fn find_script<'a>(
    scripts: &'a [DemoScript],
    query_lower: &str,
    amount_cents: i64,
) -> Option<&'a DemoScript> {
    scripts.iter().find(|s| s.matches(query_lower, amount_cents))
}

// ---------------------------------------------------------------------------
// Keyword-era scenario
// ---------------------------------------------------------------------------

pub const DONOR_A_SHELTER: DemoScript = DemoScript {
    name: "donor-a-shelter",
    phrases: &["emergency shelter", "donor a"],
    amount_cents: 1_500_000,
    response: donor_a_shelter,
};

/// Scripts the keyword matcher checks before running its rules.
pub fn keyword_scripts() -> Vec<DemoScript> {
    vec![DONOR_A_SHELTER]
}

fn donor_a_shelter() -> DecisionResult {
    let mut r = DecisionResult::new(
        Decision::No,
        95,
        "Emergency shelter utilities are not permitted under Donor A's grant restrictions. \
         According to Grant Agreement HCF-2024-089, Section 3.2, Donor A funds are restricted to \
         \"emergency medical supplies only\" and explicitly prohibit utility payments and shelter operations.",
    );
    r.citations = vec![
        Citation::from("Grant Agreement HCF-2024-089, Section 3.2: 'Funds shall be used exclusively for emergency medical supplies and equipment'"),
        Citation::from("Grant Agreement HCF-2024-089, Section 4.1: 'Prohibited uses include but are not limited to: utilities, rent, shelter operations, and administrative costs'"),
        Citation::from("Donor A Compliance Manual, Page 12: 'All expenditures must directly support medical emergency response activities'"),
    ];
    r.alternatives = vec![
        Alternative {
            note: Some("Specifically allows emergency shelter and utilities - Grant Agreement ERG-2023-156, Section 2.3".into()),
            ..Alternative::from_fund(&fund("Emergency Relief Grant", 7_500_000, 20_000_000))
        },
        Alternative {
            note: Some("Covers housing and shelter programs with up to 10% for utilities - Agreement CSF-2024-022".into()),
            ..Alternative::from_fund(&fund("Community Support Fund", 2_800_000, 7_500_000))
        },
    ];
    r.processing_note = Some(
        "Immediate approval available for Emergency Relief Grant funds upon submission of Form ER-401".into(),
    );
    r
}

// ---------------------------------------------------------------------------
// Scripted-demo scenarios
// ---------------------------------------------------------------------------

pub const SHELTER_SETUP: DemoScript = DemoScript {
    name: "shelter-setup",
    phrases: &["shelter", "healthcare foundation"],
    amount_cents: 1_500_000,
    response: shelter_setup,
};

pub const SUBSTANCE_ABUSE_RESEARCH: DemoScript = DemoScript {
    name: "substance-abuse-research",
    phrases: &["research", "substance abuse"],
    amount_cents: 1_000_000,
    response: substance_abuse_research,
};

/// Scripts recognised by the scripted matcher.
pub fn demo_scripts() -> Vec<DemoScript> {
    vec![SHELTER_SETUP, SUBSTANCE_ABUSE_RESEARCH]
}

/// Answer for any question outside the scripted scenarios.
pub fn placeholder() -> DecisionResult {
    DecisionResult::new(
        Decision::Unknown,
        0,
        "I can only walk through the demo scenarios right now. Try asking: \
         \"Can we use $15,000 from the Healthcare Foundation grant for emergency shelter setup?\"",
    )
}

fn fund(donor: &str, available_cents: i64, amount_cents: i64) -> FundRef {
    FundRef { grant_id: None, donor: donor.into(), available_cents, amount_cents }
}

fn cite(text: &str, source: &str, section: &str) -> Citation {
    Citation::Detailed(CitationRef {
        text: text.into(),
        source: source.into(),
        section: section.into(),
        clickable: true,
    })
}

fn shelter_setup() -> DecisionResult {
    let mut r = DecisionResult::new(
        Decision::No,
        95,
        "Shelter setup and operations are not permitted under Healthcare Foundation's grant restrictions. \
         The Healthcare Foundation grant agreement specifically limits funding to medical supplies and healthcare services only.",
    );
    r.citations = vec![cite(
        "Grantee funds shall be used exclusively for educational programming and direct client services as defined in Exhibit A. \
         Emergency facility operations, including but not limited to utilities, maintenance, and crisis response activities, \
         are specifically excluded from allowable expenses under this agreement.",
        "Grant Agreement HCF-2024-089",
        "Section 3.2 - Allowable Expenses",
    )];
    r.alternatives = vec![
        Alternative {
            reasoning: Some("This grant specifically covers emergency shelter operations and setup costs.".into()),
            citations: vec![cite(
                "Funds may be utilized for emergency shelter establishment, including temporary housing setup, basic utilities connection, \
                 and emergency accommodation services for displaced individuals during crisis periods.",
                "Grant Agreement ERG-2023-156",
                "Section 2.3 - Emergency Housing Provisions",
            )],
            ..Alternative::from_fund(&fund("Emergency Relief Grant", 7_500_000, 20_000_000))
        },
        Alternative {
            reasoning: Some("Covers housing and shelter programs with specific provisions for emergency shelter setup.".into()),
            citations: vec![cite(
                "Grant recipients are authorized to establish temporary and emergency shelters, including facility preparation, \
                 basic infrastructure setup, and operational costs not exceeding reasonable community standards for emergency housing.",
                "Grant Agreement CSF-2024-022",
                "Section 4.1 - Housing and Shelter Programs",
            )],
            ..Alternative::from_fund(&fund("Community Support Fund", 2_800_000, 7_500_000))
        },
    ];
    r.processing_note = Some(
        "Emergency Relief Grant funds can be accessed immediately upon submission of Form ER-401. \
         Community Support Fund requires 48-hour approval process."
            .into(),
    );
    r.allowed_uses = Some(
        "Healthcare Foundation funds CAN be used for:\n\
         • Emergency medical supplies\n\
         • Healthcare equipment\n\
         • Medical training programs\n\
         • Patient care services\n\
         • Health education initiatives"
            .into(),
    );
    r.prohibited_uses = Some(
        "Healthcare Foundation funds CANNOT be used for:\n\
         • Shelter operations\n\
         • Utilities\n\
         • Facility maintenance\n\
         • Construction\n\
         • Administrative salaries\n\
         • Office supplies\n\
         • Any non-medical emergency response activities"
            .into(),
    );
    r.show_change_agreement_button = true;
    r
}

fn substance_abuse_research() -> DecisionResult {
    let mut r = DecisionResult::new(
        Decision::Yes,
        90,
        "Research and development for substance abuse programs is permitted under multiple grant agreements. \
         Both the Mental Health Research Foundation and Addiction Recovery Initiative grants specifically allow \
         funding for R&D activities in substance abuse treatment and prevention.",
    );
    r.fund_source = Some(fund("Mental Health Research Foundation", 4_500_000, 12_000_000));
    r.citations = vec![cite(
        "Grant funds may be allocated toward research initiatives, program development, and evidence-based treatment \
         methodology advancement in the fields of mental health and substance abuse recovery.",
        "Grant Agreement MHRF-2024-067",
        "Section 2.4 - Research and Development Activities",
    )];
    r.alternatives = vec![
        Alternative {
            reasoning: Some(
                "Primary recommended source with substantial available funds specifically designated for substance abuse \
                 research and program development."
                    .into(),
            ),
            citations: vec![cite(
                "Eligible expenses include research project costs, data collection activities, pilot program development, \
                 treatment protocol research, and innovative intervention methodology studies focused on substance abuse \
                 and addiction recovery.",
                "Grant Agreement MHRF-2024-067",
                "Section 3.1 - Eligible Research Expenses",
            )],
            show_submit_request_button: true,
            ..Alternative::from_fund(&fund("Mental Health Research Foundation", 4_500_000, 12_000_000))
        },
        Alternative {
            reasoning: Some(
                "Secondary option with dedicated funding for addiction research, including development of new treatment \
                 approaches and evidence-based interventions."
                    .into(),
            ),
            citations: vec![cite(
                "Funds shall support research and development activities aimed at improving substance abuse treatment \
                 outcomes, including but not limited to clinical studies, program evaluation research, and development of \
                 innovative therapeutic approaches.",
                "Grant Agreement ARI-2023-194",
                "Section 4.2 - Research Program Support",
            )],
            show_submit_request_button: true,
            ..Alternative::from_fund(&fund("Addiction Recovery Initiative", 1_850_000, 5_000_000))
        },
    ];
    r.processing_note = Some(
        "Mental Health Research Foundation requires submission of research proposal and IRB approval. \
         Addiction Recovery Initiative funds can be accessed with simplified Form ARI-203."
            .into(),
    );
    r.allowed_uses = Some(
        "Research and Development funds CAN be used for:\n\
         •    Clinical research studies\n\
         •    Treatment methodology development\n\
         •    Data collection and analysis\n\
         •    Pilot program implementation\n\
         •    Evidence-based intervention research\n\
         •    Program evaluation studies\n\
         •    Research equipment and materials"
            .into(),
    );
    r.prohibited_uses = Some(
        "Research and Development funds CANNOT be used for:\n\
         •    Direct patient treatment costs\n\
         •    Facility operational expenses\n\
         •    Administrative overhead exceeding 15%\n\
         •    Equipment not directly related to research\n\
         •    Travel expenses exceeding $500 per study\n\
         •    Commercial product development\n\
         •    Research unrelated to substance abuse"
            .into(),
    );
    r.show_submit_request_button = true;
    r
}
