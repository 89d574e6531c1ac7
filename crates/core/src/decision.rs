use serde::{Deserialize, Serialize};

/// Outcome of a compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// The expense is allowed by at least one fund and blocked by none.
    Yes,
    /// No fund allows the expense.
    No,
    /// Some fund allows it but another fund's restrictions also apply.
    Conditional,
    /// The assistant has nothing to say about this question.
    Unknown,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
            Self::Conditional => write!(f, "CONDITIONAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Which matcher answers questions.
///
/// `Keyword` is the rule-based matcher over the grant store; `Scripted`
/// recognises only the canned demo scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherMode {
    #[default]
    Scripted,
    Keyword,
}

impl std::fmt::Display for MatcherMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scripted => write!(f, "scripted"),
            Self::Keyword => write!(f, "keyword"),
        }
    }
}

/// An excerpt of agreement text quoted as justification.
///
/// Older responses cite bare strings; newer ones carry the source document
/// and section so the front end can offer a "View Agreement" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Plain(String),
    Detailed(CitationRef),
}

impl Citation {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Detailed(c) => &c.text,
        }
    }

    /// The agreement this citation can open, if any.
    pub fn openable_source(&self) -> Option<&str> {
        match self {
            Self::Detailed(c) if c.clickable => Some(&c.source),
            _ => None,
        }
    }
}

impl From<&str> for Citation {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRef {
    pub text: String,
    /// Agreement identifier, e.g. "Grant Agreement HCF-2024-089"
    pub source: String,
    pub section: String,
    #[serde(default)]
    pub clickable: bool,
}

/// The fund a decision draws on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_id: Option<u32>,
    pub donor: String,
    pub available_cents: i64,
    pub amount_cents: i64,
}

/// Another donor's fund suggested in place of the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub donor: String,
    pub available_cents: i64,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Short free-text pointer, shown only when there are no citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_submit_request_button: bool,
}

impl Alternative {
    pub fn from_fund(fund: &FundRef) -> Self {
        Self {
            donor: fund.donor.clone(),
            available_cents: fund.available_cents,
            amount_cents: fund.amount_cents,
            reasoning: None,
            note: None,
            citations: Vec::new(),
            show_submit_request_button: false,
        }
    }
}

/// The assistant's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub decision: Decision,
    /// 0..=100
    pub confidence: u8,
    pub reasoning: String,
    pub fund_source: Option<FundRef>,
    pub citations: Vec<Citation>,
    pub alternatives: Vec<Alternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited_uses: Option<String>,
    #[serde(default)]
    pub show_change_agreement_button: bool,
    #[serde(default)]
    pub show_submit_request_button: bool,
}

impl DecisionResult {
    /// A bare result with no fund, citations, or optional sections.
    pub fn new(decision: Decision, confidence: u8, reasoning: impl Into<String>) -> Self {
        Self {
            decision,
            confidence: confidence.min(100),
            reasoning: reasoning.into(),
            fund_source: None,
            citations: Vec::new(),
            alternatives: Vec::new(),
            processing_note: None,
            allowed_uses: None,
            prohibited_uses: None,
            show_change_agreement_button: false,
            show_submit_request_button: false,
        }
    }

    pub fn has_usage_summary(&self) -> bool {
        self.allowed_uses.is_some() || self.prohibited_uses.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_wire_names() {
        assert_eq!(serde_json::to_string(&Decision::Conditional).unwrap(), "\"CONDITIONAL\"");
        assert_eq!(Decision::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn citations_deserialize_either_shape() {
        let json = r#"[
            "Funds restricted to medical supplies",
            {"text": "Housing only", "source": "Grant Agreement CSF-2024-022", "section": "Section 4.1", "clickable": true}
        ]"#;
        let cites: Vec<Citation> = serde_json::from_str(json).unwrap();
        assert_eq!(cites[0], Citation::from("Funds restricted to medical supplies"));
        assert_eq!(cites[0].openable_source(), None);
        assert_eq!(cites[1].text(), "Housing only");
        assert_eq!(cites[1].openable_source(), Some("Grant Agreement CSF-2024-022"));
    }

    #[test]
    fn result_uses_camel_case_and_skips_empty_sections() {
        let result = DecisionResult::new(Decision::No, 93, "nothing fits");
        let val = serde_json::to_value(&result).unwrap();
        assert_eq!(val["fundSource"], serde_json::Value::Null);
        assert_eq!(val["showChangeAgreementButton"], false);
        assert!(val.get("processingNote").is_none());
        assert!(val.get("allowedUses").is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(DecisionResult::new(Decision::Yes, 250, "").confidence, 100);
    }
}
