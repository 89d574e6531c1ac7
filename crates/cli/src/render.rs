// Plain-text rendering of chat messages, decisions, and dashboard lists.
// Everything returns a String; callers decide where it goes.

use std::fmt::Write as _;

use grantime_compliance::StoreTotals;
use grantime_core::{
    format_cad, AgreementFile, Alternative, Citation, DecisionResult, GrantPartner, GrantRecord,
    Message, MessageContent, Role,
};

use crate::util::{display_width, pad_left, pad_right, wrap};

/// Text column width for wrapped paragraphs.
const WIDTH: usize = 76;

/// Wrap `text` under `indent`. Continuation lines hang under the first;
/// embedded newlines (bulleted usage lists) are kept.
fn paragraph(out: &mut String, indent: &str, text: &str) {
    let hang = " ".repeat(display_width(indent));
    let mut first = true;
    for source_line in text.lines() {
        for line in wrap(source_line, WIDTH.saturating_sub(hang.len())) {
            let lead = if first { indent } else { hang.as_str() };
            let _ = writeln!(out, "{lead}{line}");
            first = false;
        }
    }
}

fn funds_line(available_cents: i64, amount_cents: i64) -> String {
    format!("Available: {} of {}", format_cad(available_cents), format_cad(amount_cents))
}

fn citation(out: &mut String, indent: &str, c: &Citation) {
    paragraph(out, &format!("{indent}- "), &format!("\"{}\"", c.text()));
    if let Citation::Detailed(r) = c {
        let _ = writeln!(out, "{indent}  {} ({})", r.section, r.source);
    }
    if let Some(source) = c.openable_source() {
        let _ = writeln!(out, "{indent}  [View Agreement: {source}]");
    }
}

fn alternative(out: &mut String, n: usize, alt: &Alternative) {
    let _ = writeln!(out, "  {n}. {}", alt.donor);
    let _ = writeln!(out, "     {}", funds_line(alt.available_cents, alt.amount_cents));
    if let Some(reasoning) = &alt.reasoning {
        paragraph(out, "     ", &format!("Why this works: {reasoning}"));
    }
    if alt.citations.is_empty() {
        if let Some(note) = &alt.note {
            paragraph(out, "     ", note);
        }
    }
    for c in &alt.citations {
        citation(out, "     ", c);
    }
    if alt.show_submit_request_button {
        let _ = writeln!(out, "     [Submit Request]");
    }
}

/// Render a decision with every section it carries, in display order.
pub fn decision(result: &DecisionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Decision: {}  (confidence {}%)", result.decision, result.confidence);

    out.push('\n');
    paragraph(&mut out, "", &result.reasoning);

    if let Some(fund) = &result.fund_source {
        let _ = writeln!(out, "\nRecommended Fund Source:");
        let _ = writeln!(out, "  {}", fund.donor);
        let _ = writeln!(out, "  {}", funds_line(fund.available_cents, fund.amount_cents));
    }

    if !result.citations.is_empty() {
        let _ = writeln!(out, "\nCitations:");
        for c in &result.citations {
            citation(&mut out, "  ", c);
        }
    }

    if result.has_usage_summary() {
        out.push('\n');
        if let Some(allowed) = &result.allowed_uses {
            paragraph(&mut out, "", &format!("Allowed uses: {allowed}"));
        }
        if let Some(prohibited) = &result.prohibited_uses {
            paragraph(&mut out, "", &format!("Prohibited uses: {prohibited}"));
        }
    }

    if !result.alternatives.is_empty() {
        let _ = writeln!(out, "\nAlternatives:");
        for (i, alt) in result.alternatives.iter().enumerate() {
            alternative(&mut out, i + 1, alt);
        }
    }

    if let Some(note) = &result.processing_note {
        out.push('\n');
        paragraph(&mut out, "", &format!("Note: {note}"));
    }

    let mut actions = Vec::new();
    if result.show_change_agreement_button {
        actions.push("[Submit Request to Change Agreement]");
    }
    if result.show_submit_request_button {
        actions.push("[Submit Request]");
    }
    if !actions.is_empty() {
        let _ = writeln!(out, "\n{}", actions.join("  "));
    }

    out
}

/// Render one transcript entry with its speaker and time.
pub fn message(msg: &Message) -> String {
    let who = match msg.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let mut out = format!("[{}] {who}:\n", msg.timestamp.format("%H:%M"));
    match &msg.content {
        MessageContent::Text(text) => paragraph(&mut out, "", text),
        MessageContent::Decision(result) => out.push_str(&decision(result)),
    }
    out
}

/// Grant agreements as a table, followed by each grant's restrictions.
pub fn grants(grants: &[GrantRecord], totals: &StoreTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}  {}  {}",
        pad_right("ID", 4),
        pad_right("DONOR", 28),
        pad_left("AVAILABLE", 16),
        pad_left("TOTAL", 16)
    );
    for g in grants {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            pad_right(&g.id.to_string(), 4),
            pad_right(&g.donor, 28),
            pad_left(&format_cad(g.available_cents), 16),
            pad_left(&format_cad(g.amount_cents), 16)
        );
    }
    let _ = writeln!(
        out,
        "{}  {}  {}  {}",
        pad_right("", 4),
        pad_right(&format!("{} grant(s)", totals.grants), 28),
        pad_left(&format_cad(totals.available_cents), 16),
        pad_left(&format_cad(totals.amount_cents), 16)
    );

    for g in grants {
        if g.restrictions.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{} restrictions:", g.donor);
        for r in &g.restrictions {
            paragraph(&mut out, "  - ", r);
        }
    }
    out
}

/// Grant partner cards and agreement files.
pub fn dashboard(partners: &[GrantPartner], files: &[AgreementFile]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grant Partners");
    let _ = writeln!(
        out,
        "{}  {}  {}  {}  {}  {}",
        pad_right("COMPANY", 26),
        pad_left("AMOUNT", 15),
        pad_left("REMAINING", 15),
        pad_left("USED", 5),
        pad_right("GRANTED", 10),
        "STATUS"
    );
    for p in partners {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}  {}  {}",
            pad_right(&p.company, 26),
            pad_left(&format_cad(p.amount_cents), 15),
            pad_left(&format_cad(p.remaining_cents()), 15),
            pad_left(&format!("{}%", p.utilization_pct()), 5),
            p.granted_on.format("%Y-%m-%d"),
            p.status
        );
    }

    let _ = writeln!(out, "\nAgreement Files");
    let _ = writeln!(
        out,
        "{}  {}  {}  {}",
        pad_right("TITLE", 44),
        pad_left("PAGES", 5),
        pad_right("TYPE", 4),
        "MODIFIED"
    );
    for f in files {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            pad_right(&f.title, 44),
            pad_left(&f.pages.to_string(), 5),
            pad_right(&f.file_type, 4),
            f.last_modified.format("%Y-%m-%d")
        );
    }
    out
}
