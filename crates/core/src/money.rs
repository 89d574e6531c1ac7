// Money helpers. Amounts are integer cents throughout.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Comma-grouped figure first ("15,000"), else a bare digit run ("15000").
        Regex::new(r"\$?(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d+))?").expect("static regex")
    })
}

fn exact_amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\$?(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d{1,2}))?$").expect("static regex")
    })
}

fn captured_cents(caps: &Captures<'_>) -> Option<i64> {
    let whole: String = caps[1].chars().filter(|c| *c != ',').collect();
    let dollars = whole.parse::<i64>().ok()?;

    // Fraction truncated to cents: ".5" -> 50, ".999" -> 99
    let cents = caps
        .get(2)
        .map(|m| {
            let digits: String = m.as_str().chars().chain("00".chars()).take(2).collect();
            digits.parse::<i64>().unwrap_or(0)
        })
        .unwrap_or(0);

    dollars.checked_mul(100)?.checked_add(cents)
}

/// Pull the first dollar figure out of free text.
///
/// Returns 0 when the text holds no number or the number does not fit.
pub fn extract_amount_cents(text: &str) -> i64 {
    amount_pattern()
        .captures(text)
        .and_then(|caps| captured_cents(&caps))
        .unwrap_or(0)
}

/// Parse a string that is nothing but a dollar figure: `15000`, `15,000`,
/// `$15,000.50`. At most two decimal places.
///
/// `None` for anything else, including signs, trailing text and overflow.
pub fn parse_amount_cents(text: &str) -> Option<i64> {
    exact_amount_pattern()
        .captures(text.trim())
        .and_then(|caps| captured_cents(&caps))
}

/// Format cents as Canadian dollars, e.g. `CA$150,000.00`.
pub fn format_cad(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rem = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}CA${grouped}.{rem:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_grouped_amount() {
        assert_eq!(extract_amount_cents("Can we spend $15,000 on shelter?"), 15_000_00);
        assert_eq!(extract_amount_cents("$1,234,567.89 total"), 1_234_567_89);
    }

    #[test]
    fn extracts_bare_digit_run_whole() {
        assert_eq!(extract_amount_cents("spend 15000 on rent"), 15_000_00);
        assert_eq!(extract_amount_cents("$5000 for medical supplies"), 5_000_00);
    }

    #[test]
    fn fraction_truncates_to_cents() {
        assert_eq!(extract_amount_cents("$12.5"), 12_50);
        assert_eq!(extract_amount_cents("$12.999"), 12_99);
    }

    #[test]
    fn first_figure_wins() {
        assert_eq!(extract_amount_cents("$200 now and $300 later"), 200_00);
    }

    #[test]
    fn missing_or_oversized_amount_is_zero() {
        assert_eq!(extract_amount_cents("is office rent allowed?"), 0);
        assert_eq!(extract_amount_cents("99999999999999999999999"), 0);
    }

    #[test]
    fn parses_whole_figures_only() {
        assert_eq!(parse_amount_cents("2,400"), Some(2_400_00));
        assert_eq!(parse_amount_cents(" $15,000.5 "), Some(15_000_50));
        assert_eq!(parse_amount_cents("0"), Some(0));
        assert_eq!(parse_amount_cents("-5"), None);
        assert_eq!(parse_amount_cents("12abc"), None);
        assert_eq!(parse_amount_cents("1.999"), None);
        assert_eq!(parse_amount_cents("1,00"), None);
        assert_eq!(parse_amount_cents(""), None);
        assert_eq!(parse_amount_cents("99999999999999999999999"), None);
    }

    #[test]
    fn formats_cad() {
        assert_eq!(format_cad(150_000_00), "CA$150,000.00");
        assert_eq!(format_cad(28_000_00), "CA$28,000.00");
        assert_eq!(format_cad(5), "CA$0.05");
        assert_eq!(format_cad(999_99), "CA$999.99");
        assert_eq!(format_cad(-1_500_00), "-CA$1,500.00");
    }
}
