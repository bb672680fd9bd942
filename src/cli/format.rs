//! Currency display formatting. Values are symbol-prefixed and
//! thousands-grouped with 2 fractional digits, widened to up to 8 when the
//! absolute value is non-zero and below 0.1 so sub-cent assets do not all
//! render as "$0.00".

/// Display symbols for the fiat codes the dashboard can select. Unknown
/// codes fall back to the uppercased code as a prefix.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_lowercase().as_str() {
        "usd" => Some("$"),
        "eur" => Some("\u{20ac}"),
        "gbp" => Some("\u{a3}"),
        "inr" => Some("\u{20b9}"),
        "jpy" | "cny" => Some("\u{a5}"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Widened fractions keep at least 2 digits, trailing zeros trimmed.
fn trim_fraction(mut text: String) -> String {
    if let Some(dot) = text.find('.') {
        while text.len() - dot - 1 > 2 && text.ends_with('0') {
            text.pop();
        }
    }
    text
}

pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };

    let magnitude = value.abs();
    let text = if value != 0.0 && magnitude < 0.1 {
        trim_fraction(format!("{magnitude:.8}"))
    } else {
        format!("{magnitude:.2}")
    };

    let (integral, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let amount = format!("{}.{}", group_thousands(integral), fraction);

    let sign = if value < 0.0 { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{amount}"),
        None => format!("{sign}{} {amount}", currency.to_uppercase()),
    }
}

/// 24h change as a signed percentage, "N/A" when unknown.
pub fn format_change(change: Option<f64>) -> String {
    match change.filter(|c| c.is_finite()) {
        Some(change) => format!("{change:+.2}%"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_non_finite_render_na() {
        assert_eq!(format_currency(None, "usd"), "N/A");
        assert_eq!(format_currency(Some(f64::NAN), "usd"), "N/A");
        assert_eq!(format_currency(Some(f64::INFINITY), "usd"), "N/A");
    }

    #[test]
    fn test_standard_precision_is_two_digits() {
        assert_eq!(format_currency(Some(1234.5), "usd"), "$1,234.50");
        assert_eq!(format_currency(Some(0.0), "usd"), "$0.00");
        assert_eq!(format_currency(Some(0.1), "usd"), "$0.10");
    }

    #[test]
    fn test_sub_cent_values_widen_to_eight_digits() {
        assert_eq!(format_currency(Some(0.00001234), "usd"), "$0.00001234");
        // Trailing zeros trim back down, never below two digits
        assert_eq!(format_currency(Some(0.01), "usd"), "$0.01");
        assert_eq!(format_currency(Some(0.05000000), "usd"), "$0.05");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(Some(1000000.0), "usd"), "$1,000,000.00");
        assert_eq!(format_currency(Some(999.99), "usd"), "$999.99");
        assert_eq!(
            format_currency(Some(1340000000000.0), "usd"),
            "$1,340,000,000,000.00"
        );
    }

    #[test]
    fn test_negative_values_keep_sign_before_symbol() {
        assert_eq!(format_currency(Some(-1234.5), "usd"), "-$1,234.50");
        assert_eq!(format_currency(Some(-0.05), "eur"), "-\u{20ac}0.05");
    }

    #[test]
    fn test_known_and_unknown_currency_codes() {
        assert_eq!(format_currency(Some(10.0), "EUR"), "\u{20ac}10.00");
        assert_eq!(format_currency(Some(10.0), "gbp"), "\u{a3}10.00");
        assert_eq!(format_currency(Some(10.0), "aud"), "AUD 10.00");
    }

    #[test]
    fn test_change_formatting() {
        assert_eq!(format_change(Some(2.153)), "+2.15%");
        assert_eq!(format_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_change(Some(0.0)), "+0.00%");
        assert_eq!(format_change(None), "N/A");
    }
}
