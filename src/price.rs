//! Price text normalization
//!
//! Turns messy price strings ("₵1,234.56", "GHS 1.200,00", "$45") into f64
//! values. Parsing is best-effort: anything unparseable yields None rather
//! than an error, so a bad price never sinks a whole record.

use once_cell::sync::Lazy;
use regex::Regex;

/// Currency-anchored number patterns, tried in order against free text.
/// Group 1 is the numeric part handed to `parse_price`.
static CURRENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"₵\s*(\d+(?:,\d{3})*(?:\.\d{2})?)",
        r"GHS\s*(\d+(?:,\d{3})*(?:\.\d{2})?)",
        r"\$\s*(\d+(?:,\d{3})*(?:\.\d{2})?)",
        r"(\d+(?:,\d{3})*(?:\.\d{2})?)\s*USD",
        r"€\s*(\d+(?:,\d{3})*(?:\.\d{2})?)",
        r"£\s*(\d+(?:,\d{3})*(?:\.\d{2})?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid currency regex"))
    .collect()
});

/// Parse a raw price string into a value.
///
/// Strips currency symbols and junk, then decides what the separators mean:
/// when both `,` and `.` appear the commas are thousands separators; a lone
/// comma followed by exactly two digits is a decimal separator, otherwise
/// commas are thousands separators too.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let has_comma = cleaned.contains(',');
    let has_period = cleaned.contains('.');

    let normalized = if has_comma && has_period {
        cleaned.replace(',', "")
    } else if has_comma {
        // "1,23" is a decimal price, "1,234,567" is comma-grouped
        let last_group_len = cleaned.rsplit(',').next().map(str::len).unwrap_or(0);
        if last_group_len == 2 {
            cleaned.replace(',', ".")
        } else {
            cleaned.replace(',', "")
        }
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

/// Find the first currency-prefixed (or USD-suffixed) price in free text.
pub fn find_price_in_text(text: &str) -> Option<f64> {
    for pattern in CURRENCY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(value) = caps.get(1).and_then(|m| parse_price(m.as_str())) {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollar_with_thousands_and_cents() {
        assert_eq!(parse_price("$1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_comma_as_decimal_separator() {
        assert_eq!(parse_price("1,23"), Some(1.23));
    }

    #[test]
    fn test_comma_groups_without_period() {
        assert_eq!(parse_price("1,234,567"), Some(1234567.0));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("call for price"), None);
    }

    #[test]
    fn test_cedi_symbol() {
        assert_eq!(parse_price("₵1,200.00"), Some(1200.0));
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_price("450"), Some(450.0));
    }

    #[test]
    fn test_surrounding_text_is_stripped() {
        assert_eq!(parse_price("GHS 2,500.00 only"), Some(2500.0));
    }

    #[test]
    fn test_ambiguous_comma_runs_fail() {
        // multiple commas with a 2-digit tail can't be a valid number
        assert_eq!(parse_price("12,34,56"), None);
    }

    #[test]
    fn test_find_price_in_text() {
        assert_eq!(find_price_in_text("Now only $49.99 while stocks last"), Some(49.99));
        assert_eq!(find_price_in_text("₵1,200.00"), Some(1200.0));
        assert_eq!(find_price_in_text("price on request"), None);
    }

    #[test]
    fn test_find_price_usd_suffix() {
        assert_eq!(find_price_in_text("120 USD shipped"), Some(120.0));
    }

    #[test]
    fn test_pattern_order_prefers_cedi() {
        // both symbols present: the cedi pattern is earlier in the list
        assert_eq!(find_price_in_text("₵800 (about $65)"), Some(800.0));
    }
}
