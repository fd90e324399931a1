use crate::error::{Result, TrackerError};

/// Symbols stripped from listed prices before parsing.
/// Multi-character symbols come first so `HK$` is not reduced to `HK`.
pub const CURRENCY_SYMBOLS: &[&str] = &["HK$", "₹", "$", "€", "£", "¥", ","];

/// Parse a listed price such as `₹1,234.50` into a whole amount, dropping the fraction.
pub fn normalize_price(price_text: &str) -> Result<u64> {
    let stripped = CURRENCY_SYMBOLS
        .iter()
        .fold(price_text.to_string(), |text, symbol| text.replace(symbol, ""));

    let value = stripped
        .trim()
        .parse::<f64>()
        .map_err(|_| format_error(price_text))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format_error(price_text));
    }

    Ok(value.trunc() as u64)
}

fn format_error(price_text: &str) -> TrackerError {
    TrackerError::Format {
        text: price_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_known_symbol() {
        assert_eq!(normalize_price("₹1,234.50").unwrap(), 1234);
        assert_eq!(normalize_price("$99").unwrap(), 99);
        assert_eq!(normalize_price("€ 12.99").unwrap(), 12);
        assert_eq!(normalize_price("£1,000,000").unwrap(), 1_000_000);
        assert_eq!(normalize_price("¥ 5,980").unwrap(), 5980);
        assert_eq!(normalize_price("HK$1,000").unwrap(), 1000);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(normalize_price("\u{a0}₹ 2,499.00 \n").unwrap(), 2499);
    }

    #[test]
    fn rejects_text_that_is_not_a_price() {
        for text in ["Currently unavailable.", "", "₹", "-5", "inf", "NaN", "12 EUR"] {
            assert!(
                matches!(normalize_price(text), Err(TrackerError::Format { .. })),
                "{text:?} should not normalize"
            );
        }
    }
}
