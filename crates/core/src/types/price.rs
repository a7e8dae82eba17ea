//! Listing prices.
//!
//! The catalog API sends prices as decimal strings next to an ISO 4217
//! currency code (naira unless a listing says otherwise). [`Price`] keeps the
//! exact decimal and knows how to render it for cards and detail pages.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A listing price. The currency travels separately, as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Currency assumed when a listing doesn't name one.
    pub const DEFAULT_CURRENCY: &'static str = "NGN";

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Render in the default currency, e.g. `₦1,250.00`.
    #[must_use]
    pub fn display(&self) -> String {
        self.format(Self::DEFAULT_CURRENCY)
    }

    /// Render with the currency's symbol, thousands separators and two
    /// decimals. Currencies without a known symbol are prefixed with their
    /// code, e.g. `KES 1,250.00`.
    #[must_use]
    pub fn format(&self, currency: &str) -> String {
        let rounded = self.0.round_dp(2);
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((&text, "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let prefix = currency_symbol(currency)
            .map_or_else(|| format!("{} ", currency.trim().to_uppercase()), str::to_owned);
        format!("{sign}{prefix}{grouped}.{cents}")
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.trim().to_ascii_uppercase().as_str() {
        "NGN" => Some("\u{20a6}"),
        "USD" => Some("$"),
        "GBP" => Some("\u{a3}"),
        "EUR" => Some("\u{20ac}"),
        _ => None,
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap_or_default())
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(price("1250").display(), "₦1,250.00");
        assert_eq!(price("1234567.5").display(), "₦1,234,567.50");
        assert_eq!(price("999.999").display(), "₦1,000.00");
    }

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(price("0").display(), "₦0.00");
        assert_eq!(price("45").display(), "₦45.00");
        assert_eq!(price("12.3").display(), "₦12.30");
    }

    #[test]
    fn test_format_other_currencies() {
        assert_eq!(price("1250").format("usd"), "$1,250.00");
        assert_eq!(price("80").format("KES"), "KES 80.00");
    }

    #[test]
    fn test_deserializes_from_decimal_string() {
        let parsed: Price = serde_json::from_str("\"350.00\"").unwrap_or_default();
        assert_eq!(parsed, price("350"));
    }
}
