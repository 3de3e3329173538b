//! Decimal money helpers.
//!
//! Prices travel as JSON numbers but are held as [`Decimal`] so that line
//! totals and cart totals never pick up binary floating point drift.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round a monetary amount to two decimal places, halves away from zero.
///
/// ```
/// use cartwheel_core::round_off;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_off(Decimal::new(10_005, 3)), Decimal::new(1001, 2));
/// ```
#[must_use]
pub fn round_off(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Apply a percentage discount and round the result.
///
/// A discount outside `0..=100` is clamped into that range.
#[must_use]
pub fn discounted_price(price: Decimal, discount_percentage: Decimal) -> Decimal {
    let pct = discount_percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    round_off(price - price * pct / Decimal::ONE_HUNDRED)
}

/// ISO 4217 currency codes the storefront knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    INR,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::INR => "₹",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::USD => "USD",
            Self::INR => "INR",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        };
        f.write_str(code)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "INR" => Ok(Self::INR),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

/// An amount paired with its currency, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

impl fmt::Display for Price {
    /// Formats like `Intl.NumberFormat('en-US')`: rounded to cents with
    /// thousands separators, e.g. `$1,234.50` or `-$3.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round_off(self.amount);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        write!(
            f,
            "{sign}{}{}.{cents}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }
}

/// Format an amount in the given currency.
#[must_use]
pub fn format_price(amount: Decimal, currency_code: CurrencyCode) -> String {
    Price::new(amount, currency_code).to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_off_half_away_from_zero() {
        assert_eq!(round_off(Decimal::new(1_2345, 4)), Decimal::new(123, 2));
        assert_eq!(round_off(Decimal::new(1_2350, 4)), Decimal::new(124, 2));
        assert_eq!(round_off(Decimal::new(-1_2350, 4)), Decimal::new(-124, 2));
    }

    #[test]
    fn test_discounted_price() {
        // 549 with 12.96% off
        let price = Decimal::new(549, 0);
        let pct = Decimal::new(1296, 2);
        assert_eq!(discounted_price(price, pct), Decimal::new(47785, 2));
    }

    #[test]
    fn test_discount_is_clamped() {
        let price = Decimal::new(10, 0);
        assert_eq!(discounted_price(price, Decimal::new(150, 0)), Decimal::ZERO);
        assert_eq!(discounted_price(price, Decimal::new(-5, 0)), price);
    }

    #[test]
    fn test_format_price_groups_thousands() {
        let formatted = format_price(Decimal::new(1_234_505, 3), CurrencyCode::USD);
        assert_eq!(formatted, "$1,234.51");
        assert_eq!(
            format_price(Decimal::new(1_000_000, 0), CurrencyCode::INR),
            "₹1,000,000.00"
        );
        assert_eq!(format_price(Decimal::ZERO, CurrencyCode::USD), "$0.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(
            format_price(Decimal::new(-300, 2), CurrencyCode::GBP),
            "-£3.00"
        );
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("inr".parse::<CurrencyCode>(), Ok(CurrencyCode::INR));
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
