//! Monetary arithmetic, display rounding and formatting.
//!
//! Internal figures keep full precision and are combined with checked
//! arithmetic, so an out-of-range amount surfaces as
//! [`EngineError::AmountOverflow`] rather than a panic. Rounding is applied
//! only at the point of display or export.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

fn overflow(context: &str) -> EngineError {
    EngineError::AmountOverflow {
        context: context.to_string(),
    }
}

/// Adds two amounts, failing with `AmountOverflow` when the sum is out of range.
pub fn checked_add(left: Decimal, right: Decimal, context: &str) -> EngineResult<Decimal> {
    left.checked_add(right).ok_or_else(|| overflow(context))
}

/// Subtracts `right` from `left`, failing with `AmountOverflow` when out of range.
pub fn checked_sub(left: Decimal, right: Decimal, context: &str) -> EngineResult<Decimal> {
    left.checked_sub(right).ok_or_else(|| overflow(context))
}

/// Sums amounts with overflow checking.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::checked_sum;
/// use payroll_engine::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let total = checked_sum([Decimal::from(200), Decimal::from(70)], "allowances").unwrap();
/// assert_eq!(total, Decimal::from(270));
///
/// assert!(matches!(
///     checked_sum([Decimal::MAX, Decimal::ONE], "allowances"),
///     Err(EngineError::AmountOverflow { .. })
/// ));
/// ```
pub fn checked_sum<I>(amounts: I, context: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| checked_add(total, amount, context))
}

/// Takes `percentage` percent of `base`.
pub fn percentage_of(base: Decimal, percentage: Decimal, context: &str) -> EngineResult<Decimal> {
    base.checked_mul(percentage)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(context))
}

/// Rounds an amount to the display precision, midpoint away from zero, and
/// pads it to exactly `places` decimal places.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_for_display;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_for_display(Decimal::from_str("1218.755").unwrap(), 2);
/// assert_eq!(rounded.to_string(), "1218.76");
/// assert_eq!(round_for_display(Decimal::from(200), 2).to_string(), "200.00");
/// ```
pub fn round_for_display(amount: Decimal, places: u32) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded
}

/// Formats an amount with its currency code for display.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(-6005, 1), "SAR", 2), "SAR -600.50");
/// ```
pub fn format_amount(amount: Decimal, currency: &str, places: u32) -> String {
    format!("{} {}", currency, round_for_display(amount, places))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_midpoint_away_from_zero() {
        assert_eq!(round_for_display(dec("0.125"), 2).to_string(), "0.13");
        assert_eq!(round_for_display(dec("-0.125"), 2).to_string(), "-0.13");
        assert_eq!(round_for_display(dec("0.124"), 2).to_string(), "0.12");
    }

    #[test]
    fn test_pads_to_precision() {
        assert_eq!(round_for_display(dec("5"), 2).to_string(), "5.00");
        assert_eq!(round_for_display(dec("5.1"), 3).to_string(), "5.100");
    }

    #[test]
    fn test_zero_places() {
        assert_eq!(round_for_display(dec("99.5"), 0).to_string(), "100");
    }

    #[test]
    fn test_checked_add_reports_context_on_overflow() {
        let error = checked_add(Decimal::MAX, dec("0.5"), "gross pay").unwrap_err();
        assert_eq!(error.to_string(), "Amount overflow while computing gross pay");
        assert_eq!(checked_add(dec("1.10"), dec("2.20"), "gross pay").unwrap(), dec("3.30"));
    }

    #[test]
    fn test_checked_sub_overflows_below_min() {
        assert!(matches!(
            checked_sub(Decimal::MIN, Decimal::ONE, "net pay"),
            Err(EngineError::AmountOverflow { .. })
        ));
        assert_eq!(checked_sub(dec("100"), dec("130"), "net pay").unwrap(), dec("-30"));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec("2000"), dec("12.5"), "housing").unwrap(), dec("250"));
        assert!(matches!(
            percentage_of(Decimal::MAX, dec("200"), "housing"),
            Err(EngineError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1180"), "SAR", 2), "SAR 1180.00");
        assert_eq!(format_amount(dec("12.3456"), "KWD", 3), "KWD 12.346");
    }
}
