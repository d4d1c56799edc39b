//! Decimal-safe money and percentage helpers.
//!
//! All monetary columns are `NUMERIC(14,2)` and map to [`Decimal`]; nothing
//! in the rule set goes through floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Lower bound of every percentage.
pub const PERCENT_MIN: Decimal = Decimal::ZERO;

/// Upper bound of every percentage.
pub const PERCENT_MAX: Decimal = Decimal::ONE_HUNDRED;

/// Largest amount a `NUMERIC(14,2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Clamp a percentage into `[0, 100]`.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// Clamp then round a percentage to the nearest whole number.
///
/// Midpoints round away from zero (`12.5 -> 13`).
pub fn round_percent(value: Decimal) -> i32 {
    clamp_percent(value)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

/// `part / whole * 100`, or `None` when `whole` is zero or the division
/// overflows.
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)?.checked_mul(PERCENT_MAX)
}

/// Arithmetic mean of `values`, or `None` for an empty input.
pub fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}

/// Outstanding balance after `paid` has been received against `contract`.
///
/// Overpayment yields a negative balance; the value is stored as-is.
pub fn remaining_balance(contract: Decimal, paid: Decimal) -> Decimal {
    contract - paid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_percent(dec("-5")), Decimal::ZERO);
        assert_eq!(clamp_percent(dec("150.5")), Decimal::ONE_HUNDRED);
        assert_eq!(clamp_percent(dec("42.25")), dec("42.25"));
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_percent(dec("12.5")), 13);
        assert_eq!(round_percent(dec("12.49")), 12);
        assert_eq!(round_percent(dec("99.5")), 100);
        assert_eq!(round_percent(dec("120")), 100);
        assert_eq!(round_percent(dec("-3")), 0);
    }

    #[test]
    fn ratio_of_zero_whole_is_none() {
        assert_eq!(ratio_percent(dec("10"), Decimal::ZERO), None);
    }

    #[test]
    fn ratio_percent_basic() {
        assert_eq!(ratio_percent(dec("20000"), dec("100000")), Some(dec("20")));
        assert_eq!(ratio_percent(dec("1"), dec("3")).map(round_percent), Some(33));
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::<Decimal>::new()), None);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean([dec("20"), dec("80")]), Some(dec("50")));
        assert_eq!(mean([dec("20"), dec("80"), dec("20")]), Some(dec("40")));
    }

    #[test]
    fn remaining_balance_can_go_negative() {
        assert_eq!(remaining_balance(dec("1000"), dec("300")), dec("700"));
        assert_eq!(remaining_balance(dec("1000"), dec("1200")), dec("-200"));
    }
}
