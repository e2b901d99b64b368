//! Currency rounding and wage multiples.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an amount to whole won, half up.
///
/// Calculators apply this once to their final figure, never to
/// intermediate products.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::round_won;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_won(Decimal::from_str("49999.5").unwrap()), Decimal::from(50000));
/// assert_eq!(round_won(Decimal::from_str("49999.49").unwrap()), Decimal::from(49999));
/// ```
pub fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplies an average wage by a statutory factor.
///
/// A wage so large that the product leaves the `Decimal` range is reported
/// as `InvalidWage` instead of overflowing.
pub(crate) fn wage_multiple(wage: Decimal, factor: Decimal) -> EngineResult<Decimal> {
    wage.checked_mul(factor)
        .ok_or_else(|| EngineError::InvalidWage {
            value: wage.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(round_won(dec("16.5")), dec("17"));
        assert_eq!(round_won(dec("64191.5")), dec("64192"));
    }

    #[test]
    fn test_below_half_rounds_down() {
        assert_eq!(round_won(dec("16.4999")), dec("16"));
    }

    #[test]
    fn test_whole_amount_unchanged() {
        assert_eq!(round_won(dec("70000.000")), dec("70000"));
    }

    #[test]
    fn test_wage_multiple_in_range() {
        assert_eq!(wage_multiple(dec("100000"), dec("120")).unwrap(), dec("12000000"));
    }

    #[test]
    fn test_wage_multiple_overflow_is_invalid_wage() {
        let result = wage_multiple(Decimal::MAX, dec("120"));
        assert!(matches!(result, Err(EngineError::InvalidWage { .. })));
    }
}
