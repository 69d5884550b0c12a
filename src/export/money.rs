//! Fixed-point salary amounts.
//!
//! Salaries are stored with two fractional digits, so every amount and every
//! aggregate is kept as an integer number of cents. Division rounds half away
//! from zero and dividing by zero yields zero.

use std::fmt;

/// A monetary amount in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// Builds an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Builds an amount from whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Number of cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Adds `rhs`, or `None` if the total no longer fits in cents.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Divides by `count`, rounding half away from zero. Returns zero when `count` is zero.
    pub fn divide(self, count: usize) -> Money {
        if count == 0 {
            return Money::ZERO;
        }
        let divisor = count as i128;
        let value = self.0 as i128;
        let half = divisor / 2;
        let rounded = if value >= 0 {
            (value + half) / divisor
        } else {
            (value - half) / divisor
        };
        Money(rounded as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::from_units(75000).to_string(), "75000.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_divide_rounds_half_away_from_zero() {
        // 100.00 / 3 = 33.333.. -> 33.33
        assert_eq!(Money::from_units(100).divide(3), Money::from_cents(3333));
        // 0.05 / 2 = 0.025 -> 0.03
        assert_eq!(Money::from_cents(5).divide(2), Money::from_cents(3));
        assert_eq!(Money::from_cents(-5).divide(2), Money::from_cents(-3));
    }

    #[test]
    fn test_divide_by_zero_is_zero() {
        assert_eq!(Money::from_units(500).divide(0), Money::ZERO);
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        assert_eq!(
            Money::from_cents(1000).checked_add(Money::from_cents(255)),
            Some(Money::from_cents(1255))
        );
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(half.checked_add(half), None);
    }
}
