use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Money is stored as integer cents, so 400.00 PLN is `Money(40000)`.
/// Arithmetic stays exact no matter how many rentals get credited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole currency units, e.g. `Money::from_units(400)` is 400.00.
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    /// Locale-invariant form with exactly two fractional digits: `400.00`, `-0.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Money {
    /// Parse a price or deposit. Same forms as `FromStr`, but a negative
    /// amount is an error: nothing in the fleet costs less than zero.
    pub fn parse_amount(input: &str) -> Result<Self, ParseMoneyError> {
        let amount: Money = input.parse()?;
        if amount.is_negative() {
            return Err(ParseMoneyError::Negative);
        }
        Ok(amount)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Accepts `400`, `400.5`, `400.50`, `.50` and a leading `-`.
    /// Extra fractional digits are rounded half away from zero: `300.005` is 300.01.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError::InvalidDigit);
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };
        // "5" after the point means fifty cents; the third digit decides rounding
        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tens = fraction_digits.next().unwrap_or(0);
        let ones = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);
        let cents = tens * 10 + ones + i64::from(round_up);

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or(ParseMoneyError::Overflow)?;
        Ok(Money(if negative { -total } else { total }))
    }
}

/// Saturates at the `i64` bounds instead of overflowing.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMoneyError {
    Empty,
    InvalidDigit,
    Negative,
    Overflow,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::Empty => write!(f, "empty amount"),
            ParseMoneyError::InvalidDigit => write!(f, "invalid money format"),
            ParseMoneyError::Negative => write!(f, "amount must not be negative"),
            ParseMoneyError::Overflow => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}
