//! Money type for representing ledger amounts
//!
//! Amounts are currency-agnostic. Internally they are stored as hundredths of
//! the unit (i64) to avoid floating-point drift when summing categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of minor units per major unit
const MINOR_PER_MAJOR: i64 = 100;

/// Currency symbols accepted (and ignored) when parsing user input
const CURRENCY_SYMBOLS: &[char] = &['$', '¥', '￥', '€', '£'];

/// Represents a monetary amount stored as hundredths of the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from minor units (hundredths)
    ///
    /// # Examples
    /// ```
    /// use household_ledger::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// assert_eq!(amount.major(), 10);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole units
    ///
    /// # Examples
    /// ```
    /// use household_ledger::models::Money;
    /// let amount = Money::from_major(50_000);
    /// assert_eq!(amount.minor(), 5_000_000);
    /// ```
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Get the fractional portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "50000", "12.5", "1,200", "¥300", "300円", "-10.50".
    /// Digits beyond the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s.trim_start_matches(CURRENCY_SYMBOLS);
        let s = s.strip_suffix('円').unwrap_or(s);
        let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(original.to_string()))?
        };

        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let total = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Plain decimal form without grouping, e.g. "-1234.50", for exports
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            self.major().unsigned_abs(),
            self.minor_part()
        )
    }

    /// Format with a currency symbol prefix
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let body = self.abs().to_string();
        if self.is_negative() {
            format!("-{}{}", symbol, body)
        } else {
            format!("{}{}", symbol, body)
        }
    }
}

/// Insert thousands separators into a run of digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let whole = group_thousands(&self.major().unsigned_abs().to_string());
        if self.minor_part() == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            write!(f, "{}{}.{:02}", sign, whole, self.minor_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            Self::OutOfRange(s) => write!(f, "Amount is out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
