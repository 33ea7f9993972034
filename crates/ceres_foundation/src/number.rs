//! Digits and fixed-capacity arbitrary-base numbers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// Maximum number of digits a [`Number`] holds.
pub const MAX_DIGITS: usize = 64;

/// Smallest supported base.
pub const MIN_BASE: u8 = 2;

/// Largest supported base (digits `0-9a-z`).
pub const MAX_BASE: u8 = 36;

/// A small unsigned ordinal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Digit(pub u8);

impl Digit {
    /// Returns the raw ordinal.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Digit {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed digit string in a base between 2 and 36.
///
/// Digits are stored most significant first without leading zeros; zero has
/// no digits and is never negative. Equality and ordering are by value, so
/// the same quantity in two bases is equal.
#[derive(Clone, Debug)]
pub struct Number {
    base: u8,
    negative: bool,
    digits: Vec<u8>,
}

impl Number {
    /// Creates zero in `base`.
    pub fn new(base: u8) -> Result<Self> {
        check_base(base)?;
        Ok(Self {
            base,
            negative: false,
            digits: Vec::new(),
        })
    }

    /// Converts a machine integer.
    pub fn from_i64(value: i64, base: u8) -> Result<Self> {
        check_base(base)?;
        let mut digits = Vec::new();
        let mut rest = value.unsigned_abs();
        while rest > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let digit = (rest % u64::from(base)) as u8;
            digits.push(digit);
            rest /= u64::from(base);
        }
        digits.reverse();
        Ok(Self {
            base,
            negative: value < 0,
            digits,
        })
    }

    /// Builds a number from digits, most significant first.
    pub fn from_digits(digits: &[u8], base: u8, negative: bool) -> Result<Self> {
        check_base(base)?;
        if let Some(&digit) = digits.iter().find(|&&d| d >= base) {
            return Err(Error::new(ErrorKind::InvalidDigit { digit, base }));
        }
        let start = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());
        let digits = &digits[start..];
        if digits.len() > MAX_DIGITS {
            return Err(Error::new(ErrorKind::CapacityExceeded { limit: MAX_DIGITS }));
        }
        Ok(Self {
            base,
            negative: negative && !digits.is_empty(),
            digits: digits.to_vec(),
        })
    }

    /// Parses text such as `-ff` in `base`.
    pub fn parse(text: &str, base: u8) -> Result<Self> {
        check_base(base)?;
        let (negative, body) = match text.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, text),
        };
        let mut digits = Vec::with_capacity(body.len());
        for c in body.chars() {
            #[allow(clippy::cast_possible_truncation)]
            let digit = c
                .to_digit(u32::from(MAX_BASE))
                .map_or(u8::MAX, |d| d as u8);
            digits.push(digit);
        }
        Self::from_digits(&digits, base, negative)
    }

    /// Base of this number.
    #[must_use]
    pub const fn base(&self) -> u8 {
        self.base
    }

    /// Returns true if the number is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the number is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digits, most significant first.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Decimal value, saturating at the bounds of `i128`.
    #[must_use]
    pub fn to_decimal(&self) -> i128 {
        let mut value: i128 = 0;
        for &digit in &self.digits {
            value = value
                .saturating_mul(i128::from(self.base))
                .saturating_add(i128::from(digit));
        }
        if self.negative { -value } else { value }
    }

    /// Exact magnitude as little-endian base 2^32 limbs. Zero has no limbs.
    #[allow(clippy::cast_possible_truncation)]
    fn magnitude(&self) -> Vec<u32> {
        let mut limbs: Vec<u32> = Vec::new();
        for &digit in &self.digits {
            let mut carry = u64::from(digit);
            for limb in &mut limbs {
                let product = u64::from(*limb) * u64::from(self.base) + carry;
                *limb = product as u32;
                carry = product >> 32;
            }
            if carry > 0 {
                limbs.push(carry as u32);
            }
        }
        limbs
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        if self.base == other.base {
            return self
                .digits
                .len()
                .cmp(&other.digits.len())
                .then_with(|| self.digits.cmp(&other.digits));
        }
        let (a, b) = (self.magnitude(), other.magnitude());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.iter().rev().cmp(b.iter().rev()))
    }

    /// Approximate value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_real(&self) -> f64 {
        let mut value = 0.0;
        for &digit in &self.digits {
            value = value * f64::from(self.base) + f64::from(digit);
        }
        if self.negative { -value } else { value }
    }

    /// Resets to zero, dropping the digit storage.
    pub fn clear(&mut self) {
        self.digits = Vec::new();
        self.negative = false;
    }
}

fn check_base(base: u8) -> Result<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::InvalidBase(base)))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.magnitude().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        for &digit in &self.digits {
            let c = char::from_digit(u32::from(digit), u32::from(MAX_BASE)).unwrap_or('?');
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
