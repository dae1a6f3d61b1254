//! Monetary amounts in minor units.
//!
//! Amounts are stored as integer cents. Form input arrives as a decimal
//! dollar string ("10.50") and is converted exactly, with no floating-point
//! step.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A strictly-positive monetary amount in cents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Wrap an amount already expressed in cents.
    ///
    /// Fails unless the amount is strictly positive.
    pub fn new(cents: i64) -> DomainResult<Self> {
        if cents <= 0 {
            return Err(DomainError::validation("amount must be greater than $0"));
        }
        Ok(Self(cents))
    }

    /// Parse a decimal dollar string ("10", "10.5", "10.50") into cents.
    ///
    /// At most two fraction digits are accepted; the result must be strictly
    /// positive.
    pub fn parse_dollars(raw: &str) -> DomainResult<Self> {
        let s = raw.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(DomainError::validation("amount is not a number"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation("amount is not a number"));
        }
        if frac.len() > 2 {
            return Err(DomainError::validation("amount has sub-cent precision"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| DomainError::validation("amount out of range"))?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac_cents))
            .ok_or_else(|| DomainError::validation("amount out of range"))?;

        if negative || cents <= 0 {
            return Err(DomainError::validation("amount must be greater than $0"));
        }
        Ok(Self(cents))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Render as a decimal dollar string ("10.50"), for form re-population.
    pub fn to_dollars_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl core::fmt::Display for Cents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}", self.to_dollars_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_whole_dollars() {
        assert_eq!(Cents::parse_dollars("12").unwrap().get(), 1200);
    }

    #[test]
    fn parses_fraction_digits() {
        assert_eq!(Cents::parse_dollars("10.5").unwrap().get(), 1050);
        assert_eq!(Cents::parse_dollars("10.05").unwrap().get(), 1005);
        assert_eq!(Cents::parse_dollars("0.01").unwrap().get(), 1);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(Cents::parse_dollars("0").is_err());
        assert!(Cents::parse_dollars("0.00").is_err());
        assert!(Cents::parse_dollars("-5").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Cents::parse_dollars("").is_err());
        assert!(Cents::parse_dollars("abc").is_err());
        assert!(Cents::parse_dollars("1.2.3").is_err());
        assert!(Cents::parse_dollars("10.999").is_err());
    }

    #[test]
    fn renders_dollars() {
        assert_eq!(Cents::new(1050).unwrap().to_dollars_string(), "10.50");
        assert_eq!(Cents::new(7).unwrap().to_dollars_string(), "0.07");
    }

    proptest! {
        /// Property: every positive whole-dollar input converts at exactly
        /// one hundred cents per dollar.
        #[test]
        fn whole_dollars_scale_by_one_hundred(dollars in 1i64..1_000_000i64) {
            let cents = Cents::parse_dollars(&dollars.to_string()).unwrap();
            prop_assert_eq!(cents.get(), dollars * 100);
        }

        /// Property: non-positive inputs never produce an amount.
        #[test]
        fn non_positive_never_parses(dollars in -1_000_000i64..=0i64) {
            prop_assert!(Cents::parse_dollars(&dollars.to_string()).is_err());
        }
    }
}
