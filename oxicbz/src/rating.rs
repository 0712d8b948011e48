//! Community rating with one decimal place.
//!
//! A [`Rating`] is stored as whole tenths in `0..=50`. Conversion from a
//! float goes through its shortest decimal representation, so `4.55` rounds
//! half-up to `4.6` even though the nearest binary double is slightly below
//! 4.55.

use crate::error::RatingError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A community rating in `[0.0, 5.0]` with one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating {
    tenths: u8,
}

impl Rating {
    /// Highest rating, in tenths.
    pub const MAX_TENTHS: u8 = 50;

    /// Rating from whole tenths.
    pub fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        if tenths > Self::MAX_TENTHS {
            return Err(RatingError::OutOfRange {
                value: format!("{}.{}", tenths / 10, tenths % 10),
            });
        }
        Ok(Self { tenths })
    }

    /// Round a float half-up to one decimal and validate the range.
    pub fn from_f64(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::OutOfRange {
                value: value.to_string(),
            });
        }
        // f64's Display never uses exponent notation
        value.to_string().parse()
    }

    /// Whole tenths, `0..=50`.
    pub fn tenths(self) -> u8 {
        self.tenths
    }

    /// The rating as a float.
    pub fn to_f64(self) -> f64 {
        self.tenths as f64 / 10.0
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    /// Parse a plain decimal such as `4`, `4.5` or `4.55`, rounding half-up
    /// to one fractional digit.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || RatingError::Malformed {
            text: text.to_string(),
        };
        let out_of_range = || RatingError::OutOfRange {
            value: text.trim().to_string(),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(malformed());
        }

        let whole_zero = whole.bytes().all(|b| b == b'0');
        let fraction_zero = fraction.bytes().all(|b| b == b'0');
        if negative && !(whole_zero && fraction_zero) {
            return Err(out_of_range());
        }

        // Anything with a non-zero digit before the last two places is > 5.0
        let whole = whole.trim_start_matches('0');
        if whole.len() > 1 {
            return Err(out_of_range());
        }

        let digit = |s: &str, i: usize| s.as_bytes().get(i).map_or(0, |b| (b - b'0') as u32);
        let mut tenths = digit(whole, 0) * 10 + digit(fraction, 0);
        if digit(fraction, 1) >= 5 {
            tenths += 1;
        }

        if tenths > Self::MAX_TENTHS as u32 {
            return Err(out_of_range());
        }
        Ok(Self {
            tenths: tenths as u8,
        })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(Rating::from_f64(4.55).unwrap().tenths(), 46);
        assert_eq!(Rating::from_f64(4.54).unwrap().tenths(), 45);
        assert_eq!(Rating::from_f64(4.549).unwrap().tenths(), 45);
        assert_eq!(Rating::from_f64(0.05).unwrap().tenths(), 1);
        assert_eq!(Rating::from_f64(2.0).unwrap().tenths(), 20);
        assert_eq!(Rating::from_f64(4.95).unwrap().tenths(), 50);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Rating::from_f64(0.0).unwrap().tenths(), 0);
        assert_eq!(Rating::from_f64(-0.0).unwrap().tenths(), 0);
        assert_eq!(Rating::from_f64(5.0).unwrap().tenths(), 50);
        assert_eq!(Rating::from_f64(5.04).unwrap().tenths(), 50);
    }

    #[test]
    fn test_rejects_out_of_range() {
        for value in [5.1, -0.1, 5.05, 10.0, 1e300, -3.0] {
            assert!(
                matches!(Rating::from_f64(value), Err(RatingError::OutOfRange { .. })),
                "{} should be rejected",
                value
            );
        }
        assert!(Rating::from_f64(f64::NAN).is_err());
        assert!(Rating::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_text() {
        assert_eq!("4.5".parse::<Rating>().unwrap().tenths(), 45);
        assert_eq!(" 3 ".parse::<Rating>().unwrap().tenths(), 30);
        assert_eq!(".5".parse::<Rating>().unwrap().tenths(), 5);
        assert_eq!("03.25".parse::<Rating>().unwrap().tenths(), 33);
        assert!(matches!(
            "".parse::<Rating>(),
            Err(RatingError::Malformed { .. })
        ));
        assert!(matches!(
            "four".parse::<Rating>(),
            Err(RatingError::Malformed { .. })
        ));
        assert!(matches!(
            "1e1".parse::<Rating>(),
            Err(RatingError::Malformed { .. })
        ));
        assert!(matches!(
            "5.1".parse::<Rating>(),
            Err(RatingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display_and_float() {
        let rating = Rating::from_tenths(46).unwrap();
        assert_eq!(rating.to_string(), "4.6");
        assert_eq!(rating.to_f64(), 4.6);
        assert_eq!(Rating::from_tenths(0).unwrap().to_string(), "0.0");
        assert!(Rating::from_tenths(51).is_err());
    }

    #[test]
    fn test_every_tenth_survives_float_round_trip() {
        for tenths in 0..=Rating::MAX_TENTHS {
            let rating = Rating::from_tenths(tenths).unwrap();
            assert_eq!(Rating::from_f64(rating.to_f64()).unwrap(), rating);
        }
    }
}
