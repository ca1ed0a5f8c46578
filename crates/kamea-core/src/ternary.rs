//! Fixed-width base-3 digit strings and their integer values.
//!
//! A [`TernaryString`] is the digit view of a ditrune: most-significant digit
//! first, every digit in {0, 1, 2}. Conversions in both directions are
//! lossless for a fixed width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_WIDTH, WIDTH};
use crate::error::{KameaError, Result};

/// Largest value representable in `width` ternary digits (3^width - 1).
pub fn max_value(width: usize) -> u64 {
    3u64.pow(width as u32) - 1
}

pub(crate) fn validate_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(KameaError::InvalidWidth {
            width,
            reason: format!("must lie in [1, {MAX_WIDTH}]"),
        });
    }
    Ok(())
}

fn digit_char(d: u8) -> char {
    char::from_digit(u32::from(d), 36).unwrap_or('?')
}

/// Ordered ternary digits, most significant first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TernaryString {
    digits: Vec<u8>,
}

impl TernaryString {
    /// Build from raw digits, rejecting anything outside {0, 1, 2}.
    pub fn from_digits(digits: Vec<u8>) -> Result<Self> {
        validate_width(digits.len())?;
        if let Some(position) = digits.iter().position(|&d| d > 2) {
            return Err(KameaError::InvalidDigit {
                found: digit_char(digits[position]),
                position,
            });
        }
        Ok(Self { digits })
    }

    /// Digits that are already known to be valid (produced by an operation
    /// on a valid string).
    pub(crate) fn from_valid(digits: Vec<u8>) -> Self {
        debug_assert!(digits.iter().all(|&d| d <= 2));
        Self { digits }
    }

    pub fn width(&self) -> usize {
        self.digits.len()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Integer value: Σ digit[i] · 3^(width-1-i).
    pub fn to_decimal(&self) -> u64 {
        self.digits
            .iter()
            .fold(0u64, |acc, &d| acc * 3 + u64::from(d))
    }

    /// Left-pad with zero digits up to `width`. Never truncates.
    pub fn pad_to(&self, width: usize) -> Self {
        if width <= self.width() {
            return self.clone();
        }
        let mut digits = vec![0u8; width - self.width()];
        digits.extend_from_slice(&self.digits);
        Self::from_valid(digits)
    }

    /// Bigram at two 1-indexed positions, `None` if either is out of range.
    pub fn bigram(&self, first: usize, second: usize) -> Option<Bigram> {
        let hi = *self.digits.get(first.checked_sub(1)?)?;
        let lo = *self.digits.get(second.checked_sub(1)?)?;
        Some(Bigram { hi, lo })
    }

    /// Positions 3 and 4 of a six-digit string.
    pub fn core(&self) -> Option<Bigram> {
        self.six_digit_bigram(3, 4)
    }

    /// Positions 2 and 5 of a six-digit string.
    pub fn body(&self) -> Option<Bigram> {
        self.six_digit_bigram(2, 5)
    }

    /// Positions 1 and 6 of a six-digit string.
    pub fn skin(&self) -> Option<Bigram> {
        self.six_digit_bigram(1, 6)
    }

    fn six_digit_bigram(&self, first: usize, second: usize) -> Option<Bigram> {
        if self.width() != WIDTH {
            return None;
        }
        self.bigram(first, second)
    }
}

impl fmt::Display for TernaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for TernaryString {
    type Err = KameaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut digits = Vec::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => digits.push(0),
                '1' => digits.push(1),
                '2' => digits.push(2),
                found => return Err(KameaError::InvalidDigit { found, position }),
            }
        }
        validate_width(digits.len())?;
        Ok(Self { digits })
    }
}

impl TryFrom<String> for TernaryString {
    type Error = KameaError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TernaryString> for String {
    fn from(t: TernaryString) -> Self {
        t.to_string()
    }
}

/// Two digits read from fixed positions of a ditrune.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bigram {
    pub hi: u8,
    pub lo: u8,
}

impl Bigram {
    pub const fn new(hi: u8, lo: u8) -> Self {
        Self { hi, lo }
    }

    /// Value in 0..9.
    pub fn to_decimal(self) -> u8 {
        self.hi * 3 + self.lo
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hi, self.lo)
    }
}

/// Convert `value` to exactly `width` digits, zero-padded on the left.
pub fn decimal_to_ternary(value: i64, width: usize) -> Result<TernaryString> {
    validate_width(width)?;
    let max = max_value(width);
    if value < 0 || value as u64 > max {
        return Err(KameaError::InvalidValue { value, width, max });
    }

    let mut remaining = value as u64;
    let mut digits = vec![0u8; width];
    for slot in digits.iter_mut().rev() {
        *slot = (remaining % 3) as u8;
        remaining /= 3;
    }
    Ok(TernaryString::from_valid(digits))
}

/// Parse a digit string and return its integer value.
pub fn ternary_to_decimal(s: &str) -> Result<u64> {
    Ok(s.parse::<TernaryString>()?.to_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> TernaryString {
        s.parse().unwrap()
    }

    #[test]
    fn test_all_ones_is_364() {
        assert_eq!(decimal_to_ternary(364, 6).unwrap().to_string(), "111111");
        assert_eq!(ternary_to_decimal("111111").unwrap(), 364);
    }

    #[test]
    fn test_left_padding() {
        assert_eq!(decimal_to_ternary(0, 6).unwrap().to_string(), "000000");
        assert_eq!(decimal_to_ternary(5, 6).unwrap().to_string(), "000012");
        assert_eq!(decimal_to_ternary(5, 2).unwrap().to_string(), "12");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(decimal_to_ternary(728, 6).unwrap().to_string(), "222222");
        assert_eq!(ternary_to_decimal("222222").unwrap(), 728);
        let widest = decimal_to_ternary(i64::MAX, MAX_WIDTH).unwrap();
        assert_eq!(widest.to_decimal(), i64::MAX as u64);
    }

    #[test]
    fn test_value_out_of_range() {
        let err = decimal_to_ternary(729, 6).unwrap_err();
        assert_eq!(
            err,
            KameaError::InvalidValue {
                value: 729,
                width: 6,
                max: 728
            }
        );
        assert!(err.to_string().contains("729"));
        assert!(matches!(
            decimal_to_ternary(-1, 6),
            Err(KameaError::InvalidValue { value: -1, .. })
        ));
    }

    #[test]
    fn test_invalid_digit_reports_position() {
        let err = ternary_to_decimal("0120a3").unwrap_err();
        assert_eq!(
            err,
            KameaError::InvalidDigit {
                found: 'a',
                position: 4
            }
        );
        assert!(matches!(
            ternary_to_decimal("3"),
            Err(KameaError::InvalidDigit { found: '3', .. })
        ));
    }

    #[test]
    fn test_invalid_widths() {
        assert!(matches!(
            decimal_to_ternary(0, 0),
            Err(KameaError::InvalidWidth { width: 0, .. })
        ));
        assert!(matches!(
            decimal_to_ternary(0, MAX_WIDTH + 1),
            Err(KameaError::InvalidWidth { .. })
        ));
        assert!(matches!(
            "".parse::<TernaryString>(),
            Err(KameaError::InvalidWidth { width: 0, .. })
        ));
    }

    #[test]
    fn test_from_digits_rejects_large_digit() {
        assert!(TernaryString::from_digits(vec![0, 1, 2]).is_ok());
        assert_eq!(
            TernaryString::from_digits(vec![0, 3]).unwrap_err(),
            KameaError::InvalidDigit {
                found: '3',
                position: 1
            }
        );
    }

    #[test]
    fn test_pad_to_never_truncates() {
        assert_eq!(t("12").pad_to(6), t("000012"));
        assert_eq!(t("120012").pad_to(3), t("120012"));
    }

    #[test]
    fn test_named_bigrams() {
        let s = t("012210");
        assert_eq!(s.skin(), Some(Bigram::new(0, 0)));
        assert_eq!(s.body(), Some(Bigram::new(1, 1)));
        assert_eq!(s.core(), Some(Bigram::new(2, 2)));
        assert_eq!(s.bigram(1, 2), Some(Bigram::new(0, 1)));
        assert_eq!(s.bigram(0, 2), None);
        assert_eq!(s.bigram(1, 7), None);
        assert_eq!(t("0122").core(), None);
    }

    #[test]
    fn test_bigram_decimal() {
        assert_eq!(Bigram::new(0, 0).to_decimal(), 0);
        assert_eq!(Bigram::new(2, 1).to_decimal(), 7);
        assert_eq!(Bigram::new(2, 2).to_string(), "22");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&t("102201")).unwrap();
        assert_eq!(json, "\"102201\"");
        let back: TernaryString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("102201"));
        assert!(serde_json::from_str::<TernaryString>("\"1x\"").is_err());
    }

    fn digit_string() -> impl Strategy<Value = String> {
        proptest::collection::vec(0u8..3, 1..=12)
            .prop_map(|ds| ds.iter().map(|d| char::from(b'0' + d)).collect())
    }

    proptest! {
        #[test]
        fn prop_string_roundtrip(s in digit_string()) {
            let value = ternary_to_decimal(&s).unwrap();
            let back = decimal_to_ternary(value as i64, s.len()).unwrap();
            prop_assert_eq!(back.to_string(), s);
        }

        #[test]
        fn prop_value_roundtrip(width in 1usize..=12, seed in any::<u64>()) {
            let value = (seed % (max_value(width) + 1)) as i64;
            let s = decimal_to_ternary(value, width).unwrap();
            prop_assert_eq!(s.width(), width);
            prop_assert_eq!(s.to_decimal(), value as u64);
        }
    }
}
