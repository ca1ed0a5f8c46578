//! Digit-wise transition and the three symmetry transforms.
//!
//! `t(a, b) = -(a + b) mod 3` is commutative and idempotent on equal digits.
//! Reversal acts on digit positions and conrune on digit values, so the two
//! commute and every non-identity [`Transform`] is an involution.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ternary::{TernaryString, decimal_to_ternary};

/// Transition of two digits: `(-(a + b)) mod 3`.
pub fn transition_digit(a: u8, b: u8) -> u8 {
    (6 - (a % 3) - (b % 3)) % 3
}

/// Position-wise transition. The narrower operand is left-padded with zeros,
/// so the result is as wide as the wider operand.
pub fn transition(a: &TernaryString, b: &TernaryString) -> TernaryString {
    let width = a.width().max(b.width());
    let a = a.pad_to(width);
    let b = b.pad_to(width);
    let digits = a
        .digits()
        .iter()
        .zip(b.digits())
        .map(|(&x, &y)| transition_digit(x, y))
        .collect();
    TernaryString::from_valid(digits)
}

/// Parse two digit strings and transition them.
pub fn transition_str(a: &str, b: &str) -> Result<TernaryString> {
    Ok(transition(&a.parse()?, &b.parse()?))
}

/// Transition of two integers at a fixed width, returned as an integer.
pub fn transition_decimal(a: i64, b: i64, width: usize) -> Result<u64> {
    let a = decimal_to_ternary(a, width)?;
    let b = decimal_to_ternary(b, width)?;
    Ok(transition(&a, &b).to_decimal())
}

/// Reverse digit order.
pub fn reversal(v: &TernaryString) -> TernaryString {
    let mut digits = v.digits().to_vec();
    digits.reverse();
    TernaryString::from_valid(digits)
}

/// Polarity swap: 0→0, 1→2, 2→1 at every position.
pub fn conrune(v: &TernaryString) -> TernaryString {
    let digits = v.digits().iter().map(|&d| (3 - d) % 3).collect();
    TernaryString::from_valid(digits)
}

/// `conrune(reversal(v))`.
pub fn complex_transform(v: &TernaryString) -> TernaryString {
    conrune(&reversal(v))
}

/// The four symmetries of a ditrune. Together they form the Klein four-group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Identity,
    Reversal,
    Conrune,
    ComplexTransform,
}

impl Transform {
    pub const ALL: [Transform; 4] = [
        Transform::Identity,
        Transform::Reversal,
        Transform::Conrune,
        Transform::ComplexTransform,
    ];

    pub fn apply(self, v: &TernaryString) -> TernaryString {
        match self {
            Self::Identity => v.clone(),
            Self::Reversal => reversal(v),
            Self::Conrune => conrune(v),
            Self::ComplexTransform => complex_transform(v),
        }
    }

    pub fn apply_decimal(self, value: i64, width: usize) -> Result<u64> {
        Ok(self.apply(&decimal_to_ternary(value, width)?).to_decimal())
    }

    /// Group product: applying `self` then `other`.
    pub fn then(self, other: Transform) -> Transform {
        use Transform::*;
        match (self, other) {
            (Identity, t) | (t, Identity) => t,
            (a, b) if a == b => Identity,
            (Reversal, Conrune) | (Conrune, Reversal) => ComplexTransform,
            (Reversal, ComplexTransform) | (ComplexTransform, Reversal) => Conrune,
            _ => Reversal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Reversal => "reversal",
            Self::Conrune => "conrune",
            Self::ComplexTransform => "complex_transform",
        }
    }
}
