//! # Coin Module
//!
//! The closed set of coin denominations a machine can hold.
//!
//! ## Denominations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Coin        Face value   Pence                                        │
//! │  ─────────   ──────────   ─────                                        │
//! │  OneP          0.01           1                                        │
//! │  TwoP          0.02           2                                        │
//! │  FiveP         0.05           5                                        │
//! │  TenP          0.10          10                                        │
//! │  TwentyP       0.20          20                                        │
//! │  FiftyP        0.50          50                                        │
//! │  OnePound      1.00         100                                        │
//! │  TwoPound      2.00         200                                        │
//! │  FivePound     5.00         500                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers outside the core speak in decimal face values. They are mapped to
//! a `Coin` exactly once, at the boundary, by [`Coin::from_face_value`]; from
//! then on every amount is integer pence.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{VendError, VendResult};
use crate::money::Money;

/// A UK coin denomination.
///
/// Variants are declared in ascending value, so the derived `Ord` sorts
/// coins by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Coin {
    OneP,
    TwoP,
    FiveP,
    TenP,
    TwentyP,
    FiftyP,
    OnePound,
    TwoPound,
    FivePound,
}

impl Coin {
    /// Every denomination, ascending by value.
    pub const ALL: [Coin; 9] = [
        Coin::OneP,
        Coin::TwoP,
        Coin::FiveP,
        Coin::TenP,
        Coin::TwentyP,
        Coin::FiftyP,
        Coin::OnePound,
        Coin::TwoPound,
        Coin::FivePound,
    ];

    /// Returns the raw value in pence.
    #[inline]
    pub const fn pence(self) -> i64 {
        match self {
            Coin::OneP => 1,
            Coin::TwoP => 2,
            Coin::FiveP => 5,
            Coin::TenP => 10,
            Coin::TwentyP => 20,
            Coin::FiftyP => 50,
            Coin::OnePound => 100,
            Coin::TwoPound => 200,
            Coin::FivePound => 500,
        }
    }

    /// Returns the value of this coin as `Money`.
    ///
    /// ## Errors
    /// `InvalidState` if the denomination has no positive value. Unreachable
    /// for the enumerated set, but the change search divides by this value.
    pub fn value(self) -> VendResult<Money> {
        let pence = self.pence();
        if pence <= 0 {
            return Err(VendError::InvalidState(format!(
                "coin {:?} has non-positive value {}",
                self, pence
            )));
        }
        Ok(Money::from_pence(pence))
    }

    /// Maps a decimal face value (`0.2`, `1.0`, ...) to a coin.
    ///
    /// Comparison is exact, not epsilon-tolerant: `0.2` matches, `0.2000001`
    /// does not.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::Coin;
    ///
    /// assert_eq!(Coin::from_face_value(0.2).unwrap(), Coin::TwentyP);
    /// assert!(Coin::from_face_value(0.15).is_err());
    /// ```
    pub fn from_face_value(face_value: f64) -> VendResult<Coin> {
        Coin::ALL
            .into_iter()
            .find(|coin| coin.face_value() == face_value)
            .ok_or(VendError::UnsupportedCoin { face_value })
    }

    /// Returns the decimal face value (`20p` → `0.2`).
    pub fn face_value(self) -> f64 {
        match self {
            Coin::OneP => 0.01,
            Coin::TwoP => 0.02,
            Coin::FiveP => 0.05,
            Coin::TenP => 0.1,
            Coin::TwentyP => 0.2,
            Coin::FiftyP => 0.5,
            Coin::OnePound => 1.0,
            Coin::TwoPound => 2.0,
            Coin::FivePound => 5.0,
        }
    }
}

impl TryFrom<f64> for Coin {
    type Error = VendError;

    fn try_from(face_value: f64) -> Result<Self, Self::Error> {
        Coin::from_face_value(face_value)
    }
}

/// `1p`, `50p`, `£1`, `£5`.
impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pence = self.pence();
        if pence < 100 {
            write!(f, "{}p", pence)
        } else {
            write!(f, "£{}", pence / 100)
        }
    }
}

/// Sums the value of a list of coins.
pub fn total_value(coins: &[Coin]) -> VendResult<Money> {
    coins.iter().map(|coin| coin.value()).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
