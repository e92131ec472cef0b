//! BitVector: an immutable, MSB-first sequence of binary digits.

use crate::error::{ErrorCode, OracleResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits, index 0 = most-significant (leftmost) position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    bits: Vec<bool>,
}

impl Serialize for BitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BitVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for BitVector {
    type Err = ErrorCode;

    fn from_str(s: &str) -> OracleResult<Self> {
        Self::parse(s).ok_or_else(|| ErrorCode::E101_InvalidBitString(s.to_string()))
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        BitVector { bits }
    }
}

impl BitVector {
    /// Parse a run of '0'/'1' characters. Any other character rejects the text.
    ///
    /// The empty string is a valid, zero-width vector.
    pub fn parse(text: &str) -> Option<Self> {
        text.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|bits| BitVector { bits })
    }

    /// An all-zero vector of the given width.
    pub fn zeros(width: usize) -> Self {
        BitVector {
            bits: vec![false; width],
        }
    }

    /// A vector of the given width with a single '1' at `index`.
    ///
    /// An out-of-range index yields the all-zero vector.
    pub fn one_hot(width: usize, index: usize) -> Self {
        let mut bits = vec![false; width];
        if let Some(bit) = bits.get_mut(index) {
            *bit = true;
        }
        BitVector { bits }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the zero-width vector.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bit at `index`, or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of '1' positions.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True when no position is set (including the zero-width vector).
    pub fn is_zero(&self) -> bool {
        !self.bits.contains(&true)
    }

    /// Index of the only '1', or `None` unless the vector is exactly one-hot.
    pub fn one_hot_index(&self) -> Option<usize> {
        let mut ones = self
            .bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i));
        match (ones.next(), ones.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    /// Unsigned value, or `None` if it does not fit in a `u64`.
    ///
    /// Leading zeros are free, so wide vectors with small values still convert.
    pub fn to_u64(&self) -> Option<u64> {
        self.bits.iter().try_fold(0u64, |acc, &bit| {
            acc.checked_mul(2)?.checked_add(u64::from(bit))
        })
    }

    /// Unsigned value reduced modulo `modulus`, computed without overflow for
    /// vectors of any width. A zero modulus yields 0.
    pub fn value_mod(&self, modulus: usize) -> usize {
        if modulus == 0 {
            return 0;
        }
        let m = modulus as u128;
        self.bits
            .iter()
            .fold(0u128, |acc, &bit| (acc * 2 + u128::from(bit)) % m) as usize
    }

    /// Rotate right by `k` positions: the last `k` bits move to the front.
    ///
    /// `k` is reduced modulo the width; rotating a zero-width vector is a no-op.
    pub fn rotate_right(&self, k: usize) -> Self {
        let len = self.len();
        if len == 0 {
            return self.clone();
        }
        let cut = len - k % len;
        self.split_swap(cut)
    }

    /// Rotate left by `k` positions: the first `k` bits move to the back.
    pub fn rotate_left(&self, k: usize) -> Self {
        let len = self.len();
        if len == 0 {
            return self.clone();
        }
        self.split_swap(k % len)
    }

    /// Returns `self[cut..] ++ self[..cut]`. `cut` must not exceed the width.
    pub(crate) fn split_swap(&self, cut: usize) -> Self {
        let cut = cut.min(self.len());
        let mut bits = Vec::with_capacity(self.len());
        bits.extend_from_slice(&self.bits[cut..]);
        bits.extend_from_slice(&self.bits[..cut]);
        BitVector { bits }
    }
}
