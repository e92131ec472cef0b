//! Treatment of offsets at or beyond the input width.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the shifter oracle interprets `shift > len(input)`.
///
/// Offsets up to and including the width behave identically under every
/// policy: 0 and `len` are both the identity rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPolicy {
    /// Reduce the offset modulo the width (a barrel shifter wraps).
    #[default]
    Modulo,
    /// An offset wider than the input is always a failing record.
    Reject,
    /// Signed-slice semantics: `input[len-shift:] + input[:len-shift]` with a
    /// negative cut counted from the end and clamped at 0.
    Literal,
}

impl ShiftPolicy {
    /// Policy name as accepted on the command line and in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShiftPolicy::Modulo => "modulo",
            ShiftPolicy::Reject => "reject",
            ShiftPolicy::Literal => "literal",
        }
    }
}

impl fmt::Display for ShiftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modulo" => Ok(ShiftPolicy::Modulo),
            "reject" => Ok(ShiftPolicy::Reject),
            "literal" => Ok(ShiftPolicy::Literal),
            other => Err(format!(
                "unknown shift policy '{}' (expected modulo, reject or literal)",
                other
            )),
        }
    }
}

/// Split point for the literal policy. `None` means the offset does not even
/// fit in a `u64`, which is far past any clamp.
pub(crate) fn literal_cut(len: usize, shift: Option<u64>) -> usize {
    let len = len as u64;
    let cut = match shift {
        Some(s) if s <= len => len - s,
        Some(s) if s <= len.saturating_mul(2) => len.saturating_mul(2) - s,
        _ => 0,
    };
    cut as usize
}
