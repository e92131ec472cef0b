//! Run configuration: halt policy, shift policy and output format.
//!
//! Each oracle has its own defaults. A JSON config file can override either
//! oracle independently:
//!
//! ```json
//! {
//!   "shifter": { "halt_on_mismatch": false, "shift_policy": "modulo" },
//!   "arbiter": { "halt_on_mismatch": true, "format": "json" }
//! }
//! ```
//!
//! Command-line flags are applied on top of the file.

use crate::error::{ErrorCode, OracleResult};
use crate::shifter::ShiftPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Report format written to the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable verdict blocks.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected text or json)", other)),
        }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Stop at the first record whose claimed value is wrong.
    pub halt_on_mismatch: bool,
    /// Offset handling for the shifter; ignored by the arbiter.
    pub shift_policy: ShiftPolicy,
    /// Report format.
    pub format: OutputFormat,
}

impl RunConfig {
    /// Shifter defaults: report every record, never stop early.
    pub const fn shifter() -> Self {
        Self {
            halt_on_mismatch: false,
            shift_policy: ShiftPolicy::Modulo,
            format: OutputFormat::Text,
        }
    }

    /// Arbiter defaults: stop at the first wrong grant.
    pub const fn arbiter() -> Self {
        Self {
            halt_on_mismatch: true,
            shift_policy: ShiftPolicy::Modulo,
            format: OutputFormat::Text,
        }
    }
}

/// Partial settings; unset fields keep the value underneath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Override for [`RunConfig::halt_on_mismatch`].
    pub halt_on_mismatch: Option<bool>,
    /// Override for [`RunConfig::shift_policy`].
    pub shift_policy: Option<ShiftPolicy>,
    /// Override for [`RunConfig::format`].
    pub format: Option<OutputFormat>,
}

impl ConfigOverrides {
    /// Apply these overrides to `base`.
    pub fn apply(&self, base: RunConfig) -> RunConfig {
        RunConfig {
            halt_on_mismatch: self.halt_on_mismatch.unwrap_or(base.halt_on_mismatch),
            shift_policy: self.shift_policy.unwrap_or(base.shift_policy),
            format: self.format.unwrap_or(base.format),
        }
    }
}

/// Contents of a config file: one optional section per oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Shifter section.
    pub shifter: ConfigOverrides,
    /// Arbiter section.
    pub arbiter: ConfigOverrides,
}

impl ConfigFile {
    /// Parse a config file from JSON text.
    pub fn from_json(text: &str) -> OracleResult<Self> {
        serde_json::from_str(text).map_err(|e| ErrorCode::E400_InvalidConfig(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> OracleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ErrorCode::E400_InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Section for the named oracle, if it has one.
    pub fn section(&self, oracle: &str) -> Option<&ConfigOverrides> {
        match oracle {
            "shifter" => Some(&self.shifter),
            "arbiter" => Some(&self.arbiter),
            _ => None,
        }
    }
}
