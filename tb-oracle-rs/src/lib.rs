//! Test-bench oracles - reference-model checkers for digital-logic benches.
//!
//! Each checker reads simulation output line by line, pulls out the records
//! the bench printed, recomputes the expected value from first principles and
//! reports whether the circuit agreed.
//!
//! # Architecture
//!
//! - [`bits`] - MSB-first bit vectors
//! - [`record`] - `key=<bits>` record extraction
//! - [`shifter`] - barrel shifter (rotate right by offset)
//! - [`arbiter`] - round-robin priority arbiter (one-hot grant)
//! - [`runner`] - line loop with per-oracle halt policy
//! - [`report`] - text and JSON verdict output
//! - [`config`] - run configuration
//! - [`error`] - error codes
//!
//! # Example
//!
//! ```
//! use tb_oracle::{ShifterOracle, ShifterRecord};
//!
//! let record = ShifterRecord::parse("in=1100 offset=01 out=0110").unwrap();
//! assert!(ShifterOracle::default().evaluate(&record).is_correct());
//! ```

// Library code reports failures as ErrorCode values; the binary decides
// what to do with them.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod arbiter;
pub mod bits;
pub mod config;
pub mod error;
pub mod oracle;
pub mod record;
pub mod report;
pub mod runner;
pub mod shifter;

// Re-export commonly used types
pub use arbiter::{ArbiterOracle, ArbiterRecord};
pub use bits::BitVector;
pub use config::{ConfigFile, OutputFormat, RunConfig};
pub use error::{ErrorCode, OracleResult};
pub use oracle::{Oracle, Outcome, Verdict};
pub use runner::{CheckRunner, HaltReason, RunSummary};
pub use shifter::{ShiftPolicy, ShifterOracle, ShifterRecord};
