//! The parse -> recompute -> compare contract shared by both checkers.

use crate::bits::BitVector;
use crate::error::OracleResult;
use crate::record::{Record, RecordFields};

/// Outcome of comparing a recomputed value to the claimed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Claimed value matches the reference model.
    Correct,
    /// Claimed value disagrees with the reference model.
    Error {
        /// Short explanation, if the oracle distinguishes failure kinds.
        detail: Option<&'static str>,
    },
}

impl Outcome {
    /// A mismatch without further explanation.
    pub const fn error() -> Self {
        Outcome::Error { detail: None }
    }

    /// A mismatch with an explanation.
    pub const fn error_with(detail: &'static str) -> Self {
        Outcome::Error {
            detail: Some(detail),
        }
    }
}

/// Result of evaluating one record: the echoed fields, the outcome and the
/// value the reference model expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Original record fields.
    pub fields: RecordFields,
    /// Pass/fail classification.
    pub outcome: Outcome,
    /// Recomputed value, when one is defined for the record.
    pub expected: Option<BitVector>,
}

impl Verdict {
    /// Compare `claimed` with `expected` and build the verdict.
    pub fn compare<R: Record>(record: &R, expected: BitVector, claimed: &BitVector) -> Self {
        let outcome = if &expected == claimed {
            Outcome::Correct
        } else {
            Outcome::error()
        };
        Verdict {
            fields: record.fields(),
            outcome,
            expected: Some(expected),
        }
    }

    /// True if the claimed value was correct.
    pub fn is_correct(&self) -> bool {
        matches!(self.outcome, Outcome::Correct)
    }
}

/// A reference-model checker for one test bench.
///
/// Implementations are pure: evaluating the same record twice gives the same
/// verdict, and nothing is printed or terminated from inside an oracle.
pub trait Oracle {
    /// Typed record this oracle checks.
    type Record: Record;

    /// Short name used in reports and logs.
    fn name(&self) -> &str;

    /// Parse one line, or `None` if it carries no record.
    fn parse(&self, line: &str) -> Option<Self::Record>;

    /// Recompute and compare. An `Err` is fatal for the whole run.
    fn evaluate(&self, record: &Self::Record) -> OracleResult<Verdict>;
}
