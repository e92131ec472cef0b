//! Round-robin priority arbiter oracle.
//!
//! The bench drives a request vector `r` and a one-hot priority pointer `p`,
//! and prints the arbiter's grant `res`. Starting at the priority position,
//! the reference model walks towards index 0, wrapping to the last index,
//! and grants the first requester it meets.

mod scan;

pub use scan::priority_scan;

use crate::bits::BitVector;
use crate::error::{ErrorCode, OracleResult};
use crate::oracle::{Oracle, Outcome, Verdict};
use crate::record::{Field, Record, RecordFields, RecordPattern};

/// Record grammar: `r=<bits> p=<bits> res=<bits>`.
pub static ARBITER_PATTERN: RecordPattern = RecordPattern::new(["r", "p", "res"]);

/// Detail for a grant issued while nobody was requesting.
pub const GRANT_WITHOUT_REQUEST: &str = "with 0 requests there should be no grant";

/// Detail for a grant that does not match the priority scan.
pub const INVALID_RESULT: &str = "invalid result";

/// One arbiter test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbiterRecord {
    /// Request lines, one bit per requester.
    pub requests: BitVector,
    /// Priority pointer; must be one-hot.
    pub priority: BitVector,
    /// Grant the circuit produced.
    pub grant: BitVector,
}

impl ArbiterRecord {
    /// Create a record from its three fields.
    pub fn new(requests: BitVector, priority: BitVector, grant: BitVector) -> Self {
        Self {
            requests,
            priority,
            grant,
        }
    }

    /// Parse a line, or `None` if it carries no arbiter record.
    pub fn parse(line: &str) -> Option<Self> {
        let [requests, priority, grant] = ARBITER_PATTERN.extract(line)?;
        Some(Self::new(requests, priority, grant))
    }
}

impl Record for ArbiterRecord {
    fn fields(&self) -> RecordFields {
        RecordFields([
            Field::new("r", self.requests.clone()),
            Field::new("p", self.priority.clone()),
            Field::new("res", self.grant.clone()),
        ])
    }
}

/// Reference model for the round-robin arbiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArbiterOracle;

impl ArbiterOracle {
    /// Create an arbiter oracle.
    pub fn new() -> Self {
        Self
    }

    /// The grant a correct arbiter produces, `priority.len()` bits wide.
    ///
    /// Fails with `E100_InvalidPriorityVector` when the priority pointer is
    /// not exactly one-hot: such a vector means the bench itself is broken.
    pub fn expected_grant(&self, record: &ArbiterRecord) -> OracleResult<BitVector> {
        let start = record
            .priority
            .one_hot_index()
            .ok_or_else(|| ErrorCode::E100_InvalidPriorityVector(record.priority.to_string()))?;
        let width = record.priority.len();

        Ok(match priority_scan(&record.requests, start, width) {
            Some(winner) => BitVector::one_hot(width, winner),
            None => BitVector::zeros(width),
        })
    }

    /// Evaluate one record.
    ///
    /// With no requests the claim only has to be free of grants. Otherwise
    /// every position the claim carries is checked against the expected
    /// one-hot; positions past the priority width must be '0'.
    pub fn evaluate(&self, record: &ArbiterRecord) -> OracleResult<Verdict> {
        let expected = self.expected_grant(record)?;
        let outcome = if record.requests.is_zero() {
            if record.grant.is_zero() {
                Outcome::Correct
            } else {
                Outcome::error_with(GRANT_WITHOUT_REQUEST)
            }
        } else if grant_matches(&record.grant, &expected) {
            Outcome::Correct
        } else {
            Outcome::error_with(INVALID_RESULT)
        };

        Ok(Verdict {
            fields: record.fields(),
            outcome,
            expected: Some(expected),
        })
    }
}

/// Position-by-position check over the claimed width.
fn grant_matches(claimed: &BitVector, expected: &BitVector) -> bool {
    (0..claimed.len()).all(|i| claimed.bit(i) == Some(expected.bit(i).unwrap_or(false)))
}

impl Oracle for ArbiterOracle {
    type Record = ArbiterRecord;

    fn name(&self) -> &str {
        "arbiter"
    }

    fn parse(&self, line: &str) -> Option<ArbiterRecord> {
        ArbiterRecord::parse(line)
    }

    fn evaluate(&self, record: &ArbiterRecord) -> OracleResult<Verdict> {
        ArbiterOracle::evaluate(self, record)
    }
}
