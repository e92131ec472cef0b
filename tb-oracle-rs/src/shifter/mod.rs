//! Barrel shifter oracle.
//!
//! The bench drives `in` and `offset` and prints the rotator's `out`. The
//! reference model is a right rotation: the last `shift` bits of `in` move to
//! the front.

mod policy;

pub use policy::ShiftPolicy;

use crate::bits::BitVector;
use crate::error::{ErrorCode, OracleResult};
use crate::oracle::{Oracle, Outcome, Verdict};
use crate::record::{Field, Record, RecordFields, RecordPattern};
use policy::literal_cut;
use tracing::debug;

/// Record grammar: `in=<bits> offset=<bits> out=<bits>`.
pub static SHIFTER_PATTERN: RecordPattern = RecordPattern::new(["in", "offset", "out"]);

/// Detail reported when the `reject` policy refuses an offset.
pub const OFFSET_EXCEEDS_WIDTH: &str = "offset exceeds input width";

/// One shifter test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShifterRecord {
    /// Value fed to the shifter.
    pub input: BitVector,
    /// Rotation amount, unsigned binary.
    pub offset: BitVector,
    /// Output the circuit produced.
    pub output: BitVector,
}

impl ShifterRecord {
    /// Create a record from its three fields.
    pub fn new(input: BitVector, offset: BitVector, output: BitVector) -> Self {
        Self {
            input,
            offset,
            output,
        }
    }

    /// Parse a line, or `None` if it carries no shifter record.
    pub fn parse(line: &str) -> Option<Self> {
        let [input, offset, output] = SHIFTER_PATTERN.extract(line)?;
        Some(Self::new(input, offset, output))
    }
}

impl Record for ShifterRecord {
    fn fields(&self) -> RecordFields {
        RecordFields([
            Field::new("in", self.input.clone()),
            Field::new("offset", self.offset.clone()),
            Field::new("out", self.output.clone()),
        ])
    }
}

/// Reference model for the barrel shifter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShifterOracle {
    policy: ShiftPolicy,
}

impl ShifterOracle {
    /// Create an oracle with the given out-of-range policy.
    pub fn new(policy: ShiftPolicy) -> Self {
        Self { policy }
    }

    /// The output a correct shifter produces for `record`.
    ///
    /// Only the `reject` policy can fail, with `E200_ShiftOutOfRange`.
    pub fn expected_output(&self, record: &ShifterRecord) -> OracleResult<BitVector> {
        let input = &record.input;
        let len = input.len();

        match self.policy {
            ShiftPolicy::Modulo => Ok(input.rotate_right(record.offset.value_mod(len))),
            ShiftPolicy::Reject => match record.offset.to_u64() {
                Some(shift) if shift <= len as u64 => Ok(input.rotate_right(shift as usize)),
                _ => Err(ErrorCode::E200_ShiftOutOfRange(record.offset.to_string())),
            },
            ShiftPolicy::Literal => {
                let cut = literal_cut(len, record.offset.to_u64());
                Ok(input.split_swap(cut))
            }
        }
    }

    /// Evaluate one record. Every record yields a verdict.
    pub fn evaluate(&self, record: &ShifterRecord) -> Verdict {
        match self.expected_output(record) {
            Ok(expected) => Verdict::compare(record, expected, &record.output),
            Err(error) => {
                debug!(%error, policy = %self.policy, "offset refused");
                Verdict {
                    fields: record.fields(),
                    outcome: Outcome::error_with(OFFSET_EXCEEDS_WIDTH),
                    expected: None,
                }
            }
        }
    }
}

impl Oracle for ShifterOracle {
    type Record = ShifterRecord;

    fn name(&self) -> &str {
        "shifter"
    }

    fn parse(&self, line: &str) -> Option<ShifterRecord> {
        ShifterRecord::parse(line)
    }

    fn evaluate(&self, record: &ShifterRecord) -> OracleResult<Verdict> {
        Ok(ShifterOracle::evaluate(self, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str, offset: &str, output: &str) -> ShifterRecord {
        ShifterRecord::new(
            input.parse().unwrap(),
            offset.parse().unwrap(),
            output.parse().unwrap(),
        )
    }

    fn expected(oracle: &ShifterOracle, input: &str, offset: &str) -> String {
        oracle
            .expected_output(&record(input, offset, ""))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_rotate_by_one_correct() {
        let oracle = ShifterOracle::default();
        let verdict = oracle.evaluate(&record("1100", "01", "0110"));
        assert!(verdict.is_correct());
        assert_eq!(verdict.expected.unwrap().to_string(), "0110");
    }

    #[test]
    fn test_rotate_by_one_mismatch() {
        let oracle = ShifterOracle::default();
        let verdict = oracle.evaluate(&record("1100", "01", "1001"));
        assert_eq!(verdict.outcome, Outcome::error());
        assert_eq!(verdict.expected.unwrap().to_string(), "0110");
    }

    #[test]
    fn test_zero_and_full_rotation_are_identity() {
        let oracle = ShifterOracle::default();
        assert!(oracle.evaluate(&record("1011", "0", "1011")).is_correct());
        assert!(oracle.evaluate(&record("1011", "", "1011")).is_correct());
        assert!(oracle.evaluate(&record("1011", "100", "1011")).is_correct());
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let oracle = ShifterOracle::default();
        let verdict = oracle.evaluate(&record("1100", "01", "011"));
        assert!(!verdict.is_correct());
    }

    #[test]
    fn test_modulo_policy_wraps() {
        let oracle = ShifterOracle::new(ShiftPolicy::Modulo);
        // 5 mod 4 == 1
        assert_eq!(expected(&oracle, "1100", "101"), "0110");
        // wide offset, 2^70 mod 3 == 1
        let wide = format!("1{}", "0".repeat(70));
        assert_eq!(expected(&oracle, "100", &wide), "010");
        assert_eq!(expected(&oracle, "", "11"), "");
    }

    #[test]
    fn test_reject_policy() {
        let oracle = ShifterOracle::new(ShiftPolicy::Reject);
        assert_eq!(expected(&oracle, "1100", "100"), "1100");
        assert_eq!(
            oracle.expected_output(&record("1100", "101", "0110")),
            Err(ErrorCode::E200_ShiftOutOfRange("101".to_string()))
        );

        let verdict = oracle.evaluate(&record("1100", "101", "0110"));
        assert_eq!(verdict.outcome, Outcome::error_with(OFFSET_EXCEEDS_WIDTH));
        assert!(verdict.expected.is_none());
    }

    #[test]
    fn test_literal_policy() {
        let oracle = ShifterOracle::new(ShiftPolicy::Literal);
        assert_eq!(expected(&oracle, "1100", "01"), "0110");
        // shift 5 on width 4 cuts one from the end: same as rotating by 1
        assert_eq!(expected(&oracle, "1100", "101"), "0110");
        // shift 9 on width 4 clamps to the identity
        assert_eq!(expected(&oracle, "1100", "1001"), "1100");
    }

    #[test]
    fn test_parse_line() {
        let rec = ShifterRecord::parse("in=1100 offset=01 out=0110").unwrap();
        assert_eq!(rec, record("1100", "01", "0110"));
        assert!(ShifterRecord::parse("r=1 p=1 res=1").is_none());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let oracle = ShifterOracle::default();
        let rec = record("10010", "11", "10010");
        assert_eq!(oracle.evaluate(&rec), oracle.evaluate(&rec));
    }
}
