//! Error codes for the test-bench oracles.
//!
//! Only conditions that stop a run are errors. A record whose claimed value
//! disagrees with the recomputed one is a verdict, not an error, and a line
//! that carries no record is skipped without producing either.

use thiserror::Error;

/// All error codes raised by the oracles and the run loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// E100_InvalidPriorityVector (code 100): priority vector is not one-hot.
    #[error("E100_InvalidPriorityVector({0})")]
    E100_InvalidPriorityVector(String),

    /// E101_InvalidBitString (code 101): text is not a run of '0'/'1'.
    #[error("E101_InvalidBitString({0})")]
    E101_InvalidBitString(String),

    /// E200_ShiftOutOfRange (code 200): offset wider than the input under the
    /// `reject` shift policy.
    #[error("E200_ShiftOutOfRange({0})")]
    E200_ShiftOutOfRange(String),

    /// E300_Io (code 300): reading input or writing the report failed.
    #[error("E300_Io({0})")]
    E300_Io(String),

    /// E400_InvalidConfig (code 400): configuration file unreadable or malformed.
    #[error("E400_InvalidConfig({0})")]
    E400_InvalidConfig(String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_InvalidPriorityVector(_) => 100,
            ErrorCode::E101_InvalidBitString(_) => 101,
            ErrorCode::E200_ShiftOutOfRange(_) => 200,
            ErrorCode::E300_Io(_) => 300,
            ErrorCode::E400_InvalidConfig(_) => 400,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_InvalidPriorityVector(_) => "E100_InvalidPriorityVector",
            ErrorCode::E101_InvalidBitString(_) => "E101_InvalidBitString",
            ErrorCode::E200_ShiftOutOfRange(_) => "E200_ShiftOutOfRange",
            ErrorCode::E300_Io(_) => "E300_Io",
            ErrorCode::E400_InvalidConfig(_) => "E400_InvalidConfig",
        }
    }

    /// True for errors that describe a malformed test vector rather than a
    /// failure of the checker itself.
    pub fn is_generation_error(&self) -> bool {
        matches!(self, ErrorCode::E100_InvalidPriorityVector(_))
    }
}

impl From<std::io::Error> for ErrorCode {
    fn from(err: std::io::Error) -> Self {
        ErrorCode::E300_Io(err.to_string())
    }
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, ErrorCode>;
