//! Per-run tallies and the reason a run stopped early.

use serde::Serialize;

/// Why a run stopped before the end of its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HaltReason {
    /// A claimed value was wrong and the halt policy stops on mismatches.
    Mismatch {
        /// 1-based input line of the failing record.
        line: usize,
    },
    /// The record itself was malformed (e.g. priority vector not one-hot).
    Generation {
        /// 1-based input line of the malformed record.
        line: usize,
        /// Error name.
        error: String,
    },
}

impl HaltReason {
    /// Input line at which the run stopped.
    pub fn line(&self) -> usize {
        match self {
            HaltReason::Mismatch { line } | HaltReason::Generation { line, .. } => *line,
        }
    }
}

/// Results from one pass over an input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Records whose claimed value was correct.
    pub passed: usize,
    /// Records whose claimed value was wrong.
    pub failed: usize,
    /// Lines that carried no record.
    pub skipped: usize,
    /// Set when the run stopped before end of input.
    pub halted: Option<HaltReason>,
}

impl RunSummary {
    /// Exit status: the run finished (or stopped) with nothing to flag.
    pub const EXIT_OK: u8 = 0;
    /// Exit status: halted on a wrong claimed value.
    pub const EXIT_MISMATCH: u8 = 1;
    /// Exit status: halted on a malformed record.
    pub const EXIT_GENERATION: u8 = 2;
    /// Exit status: I/O or configuration failure.
    pub const EXIT_FAILURE: u8 = 3;

    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a passing record.
    pub fn record_pass(&mut self) {
        self.passed += 1;
    }

    /// Record a failing record.
    pub fn record_fail(&mut self) {
        self.failed += 1;
    }

    /// Record a line without a record.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Number of records evaluated (passed or failed).
    pub fn evaluated(&self) -> usize {
        self.passed + self.failed
    }

    /// True if every evaluated record passed and the run was not halted.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.halted.is_none()
    }

    /// Process exit status for this run.
    ///
    /// Mismatches only affect the status when they halted the run; an oracle
    /// configured to keep going reports them and still exits 0.
    pub fn exit_code(&self) -> u8 {
        match self.halted {
            None => Self::EXIT_OK,
            Some(HaltReason::Mismatch { .. }) => Self::EXIT_MISMATCH,
            Some(HaltReason::Generation { .. }) => Self::EXIT_GENERATION,
        }
    }

    /// Format a summary string.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        );
        if let Some(halt) = &self.halted {
            text.push_str(&format!(" (halted at line {})", halt.line()));
        }
        text
    }
}
