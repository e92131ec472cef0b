//! Line-by-line check loop.
//!
//! The runner owns the stop/continue decision. Oracles only return verdicts
//! or fatal errors; the runner reports them and decides, from the halt
//! policy, whether to read the next line.

mod summary;

pub use summary::{HaltReason, RunSummary};

use crate::config::RunConfig;
use crate::error::OracleResult;
use crate::oracle::Oracle;
use crate::record::Record;
use crate::report::Reporter;
use std::io::{BufRead, Write};
use tracing::{debug, info, trace, warn};

/// Runs one oracle over a line-oriented input stream.
pub struct CheckRunner<O: Oracle> {
    oracle: O,
    config: RunConfig,
    reporter: Reporter,
}

impl<O: Oracle> CheckRunner<O> {
    /// Create a runner.
    pub fn new(oracle: O, config: RunConfig) -> Self {
        Self {
            oracle,
            config,
            reporter: Reporter::new(config.format),
        }
    }

    /// Check every record in `input`, reporting to `out`.
    ///
    /// Returns `Err` only for I/O failures. Halts are part of the summary.
    /// Lines that are not valid UTF-8 are decoded lossily; they can still
    /// hold a record, or be skipped as noise.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        out: &mut W,
    ) -> OracleResult<RunSummary> {
        let name = self.oracle.name();
        let mut summary = RunSummary::new();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(trim_line_end(&buf));

            let Some(record) = self.oracle.parse(&line) else {
                trace!(oracle = name, line = line_no, "no record");
                summary.record_skip();
                continue;
            };

            match self.oracle.evaluate(&record) {
                Ok(verdict) => {
                    self.reporter.write_verdict(out, name, line_no, &verdict)?;
                    if verdict.is_correct() {
                        debug!(oracle = name, line = line_no, "correct");
                        summary.record_pass();
                        continue;
                    }

                    debug!(oracle = name, line = line_no, outcome = ?verdict.outcome, "mismatch");
                    summary.record_fail();
                    if self.config.halt_on_mismatch {
                        warn!(oracle = name, line = line_no, "halting on computation error");
                        summary.halted = Some(HaltReason::Mismatch { line: line_no });
                        break;
                    }
                }
                Err(error) => {
                    self.reporter
                        .write_fatal(out, name, line_no, &record.fields(), &error)?;
                    warn!(oracle = name, line = line_no, %error, "halting on generation error");
                    summary.halted = Some(HaltReason::Generation {
                        line: line_no,
                        error: error.name().to_string(),
                    });
                    break;
                }
            }
        }

        self.reporter.write_summary(out, name, &summary)?;
        out.flush()?;

        info!(
            oracle = name,
            evaluated = summary.evaluated(),
            all_passed = summary.all_passed(),
            "{}",
            summary.summary()
        );
        Ok(summary)
    }
}

/// Strip the `\n` or `\r\n` terminator `read_until` leaves in place.
fn trim_line_end(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::ArbiterOracle;
    use crate::config::OutputFormat;
    use crate::shifter::ShifterOracle;

    fn run<O: Oracle>(oracle: O, config: RunConfig, input: &str) -> (RunSummary, String) {
        let runner = CheckRunner::new(oracle, config);
        let mut out = Vec::new();
        let summary = runner.run(input.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    const SHIFTER_INPUT: &str = "\
simulation start
in=1100 offset=01 out=0110
in=1100 offset=01 out=1001

in=1011 offset=10 out=1110
";

    #[test]
    fn test_shifter_keeps_going_by_default() {
        let (summary, out) = run(ShifterOracle::default(), RunConfig::shifter(), SHIFTER_INPUT);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 2);
        assert!(summary.halted.is_none());
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(out.matches("Correct result").count(), 2);
        assert_eq!(out.matches("Error in computation").count(), 1);
    }

    #[test]
    fn test_shifter_halts_when_configured() {
        let config = RunConfig {
            halt_on_mismatch: true,
            ..RunConfig::shifter()
        };
        let (summary, out) = run(ShifterOracle::default(), config, SHIFTER_INPUT);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.halted, Some(HaltReason::Mismatch { line: 3 }));
        assert_eq!(summary.exit_code(), 1);
        assert!(!out.contains("in=\t1011"));
    }

    const ARBITER_INPUT: &str = "\
r=101 p=010 res=100
r=101 p=010 res=001
r=000 p=001 res=000
";

    #[test]
    fn test_arbiter_halts_on_first_mismatch_by_default() {
        let (summary, out) = run(ArbiterOracle::new(), RunConfig::arbiter(), ARBITER_INPUT);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.halted, Some(HaltReason::Mismatch { line: 2 }));
        assert!(out.contains("Error in computation: invalid result"));
        assert!(!out.contains("r=\t000"));
    }

    #[test]
    fn test_arbiter_keeps_going_when_configured() {
        let config = RunConfig {
            halt_on_mismatch: false,
            ..RunConfig::arbiter()
        };
        let (summary, _) = run(ArbiterOracle::new(), config, ARBITER_INPUT);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!(summary.halted.is_none());
    }

    #[test]
    fn test_generation_error_always_halts() {
        let config = RunConfig {
            halt_on_mismatch: false,
            ..RunConfig::arbiter()
        };
        let input = "r=101 p=010 res=100\nr=101 p=011 res=100\nr=101 p=010 res=100\n";
        let (summary, out) = run(ArbiterOracle::new(), config, input);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            summary.halted,
            Some(HaltReason::Generation {
                line: 2,
                error: "E100_InvalidPriorityVector".to_string()
            })
        );
        assert_eq!(summary.exit_code(), 2);
        assert!(out.contains("Error in generation"));
        assert_eq!(out.matches("Correct result").count(), 1);
    }

    #[test]
    fn test_noise_does_not_affect_records() {
        let with_noise = "garbage\nr=101 p=010 res=100\n# r=1 p=\n";
        let (noisy, noisy_out) = run(ArbiterOracle::new(), RunConfig::arbiter(), with_noise);
        let (clean, clean_out) =
            run(ArbiterOracle::new(), RunConfig::arbiter(), "r=101 p=010 res=100\n");
        assert_eq!(noisy.passed, clean.passed);
        assert_eq!(noisy.skipped, 2);
        assert_eq!(noisy_out, clean_out);
    }

    #[test]
    fn test_json_run_has_summary_line() {
        let config = RunConfig {
            format: OutputFormat::Json,
            ..RunConfig::shifter()
        };
        let (_, out) = run(ShifterOracle::default(), config, SHIFTER_INPUT);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        let last: serde_json::Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(last["summary"]["passed"], 2);
        assert_eq!(last["summary"]["skipped"], 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"in=1100 offset=01 out=0110\n# sim \xff\xfe garbage\nin=1100 offset=01 out=0110\n";
        let runner = CheckRunner::new(ShifterOracle::default(), RunConfig::shifter());
        let mut out = Vec::new();
        let summary = runner.run(input, &mut out).unwrap();
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.skipped, 1);
        assert!(summary.halted.is_none());
    }

    #[test]
    fn test_record_on_invalid_utf8_line_is_checked() {
        let input: &[u8] = b"\xff in=1100 offset=01 out=0110\r\nr\xe9sultat\n";
        let runner = CheckRunner::new(ShifterOracle::default(), RunConfig::shifter());
        let mut out = Vec::new();
        let summary = runner.run(input, &mut out).unwrap();
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_line_numbers_count_crlf_lines() {
        let config = RunConfig {
            halt_on_mismatch: true,
            ..RunConfig::shifter()
        };
        let input = "noise\r\nin=1100 offset=01 out=0110\r\nin=1100 offset=01 out=1001\r\n";
        let (summary, _) = run(ShifterOracle::default(), config, input);
        assert_eq!(summary.halted, Some(HaltReason::Mismatch { line: 3 }));
    }

    #[test]
    fn test_empty_input() {
        let (summary, out) = run(ShifterOracle::default(), RunConfig::shifter(), "");
        assert_eq!(summary, RunSummary::new());
        assert!(out.is_empty());
    }
}
