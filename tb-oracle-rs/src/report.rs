//! Verdict reporting.
//!
//! Text output is the block format test-bench logs are grepped for:
//!
//! ```text
//! Correct result
//! in=	1100
//! offset=	01
//! out=	0110
//! ```
//!
//! JSON output writes one object per record, plus a trailing summary.

use crate::bits::BitVector;
use crate::config::OutputFormat;
use crate::error::{ErrorCode, OracleResult};
use crate::oracle::{Outcome, Verdict};
use crate::record::RecordFields;
use crate::runner::RunSummary;
use serde::Serialize;
use std::io::Write;

/// Label for a passing record.
pub const CORRECT_LABEL: &str = "Correct result";

/// Label prefix for a failing record.
pub const ERROR_LABEL: &str = "Error in computation";

/// Human-readable label for a verdict outcome.
pub fn verdict_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Correct => CORRECT_LABEL.to_string(),
        Outcome::Error { detail: None } => ERROR_LABEL.to_string(),
        Outcome::Error {
            detail: Some(detail),
        } => format!("{}: {}", ERROR_LABEL, detail),
    }
}

/// Human-readable message for a fatal error on a record.
pub fn fatal_message(error: &ErrorCode) -> String {
    match error {
        ErrorCode::E100_InvalidPriorityVector(_) => {
            "Error in generation: p vector must have exactly a 1".to_string()
        }
        other => format!("Error: {}", other),
    }
}

#[derive(Serialize)]
struct VerdictLine<'a> {
    oracle: &'a str,
    line: usize,
    verdict: &'static str,
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u32>,
    fields: &'a RecordFields,
    expected: Option<&'a BitVector>,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    oracle: &'a str,
    summary: &'a RunSummary,
}

/// Writes verdicts to an output sink in the configured format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a reporter for the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report a verdict for the record found on input line `line`.
    pub fn write_verdict<W: Write>(
        &self,
        out: &mut W,
        oracle: &str,
        line: usize,
        verdict: &Verdict,
    ) -> OracleResult<()> {
        match self.format {
            OutputFormat::Text => {
                write_block(out, &verdict_label(&verdict.outcome), &verdict.fields)
            }
            OutputFormat::Json => {
                let (name, detail) = match verdict.outcome {
                    Outcome::Correct => ("correct", None),
                    Outcome::Error { detail } => ("error", detail),
                };
                write_json_line(
                    out,
                    &VerdictLine {
                        oracle,
                        line,
                        verdict: name,
                        detail,
                        code: None,
                        fields: &verdict.fields,
                        expected: verdict.expected.as_ref(),
                    },
                )
            }
        }
    }

    /// Report a fatal error raised while evaluating a record.
    pub fn write_fatal<W: Write>(
        &self,
        out: &mut W,
        oracle: &str,
        line: usize,
        fields: &RecordFields,
        error: &ErrorCode,
    ) -> OracleResult<()> {
        match self.format {
            OutputFormat::Text => write_block(out, &fatal_message(error), fields),
            OutputFormat::Json => {
                let verdict = if error.is_generation_error() {
                    "generation_error"
                } else {
                    "fatal"
                };
                write_json_line(
                    out,
                    &VerdictLine {
                        oracle,
                        line,
                        verdict,
                        detail: Some(error.name()),
                        code: Some(error.code()),
                        fields,
                        expected: None,
                    },
                )
            }
        }
    }

    /// Report the end-of-run summary. Text output carries no summary.
    pub fn write_summary<W: Write>(
        &self,
        out: &mut W,
        oracle: &str,
        summary: &RunSummary,
    ) -> OracleResult<()> {
        match self.format {
            OutputFormat::Text => Ok(()),
            OutputFormat::Json => write_json_line(out, &SummaryLine { oracle, summary }),
        }
    }
}

fn write_block<W: Write>(out: &mut W, label: &str, fields: &RecordFields) -> OracleResult<()> {
    writeln!(out, "{}", label)?;
    for field in fields.iter() {
        writeln!(out, "{}=\t{}", field.name, field.value)?;
    }
    Ok(())
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> OracleResult<()> {
    serde_json::to_writer(&mut *out, value).map_err(|e| ErrorCode::E300_Io(e.to_string()))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{ArbiterOracle, ArbiterRecord};
    use crate::shifter::{ShifterOracle, ShifterRecord};

    fn shifter_verdict(line: &str) -> Verdict {
        let record = ShifterRecord::parse(line).unwrap();
        ShifterOracle::default().evaluate(&record)
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> OracleResult<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_correct_block() {
        let verdict = shifter_verdict("in=1100 offset=01 out=0110");
        let text = render(|out| Reporter::new(OutputFormat::Text).write_verdict(out, "shifter", 1, &verdict));
        assert_eq!(text, "Correct result\nin=\t1100\noffset=\t01\nout=\t0110\n");
    }

    #[test]
    fn test_text_error_block() {
        let verdict = shifter_verdict("in=1100 offset=01 out=1001");
        let text = render(|out| Reporter::new(OutputFormat::Text).write_verdict(out, "shifter", 1, &verdict));
        assert!(text.starts_with("Error in computation\n"));
    }

    #[test]
    fn test_text_detail_label() {
        let record = ArbiterRecord::parse("r=000 p=010 res=010").unwrap();
        let verdict = ArbiterOracle::new().evaluate(&record).unwrap();
        assert_eq!(
            verdict_label(&verdict.outcome),
            "Error in computation: with 0 requests there should be no grant"
        );
    }

    #[test]
    fn test_text_generation_error() {
        let record = ArbiterRecord::parse("r=101 p=011 res=100").unwrap();
        let err = ArbiterOracle::new().evaluate(&record).unwrap_err();
        let fields = crate::record::Record::fields(&record);
        let text = render(|out| Reporter::new(OutputFormat::Text).write_fatal(out, "arbiter", 4, &fields, &err));
        assert_eq!(
            text,
            "Error in generation: p vector must have exactly a 1\nr=\t101\np=\t011\nres=\t100\n"
        );
    }

    #[test]
    fn test_json_verdict_line() {
        let verdict = shifter_verdict("in=1100 offset=01 out=1001");
        let text = render(|out| Reporter::new(OutputFormat::Json).write_verdict(out, "shifter", 7, &verdict));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["oracle"], "shifter");
        assert_eq!(value["line"], 7);
        assert_eq!(value["verdict"], "error");
        assert_eq!(value["fields"]["offset"], "01");
        assert_eq!(value["expected"], "0110");
        assert!(value.get("code").is_none());
    }

    #[test]
    fn test_json_fatal_line() {
        let record = ArbiterRecord::parse("r=1 p=0 res=1").unwrap();
        let err = ArbiterOracle::new().evaluate(&record).unwrap_err();
        let fields = crate::record::Record::fields(&record);
        let text = render(|out| Reporter::new(OutputFormat::Json).write_fatal(out, "arbiter", 2, &fields, &err));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["verdict"], "generation_error");
        assert_eq!(value["code"], 100);
        assert_eq!(value["detail"], "E100_InvalidPriorityVector");
        assert!(value["expected"].is_null());
    }

    #[test]
    fn test_summary_only_in_json() {
        let summary = RunSummary::new();
        let text = render(|out| Reporter::new(OutputFormat::Text).write_summary(out, "shifter", &summary));
        assert!(text.is_empty());
        let json = render(|out| Reporter::new(OutputFormat::Json).write_summary(out, "shifter", &summary));
        let value: serde_json::Value = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(value["summary"]["passed"], 0);
    }
}
