//! Three-field `key=<bits>` line matcher.

use crate::bits::BitVector;
use regex::Regex;
use std::sync::OnceLock;

/// A fixed three-key record grammar such as `in=<bits> offset=<bits> out=<bits>`.
///
/// Fields are separated by one or more spaces or tabs. The pattern may start
/// anywhere on the line; the leftmost match wins. The regex is compiled on
/// first use, so patterns can live in statics.
#[derive(Debug)]
pub struct RecordPattern {
    keys: [&'static str; 3],
    regex: OnceLock<Option<Regex>>,
}

impl RecordPattern {
    /// Create a pattern for the given keys, in order.
    pub const fn new(keys: [&'static str; 3]) -> Self {
        Self {
            keys,
            regex: OnceLock::new(),
        }
    }

    fn regex(&self) -> Option<&Regex> {
        self.regex
            .get_or_init(|| {
                let [a, b, c] = self.keys.map(regex::escape);
                Regex::new(&format!(
                    r"{a}=([01]*)[ \t]+{b}=([01]*)[ \t]+{c}=([01]*)"
                ))
                .ok()
            })
            .as_ref()
    }

    /// Extract the three bit strings from `line`, or `None` if the line does
    /// not contain a record.
    pub fn extract(&self, line: &str) -> Option<[BitVector; 3]> {
        let caps = self.regex()?.captures(line)?;
        let field = |i: usize| BitVector::parse(caps.get(i).map_or("", |m| m.as_str()));
        Some([field(1)?, field(2)?, field(3)?])
    }
}
