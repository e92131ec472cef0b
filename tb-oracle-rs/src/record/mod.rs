//! Record extraction from free-form test-bench output.
//!
//! A record is three `key=<bits>` fields on one line. Anything else on the
//! line, and lines without a record at all, are noise.

mod pattern;

pub use pattern::RecordPattern;

use crate::bits::BitVector;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A named field of a parsed record, echoed back in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Key as it appears in the input grammar (e.g. "offset").
    pub name: &'static str,
    /// Raw field value.
    pub value: BitVector,
}

impl Field {
    /// Create a new field.
    pub fn new(name: &'static str, value: BitVector) -> Self {
        Field { name, value }
    }
}

/// The three fields of a record in grammar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields(pub [Field; 3]);

impl RecordFields {
    /// Iterate over fields in grammar order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.iter()
    }
}

impl Serialize for RecordFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for field in &self.0 {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.end()
    }
}

/// A typed record produced by an oracle's parser.
pub trait Record {
    /// Fields in grammar order, for reporting.
    fn fields(&self) -> RecordFields;
}
