//! Bit-vector values carried by test-bench records.
//!
//! Vectors are written most-significant bit first, exactly as the test
//! benches print them, so index 0 is the leftmost character.

mod vector;

pub use vector::BitVector;
