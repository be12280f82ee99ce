//! Self-tests for the base kernel library (alignment, bit ops).

#[cfg(feature = "self_test")]
pub mod test;
