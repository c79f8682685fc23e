//! Utilities for goodv: small, reusable helpers used across the crate.
//!
//! Mostly hex formatting for log lines, `describe()` output and tests.

pub mod hex;

// Re-export the common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
