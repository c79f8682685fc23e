// goodv-rs/goodv/src/lib.rs

//! goodv
//!
//! Pure Rust memory-access engine for RF430 and NFC-V contactless tags.
//!
//! The crate presents a uniform addressable-memory abstraction (`read`,
//! `write`) over chips whose transport only understands small fixed-size
//! blocks in chip-specific, sometimes paged layouts, plus the vendor
//! backdoor commands of the RF430FRL152H and RF430TAL152H: unlock, erase,
//! telemetry and a function-pointer code-execution primitive. Dumps and
//! loads use the MSP430 TI-TXT text format.
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod tag;
pub mod test_support;
pub mod titxt;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
