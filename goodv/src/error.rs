// goodv-rs/goodv/src/error.rs

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no block number for address {adr:#06x}")]
    InvalidAddress { adr: u32 },

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("command {command:#04x} returned status {status:#04x}")]
    TagStatus { command: u8, status: u8 },

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("empty response from tag")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("tag left the field")]
    TagLost,

    #[error("operation timed out")]
    Timeout,

    #[error("not connected to a tag")]
    NotConnected,

    #[error("ti-txt format error: {0}")]
    TitxtFormat(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
