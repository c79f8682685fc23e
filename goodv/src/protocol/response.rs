// goodv-rs/goodv/src/protocol/response.rs

use crate::{Error, Result};

/// Check the response status byte and return the data that follows it.
///
/// Every NFC-V response opens with a status byte: zero means success,
/// anything else is a chip-reported error. `command` is only used to make
/// the resulting error legible.
pub fn strip_status(command: u8, resp: &[u8]) -> Result<&[u8]> {
    let status = *resp.first().ok_or(Error::EmptyResponse)?;
    if status != 0 {
        return Err(Error::TagStatus { command, status });
    }
    Ok(&resp[1..])
}

/// Check the status byte of a response that carries no payload.
pub fn status_ok(command: u8, resp: &[u8]) -> Result<()> {
    strip_status(command, resp).map(|_| ())
}
