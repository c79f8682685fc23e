// goodv-rs/goodv/src/protocol/commands/vendor.rs

use crate::constants::{FLAGS, MFG_CODE_TI, TAL_PASSWORD};

/// Encode a TAL password-gated request: unlock (0xA4), lock (0xA2) or
/// calibrate (0xA0). All three carry the constant 4-byte credential.
pub fn encode_password_command(cmd: u8) -> Vec<u8> {
    let mut buf = vec![FLAGS, cmd, MFG_CODE_TI];
    buf.extend_from_slice(&TAL_PASSWORD);
    buf
}

/// Encode a TAL E-series request (0xE0..=0xE2). No parameters.
pub fn encode_vendor_e(code: u8) -> Vec<u8> {
    vec![FLAGS, code, MFG_CODE_TI]
}
