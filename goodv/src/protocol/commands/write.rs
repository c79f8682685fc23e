// goodv-rs/goodv/src/protocol/commands/write.rs

use crate::constants::{CMD_RAW_WRITE, CMD_WRITE_SINGLE, FLAGS, MFG_CODE_TI};

/// Encode the standard NFC-V Write Single Block request (command 0x21).
///
/// The caller sizes `data` to the session's block length; the chip infers
/// the block length from the frame length.
pub fn encode_write_single(block: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![FLAGS, CMD_WRITE_SINGLE, block];
    buf.extend_from_slice(data);
    buf
}

/// Encode the TI raw write request (command 0xC1) with a 16-bit block
/// number, little endian.
pub fn encode_raw_write(block: u16, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![FLAGS, CMD_RAW_WRITE, MFG_CODE_TI];
    buf.extend_from_slice(&block.to_le_bytes());
    buf.extend_from_slice(data);
    buf
}
