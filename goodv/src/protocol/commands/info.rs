// goodv-rs/goodv/src/protocol/commands/info.rs

use crate::constants::{CMD_SYSTEM_INFO, CMD_TAL_STATUS, FLAGS, MFG_CODE_TI};

/// Encode the standard Get System Information request (command 0x2B).
///
/// Example response:
/// ```text
/// OK ?? Serial Number    ????
/// 00 04 477a010000a207e0 f207
/// ```
pub fn encode_system_info() -> Vec<u8> {
    vec![FLAGS, CMD_SYSTEM_INFO]
}

/// Encode the TAL status text request (command 0xA1). The reply is an
/// opaque state blob rendered as hex.
pub fn encode_status_text() -> Vec<u8> {
    vec![FLAGS, CMD_TAL_STATUS, MFG_CODE_TI]
}
