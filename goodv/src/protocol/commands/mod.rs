// goodv-rs/goodv/src/protocol/commands/mod.rs

pub mod info;
pub mod read;
pub mod vendor;
pub mod write;

pub use info::{encode_status_text, encode_system_info};
pub use read::{encode_backdoor_read, encode_raw_read, encode_read_single};
pub use vendor::{encode_password_command, encode_vendor_e};
pub use write::{encode_raw_write, encode_write_single};

/// High-level Command enum. New commands should be added here and their
/// per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Standard Get System Information.
    SystemInfo,
    /// Standard Read Single Block with an 8-bit block number.
    ReadSingle { block: u8 },
    /// Standard Write Single Block. `data` must already be sized to the
    /// session's block length.
    WriteSingle { block: u8, data: Vec<u8> },
    /// TI vendor raw read with a 16-bit block number.
    RawRead { block: u16 },
    /// TI vendor raw write with a 16-bit block number.
    RawWrite { block: u16, data: Vec<u8> },
    /// TAL password-gated unlock.
    Unlock,
    /// TAL password-gated lock.
    Lock,
    /// TAL password-gated calibrate; starts the 1-hour calibration.
    Calibrate,
    /// TAL password-gated raw read, addressed by byte address.
    BackdoorRead { adr: u16 },
    /// TAL status text.
    StatusText,
    /// TAL E-series command (0xE0..=0xE2). Semantics unknown upstream;
    /// preserved as plain status-checked exchanges.
    VendorE { code: u8 },
}

impl Command {
    /// Return the wire command code.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::SystemInfo => crate::constants::CMD_SYSTEM_INFO,
            Self::ReadSingle { .. } => crate::constants::CMD_READ_SINGLE,
            Self::WriteSingle { .. } => crate::constants::CMD_WRITE_SINGLE,
            Self::RawRead { .. } => crate::constants::CMD_RAW_READ,
            Self::RawWrite { .. } => crate::constants::CMD_RAW_WRITE,
            Self::Unlock => crate::constants::CMD_TAL_UNLOCK,
            Self::Lock => crate::constants::CMD_TAL_LOCK,
            Self::Calibrate => crate::constants::CMD_TAL_CALIBRATE,
            Self::BackdoorRead { .. } => crate::constants::CMD_TAL_READ,
            Self::StatusText => crate::constants::CMD_TAL_STATUS,
            Self::VendorE { code } => *code,
        }
    }

    /// Encode the command into the raw request frame.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::SystemInfo => encode_system_info(),
            Self::ReadSingle { block } => encode_read_single(*block),
            Self::WriteSingle { block, data } => encode_write_single(*block, data),
            Self::RawRead { block } => encode_raw_read(*block),
            Self::RawWrite { block, data } => encode_raw_write(*block, data),
            Self::Unlock => encode_password_command(crate::constants::CMD_TAL_UNLOCK),
            Self::Lock => encode_password_command(crate::constants::CMD_TAL_LOCK),
            Self::Calibrate => encode_password_command(crate::constants::CMD_TAL_CALIBRATE),
            Self::BackdoorRead { adr } => encode_backdoor_read(*adr),
            Self::StatusText => encode_status_text(),
            Self::VendorE { code } => encode_vendor_e(*code),
        }
    }
}
