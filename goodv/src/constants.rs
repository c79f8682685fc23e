// goodv-rs/goodv/src/constants.rs
//! Protocol constants shared across the crate.

/// NFC-V request flags used for every command (high data rate, no option bit).
///
/// The datasheet says the option flag must be set for writes, but real
/// RF430FRL152H tags reject that, so we always send 0x02.
pub const FLAGS: u8 = 0x02;

/// Standard NFC-V Read Single Block command.
pub const CMD_READ_SINGLE: u8 = 0x20;

/// Standard NFC-V Write Single Block command.
pub const CMD_WRITE_SINGLE: u8 = 0x21;

/// Standard NFC-V Get System Information command.
pub const CMD_SYSTEM_INFO: u8 = 0x2B;

/// TI vendor raw read command with a 16-bit block number.
pub const CMD_RAW_READ: u8 = 0xC0;

/// TI vendor raw write command with a 16-bit block number.
pub const CMD_RAW_WRITE: u8 = 0xC1;

/// TAL password-gated calibrate command.
pub const CMD_TAL_CALIBRATE: u8 = 0xA0;

/// TAL status text command.
pub const CMD_TAL_STATUS: u8 = 0xA1;

/// TAL password-gated lock command.
pub const CMD_TAL_LOCK: u8 = 0xA2;

/// TAL password-gated raw read command, addressed by byte address.
pub const CMD_TAL_READ: u8 = 0xA3;

/// TAL password-gated unlock command.
pub const CMD_TAL_UNLOCK: u8 = 0xA4;

/// Manufacturer code carried by every TI vendor command.
pub const MFG_CODE_TI: u8 = 0x07;

/// Backdoor password for the RF430TAL152H. Recoverable by SPI bus sniffing
/// or by reversing the public vendor apps.
pub const TAL_PASSWORD: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Word count parameter of the TAL backdoor read: 4 16-bit words, one block.
pub const TAL_READ_WORDS: u8 = 0x04;

/// Firmware System Control Register of the stock ROM. Lives just below the
/// FRAM block range and is only reachable through [`CONTROL_BLOCK`].
pub const SYSTEM_CONTROL_ADR: u16 = 0xF867;

/// Block number that aliases the Firmware System Control Register.
pub const CONTROL_BLOCK: u8 = 0xFF;

/// Key byte that must precede the register value when writing the
/// Firmware System Control Register through [`CONTROL_BLOCK`].
pub const CONTROL_WRITE_KEY: u8 = 0x95;

/// Addresses at or above this boundary live on page 1 in 4-byte block mode.
pub const PAGE_SPLIT_ADR: u16 = 0xFC34;

/// Start of the SRAM alias range (stock ROM only).
pub const SRAM_BASE_ADR: u16 = 0x1C00;

/// End (exclusive) of the SRAM alias range.
pub const SRAM_END_ADR: u16 = 0x2C00;

/// Block number of the first SRAM alias block.
pub const SRAM_BLOCK_BASE: u16 = 0x600;

/// SRAM slot of the rom_rf13_senderror() function pointer, the hook used
/// for shellcode execution.
pub const EXEC_HOOK_ADR: u16 = 0x1C5C;

/// Original value of the error-handler pointer, restored after execution.
pub const EXEC_HOOK_RETURN: u16 = 0x4FF6;

/// Illegal block number whose read triggers the hooked error handler.
pub const EXEC_TRIGGER_BLOCK: u16 = 0xBABE;

/// JTAG lock word address.
pub const JTAG_LOCK_ADR: u16 = 0xFFD0;

/// RESET vector address, invalidated by the stock-ROM erase.
pub const RESET_VECTOR_ADR: u16 = 0xFFFE;

/// Patch table pointer address, invalidated by the stock-ROM erase.
pub const PATCH_TABLE_ADR: u16 = 0xFFCE;

/// TAL life-cycle stage byte.
pub const TAL_STAGE_ADR: u16 = 0xF864;

/// TAL trend ring-buffer index byte.
pub const TAL_TREND_INDEX_ADR: u16 = 0xF87A;

/// TAL history ring-buffer index byte.
pub const TAL_HISTORY_INDEX_ADR: u16 = 0xF87B;

/// TAL wear time, a little-endian 16-bit minute count.
pub const TAL_WEAR_MINUTES_ADR: u16 = 0xF99D;

/// TAL region code byte.
pub const TAL_REGION_ADR: u16 = 0xF9A3;
