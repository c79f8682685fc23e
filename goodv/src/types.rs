// goodv-rs/goodv/src/types.rs

use crate::constants::{SRAM_BASE_ADR, SRAM_BLOCK_BASE, SRAM_END_ADR, SYSTEM_CONTROL_ADR};
use crate::Error;
use std::convert::TryFrom;

/// Tag identifier - Newtype Pattern (8 bytes).
///
/// NFC-V identifiers carry the vendor byte at index 6 and the chip
/// sub-type byte at index 5; the engine classifies tags from those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagId([u8; 8]);

impl TagId {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Vendor byte of the identifier.
    pub fn vendor_byte(&self) -> u8 {
        self.0[6]
    }

    /// Chip sub-type byte of the identifier.
    pub fn subtype_byte(&self) -> u8 {
        self.0[5]
    }
}

impl TryFrom<&[u8]> for TagId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// The chip/firmware dialect a tag speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantKind {
    /// TI Tag-IT label chips.
    #[display(fmt = "TAGIT")]
    TagIt,
    /// RF430FRL152H with the stock mask ROM.
    #[display(fmt = "FRL")]
    Frl,
    /// RF430TAL152H with the glucose-monitor firmware.
    #[display(fmt = "GCM")]
    Tal,
    /// NXP ICODE SLI label chips.
    #[display(fmt = "NXPICODESLI")]
    NxpIcodeSli,
    /// Anything we don't recognize. Geometry is a guess.
    #[display(fmt = "UNKNOWN")]
    Generic,
}

/// Immutable per-variant descriptor selected when a tag is first seen.
///
/// `block_count` may be refined after connecting (NXP reports it in the
/// system info), and `block_len` here is only the initial value; the live
/// value is session state because the stock ROM can switch between 8- and
/// 4-byte blocks at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub kind: VariantKind,
    pub block_len: usize,
    pub base_adr: u16,
    pub block_count: u16,
    pub special_register: Option<u16>,
}

impl Variant {
    /// Classify a tag identifier into a variant.
    ///
    /// Dispatches on the vendor byte then the sub-type byte. Unrecognized
    /// combinations get the generic fallback with a guessed geometry so the
    /// engine stays usable, just without variant-specific privileges.
    pub fn resolve(id: &TagId) -> Self {
        match (id.vendor_byte(), id.subtype_byte()) {
            (0x07, 0x00) => {
                log::debug!("TAG-IT");
                Self {
                    kind: VariantKind::TagIt,
                    block_len: 4,
                    base_adr: 0,
                    block_count: 0x40,
                    special_register: None,
                }
            }
            (0x07, 0xA2) => {
                log::debug!("RF430FRL");
                Self {
                    kind: VariantKind::Frl,
                    block_len: 8,
                    base_adr: 0xF868,
                    block_count: 0xF3,
                    special_register: Some(SYSTEM_CONTROL_ADR),
                }
            }
            (0x07, 0xA0) => {
                log::debug!("RF430TAL");
                Self {
                    kind: VariantKind::Tal,
                    block_len: 8,
                    base_adr: 0xF860,
                    block_count: 0xF4,
                    special_register: None,
                }
            }
            // NXP Stand Label IC. The block count is read from the chip at
            // connect time.
            (0x04, 0x01) => Self {
                kind: VariantKind::NxpIcodeSli,
                block_len: 4,
                base_adr: 0,
                block_count: 0x10,
                special_register: None,
            },
            _ => Self {
                kind: VariantKind::Generic,
                block_len: 4,
                base_adr: 0,
                block_count: 0x10,
                special_register: None,
            },
        }
    }

    /// Only the stock ROM ever switches pages explicitly.
    pub fn supports_paging(&self) -> bool {
        self.kind == VariantKind::Frl
    }

    /// Human-readable variant name; the generic fallback embeds the raw
    /// identifier bytes it failed to classify.
    pub fn display_name(&self, id: &TagId) -> String {
        match self.kind {
            VariantKind::Generic => {
                format!("Unknown{:02x}{:02x}", id.vendor_byte(), id.subtype_byte())
            }
            kind => kind.to_string(),
        }
    }

    /// Converts an address to a 16-bit block number.
    ///
    /// The SRAM alias range [0x1C00,0x2C00) maps onto blocks from 0x600 and
    /// is only reachable on the stock ROM. The main range [base,0x10000)
    /// wraps into the next page once the block count is exceeded, so on an
    /// FRL tag in 4-byte mode 0xFC34 is fetched from page 1, block 0.
    ///
    /// `block_len` is the session's live block length, not the initial one.
    pub fn addr_to_block(&self, adr: u32, block_len: usize) -> crate::Result<u16> {
        let bl = block_len as u32;
        if adr >= u32::from(SRAM_BASE_ADR) && adr < u32::from(SRAM_END_ADR) {
            if self.kind != VariantKind::Frl {
                log::error!("No block number for address: {:#06x}", adr);
                return Err(Error::InvalidAddress { adr });
            }
            return Ok(((adr - u32::from(SRAM_BASE_ADR)) / bl) as u16 + SRAM_BLOCK_BASE);
        }
        if adr >= u32::from(self.base_adr) && adr < 0x10000 {
            let mut block = (adr - u32::from(self.base_adr)) / bl;
            if block >= u32::from(self.block_count) {
                block -= u32::from(self.block_count);
            }
            return Ok(block as u16);
        }
        log::error!("No block number for address: {:#06x}", adr);
        Err(Error::InvalidAddress { adr })
    }
}

/// Mutable geometry of one tag session.
///
/// `page` only has meaning when `block_len` is 4; it must track the chip's
/// actual paging register or addressing silently returns wrong data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub block_len: usize,
    pub page: u8,
}

impl SessionState {
    pub fn new(variant: &Variant) -> Self {
        Self {
            block_len: variant.block_len,
            page: 0,
        }
    }
}
