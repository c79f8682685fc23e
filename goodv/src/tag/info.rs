// goodv-rs/goodv/src/tag/info.rs

//! Human-readable tag summaries and TI-TXT dumps.

use std::fmt::Write as _;

use crate::constants::{RESET_VECTOR_ADR, SRAM_BASE_ADR, SYSTEM_CONTROL_ADR};
use crate::tag::{memory, vendor, Connected, Tag};
use crate::types::VariantKind;
use crate::utils::bytes_to_hex;
use crate::{titxt, Error, Result};

/// Renders one region as TI-TXT, or nothing at all when the chip reports
/// it unreadable. Partial data would be misleading, so a short region
/// renders empty; transport faults still abort the dump.
fn dump_region(tag: &mut Tag<Connected>, adr: u16, len: usize) -> Result<String> {
    log::debug!("dump_region: reading address=@{:04x} len={}", adr, len);

    match memory::read(tag, adr, len) {
        Ok(data) if data.len() == len => Ok(titxt::render(adr, &data)),
        Ok(data) => {
            log::error!("Requested {} bytes but got {}.", len, data.len());
            Ok(String::new())
        }
        Err(
            Error::TagStatus { .. }
            | Error::ShortRead { .. }
            | Error::InvalidAddress { .. }
            | Error::EmptyResponse,
        ) => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Dumps the tag as a TI-TXT document, reading what we can, if we can.
pub(crate) fn dump_titxt(tag: &mut Tag<Connected>) -> Result<String> {
    let base_adr = tag.variant.base_adr;
    let fram_len = tag.session.block_len * usize::from(tag.variant.block_count);

    match tag.variant.kind {
        VariantKind::Frl => {
            let ctl = dump_region(tag, SYSTEM_CONTROL_ADR, 1)?;
            let fram = dump_region(tag, base_adr, fram_len)?;
            let sram = dump_region(tag, SRAM_BASE_ADR, 0x1000)?;
            Ok(format!("{}\n{}\n{}\nq", ctl, fram, sram))
        }
        VariantKind::Tal => {
            // Serial number and calibration are here.
            let config = dump_region(tag, 0x1A00, 64)?;
            let fram = dump_region(tag, 0xF800, 2048)?;
            let rom = dump_region(tag, 0x4400, 0x2000)?;
            let sram = dump_region(tag, SRAM_BASE_ADR, 0x1000)?;
            Ok(format!("{}\n{}\n{}\n{}\nq", config, fram, rom, sram))
        }
        _ => {
            let fram = dump_region(tag, base_adr, fram_len)?;
            Ok(format!("{}\nq", fram))
        }
    }
}

/// Gets the tag's info as a user-readable string.
pub(crate) fn describe(tag: &mut Tag<Connected>) -> Result<String> {
    let raw = tag.raw_info()?;
    let serial = tag.serial_number()?;

    let mut info = String::new();
    let _ = writeln!(info, "INFO:     {}\n", bytes_to_hex(&raw));
    let _ = writeln!(info, "SERIAL:   {}", bytes_to_hex(&serial));
    let _ = writeln!(info, "VARIANT:  {}", tag.variant.display_name(&tag.id));
    let _ = writeln!(info, "BLOCKLEN: {}", tag.session.block_len);
    let _ = writeln!(info, "PAGE:     {}", tag.session.page);

    if matches!(tag.variant.kind, VariantKind::Frl | VariantKind::Tal) {
        let locked = vendor::frl::is_jtag_locked(tag)?;
        let _ = writeln!(
            info,
            "JTAGLOCK: {}",
            if locked { "LOCKED" } else { "UNLOCKED" }
        );
        let reset = memory::read(tag, RESET_VECTOR_ADR, 2)?;
        let _ = writeln!(info, "RESET VEC:{}", bytes_to_hex(&reset));
    }

    if tag.variant.kind == VariantKind::Tal {
        let t = vendor::tal::telemetry(tag)?;
        let _ = writeln!(info, "STAGE:    {}", t.stage);
        let _ = writeln!(info, "STATE:    {}", vendor::tal::status_text(tag)?);
        let _ = writeln!(info, "WEAR:     {} minutes", t.wear_minutes);
        let _ = writeln!(info, "REGION:   {}", t.region);
        let _ = writeln!(info, "TREND:    {:02x}", t.trend_index);
        let _ = writeln!(info, "HISTORY:  {:02x}", t.history_index);
    }

    if tag.variant.kind == VariantKind::NxpIcodeSli {
        let _ = writeln!(info, "BLOCKS:   {}", tag.variant.block_count);
    }

    Ok(info)
}
