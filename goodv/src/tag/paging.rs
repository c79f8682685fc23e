// goodv-rs/goodv/src/tag/paging.rs

//! Page tracking for 4-byte block mode.
//!
//! In 4-byte mode the block grid only spans half the FRAM, and the half
//! in view is chosen by a bit in the control register. The session caches
//! the chip's page so that same-page traffic costs nothing.

use crate::constants::PAGE_SPLIT_ADR;
use crate::tag::{Connected, Tag};
use crate::Result;

/// Selects the page that holds `adr`, iff a switch is needed.
pub(crate) fn ensure_page_for(tag: &mut Tag<Connected>, adr: u32) -> Result<()> {
    // Pages don't matter in 8-byte mode.
    if tag.session.block_len == 8 {
        return Ok(());
    }

    // Paging only affects the FRAM range, where everything before 0xFC34
    // is in page 0.
    let page = if adr < u32::from(PAGE_SPLIT_ADR) { 0 } else { 1 };
    set_page(tag, page)?;
    log::trace!("Page {} for adr {:04x}.", tag.session.page, adr);
    Ok(())
}

/// Sets the page number, iff it needs to be changed.
pub(crate) fn set_page(tag: &mut Tag<Connected>, new_page: u8) -> Result<()> {
    // No pages in 8-byte mode.
    if tag.session.block_len == 8 {
        return Ok(());
    }
    // Don't fix it if it ain't broke.
    if tag.session.page == new_page {
        return Ok(());
    }
    // Only the stock ROM can switch pages.
    if !tag.variant.supports_paging() {
        return Ok(());
    }

    // Flip the bit and write it back. Confusingly it's the inverse of the
    // page number.
    let mut ctl = tag.read_control_byte()?;
    if new_page == 0 {
        ctl |= 0x02;
    } else {
        ctl &= !0x02;
    }
    tag.write_control_byte(ctl)?;

    // Only trust the cache once the write went through.
    tag.session.page = new_page;
    Ok(())
}
