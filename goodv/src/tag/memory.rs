// goodv-rs/goodv/src/tag/memory.rs

//! Byte-range reads and writes over the block grid.
//!
//! The transport only moves whole blocks, so arbitrary ranges are walked
//! with an explicit cursor loop: the enclosing aligned block is fetched
//! and sliced for unaligned boundaries, and partial blocks are merged
//! onto the current contents before writing. Stack depth stays constant
//! no matter how large the range is.

use crate::tag::{paging, Connected, Tag};
use crate::types::VariantKind;
use crate::{Error, Result};

/// Reads `len` bytes starting at `adr`.
///
/// Fails without returning partial data: a chunk that comes back short
/// aborts the whole operation.
pub(crate) fn read(tag: &mut Tag<Connected>, adr: u16, len: usize) -> Result<Vec<u8>> {
    log::debug!("read(): address=@{:04x} len={}", adr, len);

    let mut out = Vec::with_capacity(len);
    let mut cursor = u32::from(adr);

    while out.len() < len {
        // The Firmware System Control Register sits outside the block
        // grid and is read through its block alias.
        if tag.variant.special_register.map(u32::from) == Some(cursor) {
            out.push(tag.read_control_byte()?);
            cursor += 1;
            continue;
        }

        paging::ensure_page_for(tag, cursor)?;

        let bl = tag.session.block_len;
        let misalign = (cursor as usize) % bl;
        let chunk_start = cursor - misalign as u32;

        let chunk = read_block_at(tag, chunk_start)?;
        if chunk.len() < bl {
            log::error!(
                "read(): failed to read block address=@{:04x} len={}",
                chunk_start,
                bl
            );
            return Err(Error::ShortRead {
                expected: bl,
                actual: chunk.len(),
            });
        }

        let take = usize::min(bl - misalign, len - out.len());
        out.extend_from_slice(&chunk[misalign..misalign + take]);
        cursor += take as u32;
    }

    Ok(out)
}

/// Writes `data` starting at `adr`.
///
/// Aborts on the first failing chunk; chunks already written stay
/// written. There is no rollback.
pub(crate) fn write(tag: &mut Tag<Connected>, adr: u16, data: &[u8]) -> Result<()> {
    log::trace!("Writing {} bytes to {:#06x}.", data.len(), adr);

    let mut cursor = u32::from(adr);
    let mut offset = 0usize;

    while offset < data.len() {
        // Writing the control register re-derives the block length and
        // page for everything that follows.
        if tag.variant.special_register.map(u32::from) == Some(cursor) {
            tag.write_control_byte(data[offset])?;
            cursor += 1;
            offset += 1;
            continue;
        }

        paging::ensure_page_for(tag, cursor)?;

        let bl = tag.session.block_len;
        let misalign = (cursor as usize) % bl;
        let chunk_start = cursor - misalign as u32;
        let take = usize::min(bl - misalign, data.len() - offset);

        if misalign == 0 && take == bl {
            write_block_at(tag, chunk_start, &data[offset..offset + bl])?;
        } else {
            // Partial block: merge onto the current contents rather than
            // zero-filling the neighbors.
            let mut block = read_block_at(tag, chunk_start)?;
            if block.len() < bl {
                return Err(Error::ShortRead {
                    expected: bl,
                    actual: block.len(),
                });
            }
            block.truncate(bl);
            block[misalign..misalign + take].copy_from_slice(&data[offset..offset + take]);
            write_block_at(tag, chunk_start, &block)?;
        }

        cursor += take as u32;
        offset += take;
    }

    Ok(())
}

/// One block read at an aligned address, dispatched per variant: TAL tags
/// use the password-gated backdoor (addressed by byte address), everything
/// else resolves a block number first.
fn read_block_at(tag: &mut Tag<Connected>, adr: u32) -> Result<Vec<u8>> {
    if tag.variant.kind == VariantKind::Tal {
        if adr >= 0x10000 {
            log::error!("No block number for address: {:#06x}", adr);
            return Err(Error::InvalidAddress { adr });
        }
        return tag.read_backdoor(adr as u16);
    }

    let block = tag.variant.addr_to_block(adr, tag.session.block_len)?;
    tag.read_block16(block)
}

fn write_block_at(tag: &mut Tag<Connected>, adr: u32, data: &[u8]) -> Result<()> {
    let block = tag.variant.addr_to_block(adr, tag.session.block_len)?;
    if let Err(e) = tag.write_block16(block, data) {
        log::error!(
            "Error writing {} bytes to block {:#06x}: {}",
            data.len(),
            block,
            crate::utils::bytes_to_hex(data)
        );
        return Err(e);
    }
    Ok(())
}
