// goodv-rs/goodv/src/tag/mod.rs

//! The session façade: one [`Tag`] per tap.
//!
//! A `Tag` owns the transport session and the mutable geometry for one tag
//! interaction. The type-state parameter keeps privileged operations off
//! disconnected handles at compile time; [`Tag::connect`] performs the
//! variant-specific probing (stock-ROM control register, NXP block count)
//! and returns the connected handle.

use std::marker::PhantomData;

use crate::constants::{CONTROL_BLOCK, CONTROL_WRITE_KEY};
use crate::protocol::{response, Command};
use crate::transport::TagTransport;
use crate::types::{SessionState, TagId, Variant, VariantKind};
use crate::{Error, Result};

pub mod info;
pub mod memory;
pub mod paging;
pub mod vendor;

pub use vendor::{Region, StageOfLife, Telemetry};

/// Type-state markers
pub struct Disconnected;
pub struct Connected;

/// Handle for one tag session.
pub struct Tag<State = Disconnected> {
    transport: Box<dyn TagTransport>,
    id: TagId,
    variant: Variant,
    session: SessionState,
    _state: PhantomData<State>,
}

impl Tag<Disconnected> {
    /// Wrap a discovered tag. The variant is classified immediately from
    /// the identifier; geometry may still be refined by [`Tag::connect`].
    pub fn new(transport: Box<dyn TagTransport>, id: TagId) -> Self {
        let variant = Variant::resolve(&id);
        let session = SessionState::new(&variant);
        Self {
            transport,
            id,
            variant,
            session,
            _state: PhantomData,
        }
    }

    /// Open the transport session and probe the chip.
    ///
    /// Stock-ROM tags report their live block length and page through the
    /// control register; NXP tags report their block count in the system
    /// info. Both refinements happen here, once per session.
    pub fn connect(self) -> Result<Tag<Connected>> {
        let Tag {
            mut transport,
            id,
            variant,
            session,
            ..
        } = self;
        transport.connect()?;

        let mut tag = Tag {
            transport,
            id,
            variant,
            session,
            _state: PhantomData,
        };

        match tag.variant.kind {
            VariantKind::Frl => tag.refresh_geometry()?,
            VariantKind::NxpIcodeSli => {
                let raw = tag.raw_info()?;
                let count = raw.get(12).copied().ok_or(Error::InvalidLength {
                    expected: 13,
                    actual: raw.len(),
                })?;
                tag.variant.block_count = u16::from(count);
            }
            _ => {}
        }

        Ok(tag)
    }

    /// Inspect the classified variant even before connecting.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }
}

impl Tag<Connected> {
    /// Reads data from a native address.
    pub fn read(&mut self, adr: u16, len: usize) -> Result<Vec<u8>> {
        memory::read(self, adr, len)
    }

    /// Writes data to a native address.
    pub fn write(&mut self, adr: u16, data: &[u8]) -> Result<()> {
        memory::write(self, adr, data)
    }

    /// Erases the tag, where the variant has a known erase sequence.
    pub fn erase(&mut self) -> Result<()> {
        vendor::erase(self)
    }

    /// Executes code at an address through the error-handler hook.
    /// Stock ROM only.
    pub fn exec(&mut self, adr: u16) -> Result<Vec<u8>> {
        vendor::exec(self, adr)
    }

    /// Dumps the tag as a TI-TXT document.
    pub fn dump_titxt(&mut self) -> Result<String> {
        info::dump_titxt(self)
    }

    /// Applies a TI-TXT document to the tag. The document is fully parsed
    /// before anything is written, so a malformed document has no side
    /// effects.
    pub fn load_titxt(&mut self, txt: &str) -> Result<()> {
        let ops = crate::titxt::parse(txt)?;
        for op in ops {
            match op {
                crate::titxt::Op::Write { adr, data } => memory::write(self, adr, &data)?,
                crate::titxt::Op::Exec { adr } => {
                    vendor::exec(self, adr)?;
                }
            }
        }
        Ok(())
    }

    /// Renders the tag's identity and geometry as a user-readable string.
    pub fn describe(&mut self) -> Result<String> {
        info::describe(self)
    }

    /// Reads the raw system info response, status byte included.
    pub fn raw_info(&mut self) -> Result<Vec<u8>> {
        self.execute(Command::SystemInfo)
    }

    /// Reads the serial number. The wire order is backward, so the bytes
    /// are reversed here.
    pub fn serial_number(&mut self) -> Result<Vec<u8>> {
        let raw = self.raw_info()?;
        if raw.len() < 10 {
            return Err(Error::InvalidLength {
                expected: 10,
                actual: raw.len(),
            });
        }
        let mut serial = raw[2..10].to_vec();
        serial.reverse();
        Ok(serial)
    }

    /// Unlocks a TAL tag with the password-gated 0xA4 command.
    pub fn unlock(&mut self) -> Result<()> {
        vendor::tal::unlock(self)
    }

    /// Locks a TAL tag with the password-gated 0xA2 command.
    pub fn lock(&mut self) -> Result<()> {
        vendor::tal::lock(self)
    }

    /// Starts the 1-hour TAL sensor calibration with the password-gated
    /// 0xA0 command.
    pub fn calibrate(&mut self) -> Result<()> {
        vendor::tal::calibrate(self)
    }

    /// Reads the opaque TAL status blob as hex.
    pub fn status_text(&mut self) -> Result<String> {
        vendor::tal::status_text(self)
    }

    /// Issues one of the TAL E-series commands (0xE0..=0xE2). What these
    /// do is unknown; they are passed through as-is.
    pub fn vendor_e(&mut self, code: u8) -> Result<()> {
        vendor::tal::vendor_e(self, code)
    }

    /// Reads the TAL life-cycle stage byte.
    pub fn stage_of_life(&mut self) -> Result<StageOfLife> {
        vendor::tal::stage_of_life(self)
    }

    /// Reads the decoded TAL telemetry block.
    pub fn telemetry(&mut self) -> Result<Telemetry> {
        vendor::tal::telemetry(self)
    }

    /// Returns true if JTAG is locked.
    pub fn is_jtag_locked(&mut self) -> Result<bool> {
        vendor::frl::is_jtag_locked(self)
    }

    /// Locks or unlocks JTAG.
    pub fn set_jtag_locked(&mut self, locked: bool) -> Result<()> {
        vendor::frl::set_jtag_locked(self, locked)
    }

    /// Closes the session. Paged stock-ROM tags are put back on page 0
    /// first so the next reader finds them in a predictable state.
    pub fn close(mut self) -> Result<()> {
        if self.session.block_len == 4 && self.variant.kind == VariantKind::Frl {
            paging::set_page(&mut self, 0)?;
        }
        self.transport.close()
    }

    /// Whether the transport session is still open.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn id(&self) -> &TagId {
        &self.id
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// The session's live block length.
    pub fn block_len(&self) -> usize {
        self.session.block_len
    }

    /// The session's cached page number. Only meaningful in 4-byte mode.
    pub fn page(&self) -> u8 {
        self.session.page
    }

    /* Lowest level: one transport exchange, or one command apiece. */

    pub(crate) fn execute(&mut self, cmd: Command) -> Result<Vec<u8>> {
        let frame = cmd.encode();
        log::trace!(
            "execute(): {:#04x} -> {}",
            cmd.command_code(),
            crate::utils::bytes_to_hex(&frame)
        );
        self.transport.transceive(&frame)
    }

    /// Execute a command and return the data after a zero status byte.
    pub(crate) fn execute_data(&mut self, cmd: Command) -> Result<Vec<u8>> {
        let code = cmd.command_code();
        let resp = self.execute(cmd)?;
        response::strip_status(code, &resp).map(|d| d.to_vec())
    }

    /// Execute a command that answers with a bare status byte.
    pub(crate) fn execute_ok(&mut self, cmd: Command) -> Result<()> {
        let code = cmd.command_code();
        let resp = self.execute(cmd)?;
        response::status_ok(code, &resp)
    }

    /// Reads a block with an 8-bit address. Standard NFC-V command.
    pub(crate) fn read_block8(&mut self, block: u8) -> Result<Vec<u8>> {
        log::debug!("read_block8(): NFC Read command for block {:#04x}", block);
        self.execute_data(Command::ReadSingle { block })
    }

    /// Writes a block with an 8-bit address. Standard NFC-V command.
    pub(crate) fn write_block8(&mut self, block: u8, data: &[u8]) -> Result<()> {
        self.execute_ok(Command::WriteSingle {
            block,
            data: data.to_vec(),
        })
    }

    /// Reads a block with a 16-bit address. Falls back to the standard
    /// 8-bit command when the block number fits, for compatibility with
    /// custom tags.
    pub(crate) fn read_block16(&mut self, block: u16) -> Result<Vec<u8>> {
        if block < 0x100 {
            return self.read_block8(block as u8);
        }
        log::trace!("read_block16(): Fetching block {:#06x}.", block);
        self.execute_data(Command::RawRead { block })
    }

    /// Writes a block with a 16-bit address, falling back like
    /// [`Tag::read_block16`].
    pub(crate) fn write_block16(&mut self, block: u16, data: &[u8]) -> Result<()> {
        if block < 0x100 {
            return self.write_block8(block as u8, data);
        }
        self.execute_ok(Command::RawWrite {
            block,
            data: data.to_vec(),
        })
    }

    /// Reads one block through the TAL backdoor, addressed by byte
    /// address rather than block number.
    pub(crate) fn read_backdoor(&mut self, adr: u16) -> Result<Vec<u8>> {
        self.execute_data(Command::BackdoorRead { adr })
    }

    /// Reads the Firmware System Control Register through its block alias.
    pub(crate) fn read_control_byte(&mut self) -> Result<u8> {
        let data = self.read_block8(CONTROL_BLOCK)?;
        data.first().copied().ok_or(Error::ShortRead {
            expected: 1,
            actual: 0,
        })
    }

    /// Writes the Firmware System Control Register, then reads it back:
    /// the write may have changed the block length or page for every
    /// subsequent call.
    pub(crate) fn write_control_byte(&mut self, value: u8) -> Result<()> {
        let mut data = vec![0u8; self.session.block_len];
        data[0] = CONTROL_WRITE_KEY;
        data[1] = value;
        self.write_block8(CONTROL_BLOCK, &data)?;
        self.refresh_geometry()
    }

    /// Re-derives the live block length and page from the control
    /// register.
    pub(crate) fn refresh_geometry(&mut self) -> Result<()> {
        let ctl = self.read_control_byte()?;

        // Stock ROM tags can have either 8 byte or 4 byte blocks.
        if ctl & 1 == 1 {
            self.session.block_len = 8;
            self.session.page = 0;
        } else {
            self.session.block_len = 4;
            // Page bit is inverted.
            self.session.page = if (ctl >> 1) & 1 == 1 { 0 } else { 1 };
        }
        Ok(())
    }
}
