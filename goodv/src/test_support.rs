//! Test support helpers intended for use by unit and integration tests.
//!
//! The centerpiece is [`SimTag`], a small software RF430 that answers the
//! same command frames a physical tag would: block reads and writes with
//! live block-length and page emulation, the control-register alias, and
//! the TAL password commands. Tests drive the real engine against it and
//! then assert on the request log or the memory image.
#![allow(dead_code)]

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::constants::TAL_PASSWORD;
use crate::transport::TagTransport;
use crate::types::TagId;
use crate::{Error, Result};

/// Which chip the simulator pretends to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimKind {
    Frl,
    Tal,
}

/// In-memory RF430 behind the [`TagTransport`] contract.
#[derive(Debug)]
pub struct SimTag {
    pub kind: SimKind,
    /// Full 16-bit address space image.
    pub mem: Vec<u8>,
    /// Firmware System Control Register (stock ROM only).
    pub control: u8,
    /// Canned Get System Information response.
    pub system_info: Vec<u8>,
    pub connected: bool,
    /// Every request frame, in order.
    pub sent: Vec<Vec<u8>>,
    /// Per-write failure schedule: each write command pops the front
    /// entry and fails when it is true. An empty schedule succeeds.
    pub fail_write_schedule: Vec<bool>,
    /// Reply for the illegal-block shellcode trigger; `None` simulates
    /// the reply timeout of shellcode without continuation.
    pub exec_reply: Option<Vec<u8>>,
    /// TAL lock state, toggled by the A4/A2 commands.
    pub locked: bool,
    base_adr: u16,
    block_count: u16,
}

impl SimTag {
    /// Stock ROM in 8-byte block mode.
    pub fn frl() -> Self {
        Self {
            kind: SimKind::Frl,
            mem: vec![0; 0x10000],
            control: 0x7F,
            system_info: vec![
                0x00, 0x04, 0x47, 0x7A, 0x01, 0x00, 0x00, 0xA2, 0x07, 0xE0, 0xF2, 0x07,
            ],
            connected: false,
            sent: Vec::new(),
            fail_write_schedule: Vec::new(),
            exec_reply: Some(vec![0xCA, 0xFE]),
            locked: false,
            base_adr: 0xF868,
            block_count: 0xF3,
        }
    }

    /// Stock ROM in 4-byte block mode, page 0.
    pub fn frl_paged() -> Self {
        let mut sim = Self::frl();
        sim.control = 0x02;
        sim
    }

    /// Glucose-monitor firmware; fixed 8-byte blocks, password gated.
    pub fn tal() -> Self {
        Self {
            kind: SimKind::Tal,
            mem: vec![0; 0x10000],
            control: 0,
            system_info: vec![
                0x00, 0x04, 0x47, 0x7A, 0x01, 0x00, 0x00, 0xA0, 0x07, 0xE0, 0xF2, 0x07,
            ],
            connected: false,
            sent: Vec::new(),
            fail_write_schedule: Vec::new(),
            exec_reply: None,
            locked: true,
            base_adr: 0xF860,
            block_count: 0xF4,
        }
    }

    /// A tag identifier matching the simulated chip.
    pub fn tag_id(&self) -> TagId {
        let subtype = match self.kind {
            SimKind::Frl => 0xA2,
            SimKind::Tal => 0xA0,
        };
        TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, subtype, 0x07, 0xE0])
    }

    /// Fill the memory image with a deterministic pattern so slices can
    /// be compared by address.
    pub fn fill_pattern(&mut self) {
        for (i, b) in self.mem.iter_mut().enumerate() {
            *b = (i & 0xFF) as u8 ^ (i >> 8) as u8;
        }
    }

    /// Count sent frames carrying the given command code.
    pub fn count_command(&self, cmd: u8) -> usize {
        self.sent.iter().filter(|f| f.get(1) == Some(&cmd)).count()
    }

    /// Count writes to the control-register block alias.
    pub fn control_writes(&self) -> usize {
        self.sent
            .iter()
            .filter(|f| f.get(1) == Some(&0x21) && f.get(2) == Some(&0xFF))
            .count()
    }

    fn block_len(&self) -> usize {
        match self.kind {
            SimKind::Tal => 8,
            SimKind::Frl => {
                if self.control & 1 == 1 {
                    8
                } else {
                    4
                }
            }
        }
    }

    fn page(&self) -> u16 {
        if self.block_len() == 8 {
            return 0;
        }
        // Page bit is inverted.
        if (self.control >> 1) & 1 == 1 { 0 } else { 1 }
    }

    fn block_to_adr(&self, block: u16) -> Option<usize> {
        let bl = self.block_len();
        if block >= 0x600 {
            let adr = 0x1C00 + usize::from(block - 0x600) * bl;
            if self.kind == SimKind::Frl && adr + bl <= 0x2C00 {
                return Some(adr);
            }
            return None;
        }
        let mut b = usize::from(block);
        if bl == 4 {
            b += usize::from(self.page()) * usize::from(self.block_count);
        }
        let adr = usize::from(self.base_adr) + b * bl;
        if adr + bl <= 0x10000 { Some(adr) } else { None }
    }

    fn read_block(&self, block: u16) -> Vec<u8> {
        let bl = self.block_len();
        if block == 0xFF && self.kind == SimKind::Frl {
            let mut resp = vec![0x00, self.control];
            resp.resize(1 + bl, 0);
            return resp;
        }
        match self.block_to_adr(block) {
            Some(adr) => {
                let mut resp = vec![0x00];
                resp.extend_from_slice(&self.mem[adr..adr + bl]);
                resp
            }
            None => vec![0x01],
        }
    }

    /// Fail the next `n` write commands.
    pub fn fail_next_writes(&mut self, n: usize) {
        self.fail_write_schedule = vec![true; n];
    }

    fn write_block(&mut self, block: u16, data: &[u8]) -> Vec<u8> {
        if !self.fail_write_schedule.is_empty() && self.fail_write_schedule.remove(0) {
            return vec![0x01];
        }
        let bl = self.block_len();
        if block == 0xFF && self.kind == SimKind::Frl {
            if data.first() == Some(&0x95) && data.len() >= 2 {
                self.control = data[1];
                return vec![0x00];
            }
            return vec![0x01];
        }
        match self.block_to_adr(block) {
            Some(adr) => {
                let n = usize::min(bl, data.len());
                self.mem[adr..adr + n].copy_from_slice(&data[..n]);
                vec![0x00]
            }
            None => vec![0x01],
        }
    }

    fn backdoor_read(&self, rest: &[u8]) -> Vec<u8> {
        if self.kind != SimKind::Tal {
            return vec![0x01];
        }
        // password(4) + address(2) + word count(1)
        if rest.len() != 7 || rest[..4] != TAL_PASSWORD {
            return vec![0x01];
        }
        let adr = usize::from(u16::from_le_bytes([rest[4], rest[5]]));
        if adr + 8 > 0x10000 {
            return vec![0x01];
        }
        let mut resp = vec![0x00];
        resp.extend_from_slice(&self.mem[adr..adr + 8]);
        resp
    }

    fn password_command(&mut self, pw: &[u8], lock_state: Option<bool>) -> Vec<u8> {
        if self.kind != SimKind::Tal || pw != TAL_PASSWORD {
            return vec![0x01];
        }
        if let Some(locked) = lock_state {
            self.locked = locked;
        }
        vec![0x00]
    }
}

impl TagTransport for SimTag {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn transceive(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.sent.push(request.to_vec());
        match request {
            [0x02, 0x20, block] => Ok(self.read_block(u16::from(*block))),
            [0x02, 0x21, block, data @ ..] => {
                let block = u16::from(*block);
                Ok(self.write_block(block, data))
            }
            [0x02, 0x2B] => Ok(self.system_info.clone()),
            [0x02, 0xC0, 0x07, lo, hi] => {
                let block = u16::from_le_bytes([*lo, *hi]);
                if block == 0xBABE {
                    return match &self.exec_reply {
                        Some(reply) => Ok(reply.clone()),
                        None => Err(Error::Timeout),
                    };
                }
                Ok(self.read_block(block))
            }
            [0x02, 0xC1, 0x07, lo, hi, data @ ..] => {
                let block = u16::from_le_bytes([*lo, *hi]);
                Ok(self.write_block(block, data))
            }
            [0x02, 0xA4, 0x07, pw @ ..] => Ok(self.password_command(pw, Some(false))),
            [0x02, 0xA2, 0x07, pw @ ..] => Ok(self.password_command(pw, Some(true))),
            [0x02, 0xA0, 0x07, pw @ ..] => Ok(self.password_command(pw, None)),
            [0x02, 0xA3, 0x07, rest @ ..] => Ok(self.backdoor_read(rest)),
            [0x02, 0xA1, 0x07] => Ok(vec![0x00, 0xA5, 0x00, 0x07]),
            [0x02, code, 0x07] if (0xE0..=0xE2).contains(code) => Ok(vec![0x00]),
            _ => Ok(vec![0x01]),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Shared handle so a test can keep inspecting the simulator after the
/// `Tag` has taken ownership of the transport.
#[derive(Clone)]
pub struct SharedSim(pub Rc<RefCell<SimTag>>);

impl SharedSim {
    pub fn new(sim: SimTag) -> Self {
        Self(Rc::new(RefCell::new(sim)))
    }

    pub fn sim(&self) -> Ref<'_, SimTag> {
        self.0.borrow()
    }

    pub fn sim_mut(&self) -> RefMut<'_, SimTag> {
        self.0.borrow_mut()
    }
}

impl TagTransport for SharedSim {
    fn connect(&mut self) -> Result<()> {
        self.0.borrow_mut().connect()
    }

    fn transceive(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.0.borrow_mut().transceive(request)
    }

    fn close(&mut self) -> Result<()> {
        self.0.borrow_mut().close()
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().is_connected()
    }
}

/// Convenience: connect a [`Tag`] over a simulator and hand back both the
/// connected handle and the shared simulator for assertions.
pub fn connected_sim_tag(
    sim: SimTag,
) -> Result<(crate::tag::Tag<crate::tag::Connected>, SharedSim)> {
    let id = sim.tag_id();
    let shared = SharedSim::new(sim);
    let tag = crate::tag::Tag::new(Box::new(shared.clone()), id).connect()?;
    Ok((tag, shared))
}
