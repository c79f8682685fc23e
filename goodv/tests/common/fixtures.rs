// fixtures.rs — commonly used tag identifiers and transports
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use goodv::tag::{Connected, Tag};
use goodv::transport::{MockTransport, TagTransport};
use goodv::{Result, TagId};

pub fn frl_id() -> TagId {
    TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, 0xA2, 0x07, 0xE0])
}

pub fn tal_id() -> TagId {
    TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, 0xA0, 0x07, 0xE0])
}

pub fn tagit_id() -> TagId {
    TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, 0x00, 0x07, 0xE0])
}

pub fn nxp_id() -> TagId {
    TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, 0x01, 0x04, 0xE0])
}

pub fn generic_id() -> TagId {
    TagId::from_bytes([0x47, 0x7A, 0x01, 0x00, 0x00, 0xCD, 0xAB, 0xE0])
}

/// A system info response long enough to carry the NXP block count at
/// index 12.
pub fn nxp_system_info(block_count: u8) -> Vec<u8> {
    let mut info = vec![0x00, 0x04];
    info.extend_from_slice(&[0x47, 0x7A, 0x01, 0x00, 0x00, 0x01, 0x04, 0xE0]);
    info.extend_from_slice(&[0xF2, 0x07]);
    info.push(block_count);
    info
}

/// Shared handle so a test can keep inspecting the mock after the `Tag`
/// has taken ownership of the transport.
#[derive(Clone)]
pub struct SharedMock(pub Rc<RefCell<MockTransport>>);

impl SharedMock {
    pub fn new(mock: MockTransport) -> Self {
        Self(Rc::new(RefCell::new(mock)))
    }

    pub fn sent_len(&self) -> usize {
        self.0.borrow().sent.len()
    }
}

impl TagTransport for SharedMock {
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

/// Connect a tag over a shared mock pre-seeded with the given responses.
pub fn connected_mock_tag(
    id: TagId,
    responses: Vec<Vec<u8>>,
) -> Result<(Tag<Connected>, SharedMock)> {
    let mut mock = MockTransport::new();
    for resp in responses {
        mock.push_response(resp);
    }
    let shared = SharedMock::new(mock);
    let tag = Tag::new(Box::new(shared.clone()), id).connect()?;
    Ok((tag, shared))
}
