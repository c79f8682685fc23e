// goodv-rs/goodv/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the radio session away from protocol logic.
///
/// One implementation wraps whatever NFC stack discovered the tag; the
/// crate ships a scripted [`crate::transport::MockTransport`] and a
/// behavioral simulator in [`crate::test_support`] for tests. The contract
/// is synchronous and blocking: one request frame in, one response frame
/// out, and any call may fail when the tag leaves the field.
pub trait TagTransport {
    /// Open a session with the tag.
    fn connect(&mut self) -> Result<()>;

    /// Exchange one request frame for one response frame.
    fn transceive(&mut self, request: &[u8]) -> Result<Vec<u8>>;

    /// Close the session.
    fn close(&mut self) -> Result<()>;

    /// Whether a session is currently open.
    fn is_connected(&self) -> bool;
}
