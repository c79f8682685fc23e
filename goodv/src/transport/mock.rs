// goodv-rs/goodv/src/transport/mock.rs

use crate::transport::traits::TagTransport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent frames and returns
/// queued responses in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub responses: Vec<Vec<u8>>,
    pub connected: bool,
    /// Testing hook: number of transceive calls that should fail with
    /// Timeout before responses are consumed again.
    pub transceive_failures: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response frame for a later transceive call.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }

    /// Set how many subsequent transceive calls should fail (for tests).
    pub fn set_transceive_failures(&mut self, n: usize) {
        self.transceive_failures = n;
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl TagTransport for MockTransport {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn transceive(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.sent.push(request.to_vec());
        if self.transceive_failures > 0 {
            self.transceive_failures -= 1;
            return Err(Error::Timeout);
        }
        if self.responses.is_empty() {
            Err(Error::Timeout)
        } else {
            Ok(self.responses.remove(0))
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
