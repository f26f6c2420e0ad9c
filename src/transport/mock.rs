use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::protocol::can::CanFrame;
use crate::transport::{CanTransport, SerialTransport};
use crate::Error;

/// Mock RS485 link for testing. Records what was sent and replays scripted responses.
#[derive(Debug, Default)]
pub struct MockSerial {
    pub sent: Vec<Vec<u8>>,
    pub sent_nonblocking: Vec<Vec<u8>>,
    pub timeouts: Vec<Duration>,
    pub replies: VecDeque<Vec<u8>>,
    pub fail_transmit: Option<io::ErrorKind>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers with `replies` in order
    pub fn with_replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl SerialTransport for MockSerial {
    fn transmit(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), Error> {
        if let Some(kind) = self.fail_transmit {
            return Err(io::Error::from(kind).into());
        }
        self.timeouts.push(timeout);
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<(), Error> {
        self.timeouts.push(timeout);
        // a missing or short reply behaves like the line going quiet
        let reply = self
            .replies
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::TimedOut))?;
        if reply.len() < buf.len() {
            return Err(io::Error::from(io::ErrorKind::TimedOut).into());
        }
        buf.copy_from_slice(&reply[..buf.len()]);
        Ok(())
    }

    fn transmit_nonblocking(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if let Some(kind) = self.fail_transmit {
            return Err(io::Error::from(kind).into());
        }
        self.sent_nonblocking.push(bytes.to_vec());
        Ok(())
    }
}

/// Mock CAN bus for testing.
#[derive(Debug, Default)]
pub struct MockCan {
    pub sent: Vec<CanFrame>,
    pub fail_transmit: bool,
}

impl MockCan {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CanTransport for MockCan {
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error> {
        if self.fail_transmit {
            return Err(io::Error::other("bus off").into());
        }
        self.sent.push(frame.clone());
        Ok(())
    }
}
