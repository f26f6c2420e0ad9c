//! Traits for moving encoder frames over an interface.
//!
//! The drivers only need a byte channel: [`SerialTransport`] for RS485 and [`CanTransport`] for
//! CAN. Implementations for `fdcanusb::FdCanUSB` and `serial2::SerialPort` are provided
//! with the `fdcanusb` feature.

#[cfg(feature = "fdcanusb")]
mod fdcanusb;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "fdcanusb")]
mod serial;

use std::time::Duration;

use crate::protocol::can::CanFrame;
use crate::Error;

/// A half-duplex byte channel to RS485 devices.
pub trait SerialTransport {
    /// Send `bytes`, blocking for at most `timeout`.
    fn transmit(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), Error>;

    /// Fill `buf` completely, blocking for at most `timeout`.
    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<(), Error>;

    /// Hand `bytes` over for sending and return without waiting for the response.
    ///
    /// The response is delivered to the caller by the transport's own receive path.
    fn transmit_nonblocking(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// A CAN bus interface.
pub trait CanTransport {
    /// Queue `frame` as a standard identifier data frame.
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error>;
}

impl<T: SerialTransport + ?Sized> SerialTransport for &mut T {
    fn transmit(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), Error> {
        (**self).transmit(bytes, timeout)
    }

    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<(), Error> {
        (**self).receive(buf, timeout)
    }

    fn transmit_nonblocking(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).transmit_nonblocking(bytes)
    }
}

impl<T: CanTransport + ?Sized> CanTransport for &mut T {
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error> {
        (**self).transmit(frame)
    }
}
