use std::time::Duration;

use fdcanusb::serial2::SerialPort;

use crate::transport::SerialTransport;
use crate::Error;

/// The port should be opened 8N1 at the encoder's baudrate.
impl SerialTransport for SerialPort {
    fn transmit(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), Error> {
        self.set_write_timeout(timeout)?;
        std::io::Write::write_all(self, bytes)?;
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<(), Error> {
        self.set_read_timeout(timeout)?;
        std::io::Read::read_exact(self, buf)?;
        Ok(())
    }

    fn transmit_nonblocking(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.set_write_timeout(Duration::ZERO)?;
        std::io::Write::write_all(self, bytes)?;
        Ok(())
    }
}
