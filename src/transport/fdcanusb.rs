use fdcanusb::{CanFdFrame, FdCanUSB};

use crate::protocol::can::CanFrame;
use crate::transport::CanTransport;
use crate::Error;

/// Frames go out as classic CAN: standard id, no bit rate switch, no FD, no RTR.
impl<T> CanTransport for FdCanUSB<T>
where
    T: std::io::Write + std::io::Read,
{
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error> {
        let frame = CanFdFrame::new_with_flags(
            frame.id,
            &frame.data,
            Some(false),
            Some(false),
            Some(false),
            Some(false),
            None,
        )?;
        let _ = self.transfer_single(frame, false)?;
        Ok(())
    }
}
