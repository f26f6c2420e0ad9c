//! CAN frames.
//!
//! Requests are `[length, address, command, payload..]` sent as a standard data frame whose
//! identifier is the device address. Position reports are 7 bytes,
//! `[0x07, address, GET_VALUE, p0, p1, p2, p3]` with the position least significant byte first.

use byteorder::{ByteOrder, LE};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::protocol::Position;
use crate::{FrameError, FrameParseError};

/// Length of a position report.
pub const REPORT_LEN: u8 = 7;

/// Length the encoder commands are sent with: one payload byte.
pub const COMMAND_LEN: u8 = 4;

/// CAN command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Command {
    /// Read the encoder value.
    GetValue = 0x01,
    /// Change the device address.
    SetId,
    /// Change the bus baudrate.
    SetBaudrate,
    /// Switch between query and backhaul mode.
    SetMode,
    /// Set the automatic return time.
    SetReturnTime,
    /// Set the current position as zero.
    SetZero,
}

/// A classic CAN data frame with a standard identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanFrame {
    /// 11-bit identifier, the device address.
    pub id: u16,
    /// Frame payload, its length is the frame's DLC.
    pub data: Vec<u8>,
}

impl CanFrame {
    /// Build a command frame for the device at `address`.
    ///
    /// `length` is the total frame length. A length of 3 carries no payload, 4 carries the low
    /// byte of `selection` and 5 carries both bytes, low byte first.
    pub fn new(
        command: Command,
        address: u8,
        length: u8,
        selection: u16,
    ) -> Result<Self, FrameError> {
        let mut data = Vec::with_capacity(usize::from(length));
        data.extend_from_slice(&[length, address, command as u8]);
        match length {
            3 => {}
            4 => {
                let byte = u8::try_from(selection)
                    .map_err(|_| FrameError::SelectionOverflow { length, selection })?;
                data.push(byte);
            }
            5 => {
                let mut buf = [0u8; 2];
                LE::write_u16(&mut buf, selection);
                data.extend_from_slice(&buf);
            }
            l => return Err(FrameError::InvalidDataLength(l)),
        }
        Ok(Self {
            id: u16::from(address),
            data,
        })
    }

    /// The frame's data length code.
    pub fn dlc(&self) -> usize {
        self.data.len()
    }
}

/// Decode a position report from the device at `address`.
pub fn decode_position(buf: &[u8], address: u8) -> Result<Position, FrameParseError> {
    let expected = usize::from(REPORT_LEN);
    if buf.len() < expected {
        return Err(FrameParseError::Truncated {
            expected,
            actual: buf.len(),
        });
    }
    if buf[1] != address {
        return Err(FrameParseError::AddressMismatch {
            expected: address,
            actual: buf[1],
        });
    }
    if buf[0] != REPORT_LEN {
        return Err(FrameParseError::InvalidReportLength(buf[0]));
    }
    if Command::from_u8(buf[2]) != Some(Command::GetValue) {
        return Err(FrameParseError::UnexpectedCommand(buf[2]));
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[3..7]);
    Ok(Position::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn get_value_frame() {
        let frame = CanFrame::new(Command::GetValue, 5, COMMAND_LEN, 0).unwrap();
        assert_eq!(frame.data, vec![0x04, 0x05, 0x01, 0x00]);
        assert_eq!(frame.id, 5);
        assert_eq!(frame.dlc(), 4);
    }

    #[test]
    fn payload_packing() {
        let frame = CanFrame::new(Command::SetZero, 2, 3, 0).unwrap();
        assert_eq!(frame.data, vec![0x03, 0x02, 0x06]);
        let frame = CanFrame::new(Command::SetReturnTime, 2, 5, 0x1234).unwrap();
        assert_eq!(frame.data, vec![0x05, 0x02, 0x05, 0x34, 0x12]);
        let frame = CanFrame::new(Command::SetBaudrate, 9, 4, 2).unwrap();
        assert_eq!(frame.data, vec![0x04, 0x09, 0x03, 0x02]);
    }

    #[test]
    fn invalid_lengths_are_rejected() {
        assert_eq!(
            CanFrame::new(Command::GetValue, 1, 6, 0),
            Err(FrameError::InvalidDataLength(6))
        );
        assert_eq!(
            CanFrame::new(Command::GetValue, 1, 2, 0),
            Err(FrameError::InvalidDataLength(2))
        );
        assert_eq!(
            CanFrame::new(Command::SetReturnTime, 1, 4, 300),
            Err(FrameError::SelectionOverflow {
                length: 4,
                selection: 300
            })
        );
    }

    #[test]
    fn position_is_little_endian() {
        let report = [0x07, 0x01, 0x01, 0x00, 0x80, 0x01, 0x00];
        assert_eq!(decode_position(&report, 1), Ok(Position(0x0001_8000)));

        for payload in [[0u8, 0, 0, 0], [0x12, 0x34, 0x56, 0x78], [0xFF, 0xFF, 0x01, 0x00]] {
            let mut report = vec![0x07, 0x03, 0x01];
            report.extend_from_slice(&payload);
            let expected = u32::from(payload[0])
                | u32::from(payload[1]) << 8
                | u32::from(payload[2]) << 16
                | u32::from(payload[3]) << 24;
            assert_eq!(decode_position(&report, 3), Ok(Position(expected)));
        }
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let report = [0x07, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0xAA];
        assert_eq!(decode_position(&report, 1), Ok(Position(1)));
    }

    #[test]
    fn header_mismatch_is_rejected() {
        let report = [0x07, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            decode_position(&report, 1),
            Err(FrameParseError::AddressMismatch {
                expected: 1,
                actual: 2
            })
        );
        let report = [0x06, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            decode_position(&report, 1),
            Err(FrameParseError::InvalidReportLength(6))
        );
        let report = [0x07, 0x01, 0x04, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            decode_position(&report, 1),
            Err(FrameParseError::UnexpectedCommand(0x04))
        );
        assert!(matches!(
            decode_position(&report[..6], 1),
            Err(FrameParseError::Truncated { .. })
        ));
    }
}
