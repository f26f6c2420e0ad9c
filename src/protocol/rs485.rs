//! RS485 frames.
//!
//! Requests are always 8 bytes: `[address, function, reg_hi, reg_lo, value_hi, value_lo, crc_lo, crc_hi]`.
//! Write acknowledgements echo the request. Read responses are
//! `[address, function, n, data_0 .. data_n-1, crc_lo, crc_hi]`.
//! Register and value fields are big-endian, the CRC is little-endian.

use byteorder::{ByteOrder, BE, LE};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::crc::{crc16, crc16_le_bytes};
use crate::protocol::registers::Register;
use crate::protocol::Position;
use crate::FrameParseError;

/// Length of every request frame.
pub const REQUEST_LEN: usize = 8;
/// Length of a write acknowledgement.
pub const WRITE_RESPONSE_LEN: usize = 8;
/// Length of the response to a two register position read.
pub const POSITION_RESPONSE_LEN: usize = 9;
/// Length of the response to a single register read.
pub const REGISTER_RESPONSE_LEN: usize = 7;

const CRC_LEN: usize = 2;
const READ_HEADER_LEN: usize = 3;

/// RS485 function codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum FunctionCode {
    /// Read holding registers.
    Read = 0x03,
    /// Write a single register.
    WriteSingle = 0x06,
    /// Write multiple registers.
    WriteMulti = 0x10,
}

/// A request to the encoder.
///
/// For [`FunctionCode::Read`] the value is the number of registers to read, for writes it is
/// the value to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFrame {
    /// Address of the device.
    pub address: u8,
    /// What to do.
    pub function: FunctionCode,
    /// First register to access.
    pub register: u16,
    /// Register count or value.
    pub value: u16,
}

impl RequestFrame {
    /// Create a new request.
    pub fn new(function: FunctionCode, address: u8, register: u16, value: u16) -> Self {
        Self {
            address,
            function,
            register,
            value,
        }
    }

    /// Read `count` registers starting at `register`.
    pub fn read(address: u8, register: Register, count: u16) -> Self {
        Self::new(FunctionCode::Read, address, register.address(), count)
    }

    /// Write `value` to `register`.
    pub fn write_single(address: u8, register: Register, value: u16) -> Self {
        Self::new(FunctionCode::WriteSingle, address, register.address(), value)
    }

    /// Serialize the frame, appending the CRC of the first six bytes.
    pub fn as_bytes(&self) -> [u8; REQUEST_LEN] {
        let mut buf = [0u8; REQUEST_LEN];
        buf[0] = self.address;
        buf[1] = self.function as u8;
        BE::write_u16(&mut buf[2..4], self.register);
        BE::write_u16(&mut buf[4..6], self.value);
        let crc = crc16_le_bytes(&buf[..REQUEST_LEN - CRC_LEN]);
        buf[6..].copy_from_slice(&crc);
        buf
    }

    /// The register and value bytes, as a write acknowledgement must echo them.
    fn echo_bytes(&self) -> [u8; 4] {
        let mut buf = [0u8; 4];
        BE::write_u16(&mut buf[..2], self.register);
        BE::write_u16(&mut buf[2..], self.value);
        buf
    }
}

fn ensure_len(buf: &[u8], expected: usize) -> Result<(), FrameParseError> {
    if buf.len() < expected {
        return Err(FrameParseError::Truncated {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Check that `buf` is an intact response from `address` to `function`.
///
/// Returns the length of the frame including its CRC. Bytes past that are ignored.
pub fn check_response(
    buf: &[u8],
    address: u8,
    function: FunctionCode,
) -> Result<usize, FrameParseError> {
    ensure_len(buf, 2)?;
    if buf[0] != address {
        return Err(FrameParseError::AddressMismatch {
            expected: address,
            actual: buf[0],
        });
    }
    if buf[1] != function as u8 {
        return Err(FrameParseError::FunctionMismatch {
            expected: function as u8,
            actual: buf[1],
        });
    }

    let crc_offset = match function {
        FunctionCode::Read => {
            ensure_len(buf, READ_HEADER_LEN)?;
            READ_HEADER_LEN + usize::from(buf[2])
        }
        FunctionCode::WriteSingle | FunctionCode::WriteMulti => WRITE_RESPONSE_LEN - CRC_LEN,
    };
    ensure_len(buf, crc_offset + CRC_LEN)?;

    let computed = crc16(&buf[..crc_offset]);
    let received = LE::read_u16(&buf[crc_offset..crc_offset + CRC_LEN]);
    if computed != received {
        return Err(FrameParseError::CrcMismatch { computed, received });
    }
    Ok(crc_offset + CRC_LEN)
}

/// Check that `buf` acknowledges `request`, echoing its register and value unchanged.
pub fn check_write_ack(buf: &[u8], request: &RequestFrame) -> Result<(), FrameParseError> {
    let _ = check_response(buf, request.address, request.function)?;
    let sent = request.echo_bytes();
    let mut received = [0u8; 4];
    received.copy_from_slice(&buf[2..6]);
    if sent != received {
        return Err(FrameParseError::EchoMismatch { sent, received });
    }
    Ok(())
}

/// Returns the data bytes of a read response from `address` carrying at least `min_len` bytes.
fn read_data(buf: &[u8], address: u8, min_len: usize) -> Result<&[u8], FrameParseError> {
    let len = check_response(buf, address, FunctionCode::Read)?;
    let data = &buf[READ_HEADER_LEN..len - CRC_LEN];
    if data.len() < min_len {
        return Err(FrameParseError::Truncated {
            expected: READ_HEADER_LEN + min_len + CRC_LEN,
            actual: len,
        });
    }
    Ok(data)
}

/// Decode the response to a position read. Data bytes 0 to 3 hold the position, most
/// significant byte first.
pub fn decode_position(buf: &[u8], address: u8) -> Result<Position, FrameParseError> {
    let data = read_data(buf, address, 4)?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[..4]);
    Ok(Position::from_be_bytes(bytes))
}

/// Decode the response to a single register read.
pub fn decode_register(buf: &[u8], address: u8) -> Result<u16, FrameParseError> {
    let data = read_data(buf, address, 2)?;
    Ok(BE::read_u16(&data[..2]))
}

/// Name the function code of a received frame, for logging.
pub(crate) fn describe_function(code: u8) -> String {
    match FunctionCode::from_u8(code) {
        Some(f) => format!("{:?}", f),
        None => format!("unknown({:#04x})", code),
    }
}
