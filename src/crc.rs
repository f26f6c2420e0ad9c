//! CRC-16 as used by the RS485 register protocol (MODBUS variant, reflected polynomial 0xA001).

use byteorder::{ByteOrder, LE};

const CRC_POLY: u16 = 0xA001;

/// Incremental CRC-16/MODBUS accumulator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Crc16 {
    value: u16,
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc16 {
    /// Starts a new calculation with the accumulator at `0xFFFF`.
    pub fn new() -> Self {
        Self { value: 0xFFFF }
    }

    fn add_byte(&mut self, byte: u8) {
        self.value ^= u16::from(byte);

        for _bit in 0..8 {
            if (self.value & 0x0001) != 0 {
                self.value = (self.value >> 1) ^ CRC_POLY;
            } else {
                self.value >>= 1;
            }
        }
    }

    /// Add a buffer to the CRC calculation
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        for b in bytes.iter() {
            self.add_byte(*b);
        }
        self
    }

    /// The CRC of everything added so far.
    pub fn value(&self) -> u16 {
        self.value
    }
}

/// Computes the CRC-16/MODBUS of `bytes`. An empty slice gives `0xFFFF`.
pub fn crc16(bytes: &[u8]) -> u16 {
    Crc16::new().update(bytes).value()
}

/// The CRC of `bytes` in wire order, low byte first.
pub fn crc16_le_bytes(bytes: &[u8]) -> [u8; 2] {
    let mut buf = [0u8; 2];
    LE::write_u16(&mut buf, crc16(bytes));
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    #[test]
    fn check_value() {
        // CRC-16/MODBUS check value
        assert_eq!(crc16(b"123456789"), 0x4B37);
    }

    #[test]
    fn read_request_crc() {
        assert_eq!(crc16(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x02]), 0x0BC4);
        assert_eq!(
            crc16_le_bytes(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x02]),
            [0xC4, 0x0B]
        );
    }

    #[test]
    fn depends_on_byte_order() {
        let bytes = [0x01, 0x03, 0x00, 0x00, 0x00, 0x02];
        let mut reversed = bytes;
        reversed.reverse();
        assert_ne!(crc16(&bytes), crc16(&reversed));
    }

    #[test]
    fn incremental_matches_one_shot() {
        let bytes = [0x01, 0x03, 0x04, 0xde, 0xad, 0xbe, 0xef];
        let mut crc = Crc16::new();
        crc.update(&bytes[..3]).update(&bytes[3..]);
        assert_eq!(crc.value(), crc16(&bytes));
        assert_eq!(crc.value(), 0xD661);
    }
}
