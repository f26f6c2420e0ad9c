//! Registers and option values of the Briter encoders
//!
//! The RS485 encoders expose a small set of holding registers. [`Register`] lists them;
//! the remaining types are the values written to the configuration registers. The CAN encoders
//! take the same [`Mode`] values but use their own [`CanBaudrate`] table.

use num_derive::{FromPrimitive, ToPrimitive};

/// RS485 holding register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum Register {
    /// Multi-turn encoder value, two registers wide.
    Value = 0x00,
    /// Number of turns.
    TurnCount = 0x02,
    /// Single-turn value.
    SingleTurn = 0x03,
    /// Communication address.
    Address = 0x04,
    /// Baudrate, see [`Rs485Baudrate`].
    Baudrate = 0x05,
    /// Data mode, see [`Mode`].
    Mode = 0x06,
    /// Automatic return time in milliseconds.
    ReturnTime = 0x07,
    /// Resets the zero mark to the current position.
    ResetZero = 0x08,
    /// Counting direction, see [`Direction`].
    Direction = 0x09,
    /// Sets the current value. Written with WRITE_MULTI.
    SetPosition = 0x0B,
    /// Sets the midpoint to the current position.
    Midpoint = 0x0E,
    /// Sets the current turn count to 5.
    FiveTurns = 0x0F,
}

impl Register {
    /// The register address.
    pub fn address(self) -> u16 {
        self as u16
    }
}

/// Baudrates selectable on the RS485 encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromPrimitive, ToPrimitive)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Rs485Baudrate {
    #[default]
    B9600 = 0x00,
    B19200,
    B38400,
    B57600,
    B115200,
}

impl Rs485Baudrate {
    /// Bits per second.
    pub fn bits_per_second(self) -> u32 {
        match self {
            Rs485Baudrate::B9600 => 9600,
            Rs485Baudrate::B19200 => 19200,
            Rs485Baudrate::B38400 => 38400,
            Rs485Baudrate::B57600 => 57600,
            Rs485Baudrate::B115200 => 115200,
        }
    }
}

/// Baudrates selectable on the CAN encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromPrimitive, ToPrimitive)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum CanBaudrate {
    #[default]
    K500 = 0x00,
    K1000,
    K250,
    K125,
    K100,
}

/// Data mode. In query mode the encoder only answers requests; in backhaul mode it reports
/// its value on its own every return time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromPrimitive, ToPrimitive)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Mode {
    #[default]
    Query = 0x00,
    Backhaul,
}

/// Direction in which the encoder value increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromPrimitive, ToPrimitive)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Direction {
    #[default]
    Clockwise = 0x00,
    CounterClockwise,
}

/// Return times below this leave the encoder unable to accept further configuration.
pub const MIN_CONFIGURABLE_RETURN_TIME_MS: u16 = 20;

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{FromPrimitive, ToPrimitive};

    #[test]
    fn register_map() {
        assert_eq!(Register::Value.address(), 0x00);
        assert_eq!(Register::Direction.address(), 0x09);
        assert_eq!(Register::SetPosition.address(), 0x0B);
        assert_eq!(Register::from_u16(0x0F), Some(Register::FiveTurns));
        assert_eq!(Register::from_u16(0x01), None);
    }

    #[test]
    fn option_values() {
        assert_eq!(Rs485Baudrate::B115200.to_u16(), Some(4));
        assert_eq!(CanBaudrate::from_u16(2), Some(CanBaudrate::K250));
        assert_eq!(Mode::Backhaul.to_u16(), Some(1));
        assert_eq!(Direction::from_u16(2), None);
        assert_eq!(Rs485Baudrate::default().bits_per_second(), 9600);
    }
}
