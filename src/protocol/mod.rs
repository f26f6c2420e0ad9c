//! Frame construction and response decoding for both encoder transports.
//!
//! The RS485 and CAN protocols happen to share small integer codes but are otherwise unrelated,
//! so each keeps its own enumerations in [`rs485`] and [`can`].

pub mod can;
pub mod registers;
pub mod rs485;

use byteorder::{ByteOrder, BE, LE};

/// Returned in place of a position by [`Position::or_sentinel`] when a read fails.
pub const ERROR_VALUE: u32 = 0xFFFF_FFFF;

/// Resolution and turn range of a multi-turn encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Pulses per revolution.
    pub pulses_per_revolution: u32,
    /// Number of turns the encoder counts before wrapping.
    pub turns: u32,
}

impl Geometry {
    /// The 4096 ppr, 24 turn CAN encoder.
    pub const CAN_DEFAULT: Geometry = Geometry {
        pulses_per_revolution: 4096,
        turns: 24,
    };

    /// First value past the end of the position range.
    pub fn max_value(&self) -> u32 {
        self.pulses_per_revolution.saturating_mul(self.turns)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::CAN_DEFAULT
    }
}

/// A multi-turn position as reported by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u32);

impl Position {
    /// Assembles a position from bytes sent most significant first (RS485).
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Position(BE::read_u32(&bytes))
    }

    /// Assembles a position from bytes sent least significant first (CAN).
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Position(LE::read_u32(&bytes))
    }

    /// The raw count.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Whether the position lies in `[0, geometry.max_value())`.
    pub fn is_within(&self, geometry: &Geometry) -> bool {
        self.0 < geometry.max_value()
    }

    /// Completed turns.
    pub fn turn(&self, geometry: &Geometry) -> u32 {
        self.0 / geometry.pulses_per_revolution.max(1)
    }

    /// Pulses into the current turn.
    pub fn single_turn(&self, geometry: &Geometry) -> u32 {
        self.0 % geometry.pulses_per_revolution.max(1)
    }

    /// Collapses a read result to a raw value, using [`ERROR_VALUE`] for any failure.
    pub fn or_sentinel<E>(result: Result<Position, E>) -> u32 {
        result.map(|p| p.0).unwrap_or(ERROR_VALUE)
    }
}

impl From<Position> for u32 {
    fn from(position: Position) -> u32 {
        position.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianness() {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(Position::from_be_bytes(bytes).value(), 0x1234_5678);
        assert_eq!(Position::from_le_bytes(bytes).value(), 0x7856_3412);
    }

    #[test]
    fn can_geometry() {
        let g = Geometry::default();
        assert_eq!(g.max_value(), 98304);
        assert!(Position(98303).is_within(&g));
        assert!(!Position(98304).is_within(&g));
        assert_eq!(Position(4096 * 3 + 17).turn(&g), 3);
        assert_eq!(Position(4096 * 3 + 17).single_turn(&g), 17);
    }

    #[test]
    fn sentinel() {
        assert_eq!(Position::or_sentinel::<()>(Ok(Position(42))), 42);
        assert_eq!(Position::or_sentinel(Err(())), ERROR_VALUE);
    }
}
