use crate::bus::check_address;
use crate::protocol::can::{self, CanFrame, Command, COMMAND_LEN};
use crate::protocol::registers::{CanBaudrate, Mode, MIN_CONFIGURABLE_RETURN_TIME_MS};
use crate::protocol::{Geometry, Position};
use crate::transport::CanTransport;
use crate::Error;

/// A single encoder on a CAN bus.
///
/// Commands are fire-and-forget. Position reports, whether requested with
/// [`CanEncoder::request_position`] or sent by the encoder in backhaul mode, arrive through the
/// bus receive path and are decoded with [`CanEncoder::on_frame`]. Routing received frames to
/// the right encoder is up to the caller; byte 1 of every frame is the sender's address.
pub struct CanEncoder<T>
where
    T: CanTransport,
{
    transport: T,
    address: u8,
    geometry: Geometry,
}

impl<T> CanEncoder<T>
where
    T: CanTransport,
{
    /// Create a new [`CanEncoder`] for the device at `address`, assuming a 4096 ppr, 24 turn
    /// encoder.
    pub fn new(address: u8, transport: T) -> Result<Self, Error> {
        Ok(Self {
            transport,
            address: check_address(address)?,
            geometry: Geometry::default(),
        })
    }

    /// Use a different [`Geometry`] for range checks.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// The address commands are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The configured geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Ask the encoder for its position.
    pub fn request_position(&mut self) -> Result<(), Error> {
        self.send(Command::GetValue, 0)
    }

    /// Decode a frame received from the bus as a position report.
    ///
    /// Positions outside the configured geometry are logged but still returned.
    pub fn on_frame(&self, data: &[u8]) -> Result<Position, Error> {
        log::trace!("rx {}", hex::encode(data));
        let position = can::decode_position(data, self.address).map_err(|e| {
            log::debug!("rejected report for encoder {}: {}", self.address, e);
            Error::from(e)
        })?;
        if !position.is_within(&self.geometry) {
            log::warn!(
                "encoder {} reported {} outside of [0, {})",
                self.address,
                position.value(),
                self.geometry.max_value()
            );
        }
        Ok(position)
    }

    /// Change the device address. Subsequent commands go to `to_address`.
    pub fn set_address(&mut self, to_address: u8) -> Result<(), Error> {
        let to_address = check_address(to_address)?;
        self.send(Command::SetId, u16::from(to_address))?;
        log::debug!("encoder address changed {} -> {}", self.address, to_address);
        self.address = to_address;
        Ok(())
    }

    /// Set the bus baudrate.
    pub fn set_baudrate(&mut self, baudrate: CanBaudrate) -> Result<(), Error> {
        self.send(Command::SetBaudrate, baudrate as u16)
    }

    /// Switch between query and backhaul mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error> {
        self.send(Command::SetMode, mode as u16)
    }

    /// Set the automatic return time in milliseconds.
    ///
    /// The command carries a single byte, so times above 255 ms are rejected. Below 20 ms the
    /// encoder stops accepting configuration commands.
    pub fn set_return_time(&mut self, time_ms: u16) -> Result<(), Error> {
        if time_ms < MIN_CONFIGURABLE_RETURN_TIME_MS {
            log::warn!(
                "return time of {} ms locks the configuration of encoder {}",
                time_ms,
                self.address
            );
        }
        self.send(Command::SetReturnTime, time_ms)
    }

    /// Make the current position zero.
    pub fn set_zero(&mut self) -> Result<(), Error> {
        self.send(Command::SetZero, 0)
    }

    fn send(&mut self, command: Command, selection: u16) -> Result<(), Error> {
        let frame = CanFrame::new(command, self.address, COMMAND_LEN, selection)?;
        log::trace!("tx {:03x} {}", frame.id, hex::encode(&frame.data));
        self.transport.transmit(&frame)
    }
}
