use std::time::Duration;

use crate::bus::check_address;
use crate::protocol::registers::{
    Direction, Mode, Register, Rs485Baudrate, MIN_CONFIGURABLE_RETURN_TIME_MS,
};
use crate::protocol::rs485::{
    self, RequestFrame, POSITION_RESPONSE_LEN, REGISTER_RESPONSE_LEN, WRITE_RESPONSE_LEN,
};
use crate::protocol::Position;
use crate::transport::SerialTransport;
use crate::Error;

/// Settings for an [`Rs485Encoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rs485Config {
    /// Timeout handed to every transmit and receive.
    pub timeout: Duration,
}

impl Default for Rs485Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10),
        }
    }
}

/// A single encoder on an RS485 link.
///
/// Every operation is one request and, except for [`Rs485Encoder::request_position`], one
/// response. Nothing is retried; the caller decides whether to reissue a failed transaction.
///
/// ```rust,no_run
/// # #[cfg(feature = "fdcanusb")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let port = briter_encoder::serial2::SerialPort::open("/dev/ttyUSB0", 9600)?;
/// let mut encoder = briter_encoder::Rs485Encoder::new(1, port)?;
/// let position = encoder.position()?;
/// println!("position: {}", position.value());
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "fdcanusb"))]
/// # fn main() {}
/// ```
pub struct Rs485Encoder<T>
where
    T: SerialTransport,
{
    transport: T,
    address: u8,
    config: Rs485Config,
}

impl<T> Rs485Encoder<T>
where
    T: SerialTransport,
{
    /// Create a new [`Rs485Encoder`] for the device at `address` using the default config.
    pub fn new(address: u8, transport: T) -> Result<Self, Error> {
        Self::with_config(address, transport, Rs485Config::default())
    }

    /// Create a new [`Rs485Encoder`] with a custom [`Rs485Config`].
    pub fn with_config(address: u8, transport: T, config: Rs485Config) -> Result<Self, Error> {
        Ok(Self {
            transport,
            address: check_address(address)?,
            config,
        })
    }

    /// The address requests are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Read the multi-turn position.
    pub fn position(&mut self) -> Result<Position, Error> {
        let request = Self::position_request(self.address);
        let response = self.transaction::<POSITION_RESPONSE_LEN>(&request)?;
        rs485::decode_position(&response, self.address).map_err(|e| {
            log::debug!("rejected position response from {}: {}", self.address, e);
            e.into()
        })
    }

    /// Send a position request without waiting for the response.
    ///
    /// Pass the bytes the transport later receives to [`Rs485Encoder::on_position_received`].
    pub fn request_position(&mut self) -> Result<(), Error> {
        let request = Self::position_request(self.address).as_bytes();
        log::trace!("tx {}", hex::encode(request));
        self.transport.transmit_nonblocking(&request)
    }

    /// Decode a response to [`Rs485Encoder::request_position`].
    pub fn on_position_received(&self, buf: &[u8]) -> Result<Position, Error> {
        log::trace!("rx {}", hex::encode(buf));
        rs485::decode_position(buf, self.address).map_err(|e| {
            log::debug!("rejected position response from {}: {}", self.address, e);
            e.into()
        })
    }

    /// Read the number of completed turns.
    pub fn turn_count(&mut self) -> Result<u16, Error> {
        self.read_register(Register::TurnCount)
    }

    /// Read the position within the current turn.
    pub fn single_turn(&mut self) -> Result<u16, Error> {
        self.read_register(Register::SingleTurn)
    }

    /// Set the baudrate. The link must be reopened at the new rate afterwards.
    pub fn set_baudrate(&mut self, baudrate: Rs485Baudrate) -> Result<(), Error> {
        self.write(Register::Baudrate, baudrate as u16)
    }

    /// Change the device address. Subsequent requests go to `to_address`.
    pub fn set_address(&mut self, to_address: u8) -> Result<(), Error> {
        let to_address = check_address(to_address)?;
        self.write(Register::Address, u16::from(to_address))?;
        log::debug!("encoder address changed {} -> {}", self.address, to_address);
        self.address = to_address;
        Ok(())
    }

    /// Switch between query and backhaul mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error> {
        self.write(Register::Mode, mode as u16)
    }

    /// Set the automatic return time in milliseconds. The device default is 50 ms.
    ///
    /// Below 20 ms the encoder stops accepting configuration commands. This is not prevented
    /// here.
    pub fn set_return_time(&mut self, time_ms: u16) -> Result<(), Error> {
        if time_ms < MIN_CONFIGURABLE_RETURN_TIME_MS {
            log::warn!(
                "return time of {} ms locks the configuration of encoder {}",
                time_ms,
                self.address
            );
        }
        self.write(Register::ReturnTime, time_ms)
    }

    /// Set the direction in which the value increases.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), Error> {
        self.write(Register::Direction, direction as u16)
    }

    /// Make the current position the zero mark.
    pub fn reset_zero(&mut self) -> Result<(), Error> {
        self.write(Register::ResetZero, 1)
    }

    /// Make the current position the midpoint.
    pub fn set_midpoint(&mut self) -> Result<(), Error> {
        self.write(Register::Midpoint, 1)
    }

    /// Set the current turn count to 5.
    pub fn set_five_turns(&mut self) -> Result<(), Error> {
        self.write(Register::FiveTurns, 1)
    }

    fn position_request(address: u8) -> RequestFrame {
        // the position spans two registers
        RequestFrame::read(address, Register::Value, 2)
    }

    fn read_register(&mut self, register: Register) -> Result<u16, Error> {
        let request = RequestFrame::read(self.address, register, 1);
        let response = self.transaction::<REGISTER_RESPONSE_LEN>(&request)?;
        rs485::decode_register(&response, self.address).map_err(|e| {
            log::debug!("rejected read of {:?} from {}: {}", register, self.address, e);
            e.into()
        })
    }

    fn write(&mut self, register: Register, value: u16) -> Result<(), Error> {
        let request = RequestFrame::write_single(self.address, register, value);
        let response = self.transaction::<WRITE_RESPONSE_LEN>(&request)?;
        rs485::check_write_ack(&response, &request).map_err(|source| {
            log::debug!(
                "rejected {} ack for {:?} from {}: {}",
                rs485::describe_function(response[1]),
                register,
                self.address,
                source
            );
            Error::WriteFailed {
                register: register.address(),
                source,
            }
        })
    }

    /// Send `request` and receive exactly `N` bytes back.
    fn transaction<const N: usize>(&mut self, request: &RequestFrame) -> Result<[u8; N], Error> {
        let request = request.as_bytes();
        log::trace!("tx {}", hex::encode(request));
        self.transport.transmit(&request, self.config.timeout)?;

        let mut response = [0u8; N];
        self.transport.receive(&mut response, self.config.timeout)?;
        log::trace!("rx {}", hex::encode(response));
        Ok(response)
    }
}
