mod can;
mod rs485;

pub use can::CanEncoder;
pub use rs485::{Rs485Config, Rs485Encoder};

use crate::Error;

/// Device addresses are a single nonzero byte.
fn check_address(address: u8) -> Result<u8, Error> {
    if address == 0 {
        return Err(Error::InvalidAddress(address));
    }
    Ok(address)
}
