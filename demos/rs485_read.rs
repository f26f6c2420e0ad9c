//! Polls a single RS485 encoder at address 1 and prints its position.
//!
//! Usage: `rs485_read [port] [-v|-vv]`. The port defaults to `/dev/ttyUSB0` at 9600 baud,
//! the encoder's factory setting.
mod _logging;

use std::time::Duration;

use briter_encoder::serial2::SerialPort;
use briter_encoder::{Rs485Config, Rs485Encoder};

fn main() -> Result<(), briter_encoder::Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbosity = args
        .iter()
        .filter(|a| a.starts_with("-v"))
        .map(|a| a.len() as i8 - 1)
        .max()
        .unwrap_or(0);
    let path = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(String::as_str)
        .unwrap_or("/dev/ttyUSB0");
    _logging::init("briter_encoder", verbosity);

    let port = SerialPort::open(path, 9600)?;
    let config = Rs485Config {
        timeout: Duration::from_millis(20),
    };
    let mut encoder = Rs485Encoder::with_config(1, port, config)?;

    loop {
        // a failed read is reported and retried on the next poll
        match encoder.position() {
            Ok(position) => log::info!("position: {}", position.value()),
            Err(e) => log::warn!("read failed: {}", e),
        }
        if let Ok(turns) = encoder.turn_count() {
            log::debug!("turns: {}", turns);
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
