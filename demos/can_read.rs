//! Queries a single CAN encoder at address 1 through an fdcanusb and prints its position.
//!
//! The encoder answers a GET_VALUE command with a position report, which is handed to
//! [`CanEncoder::on_frame`] the same way a receive interrupt would.
mod _logging;

use briter_encoder::fdcanusb::{serial2, CanFdFrame, FdCanUSB};
use briter_encoder::protocol::can::{CanFrame, Command, COMMAND_LEN};
use briter_encoder::CanEncoder;

fn main() -> Result<(), briter_encoder::Error> {
    _logging::init("briter_encoder", 1);

    let transport = FdCanUSB::open("/dev/fdcanusb", serial2::KeepSettings)?;
    let mut encoder = CanEncoder::new(1, transport)?;
    let geometry = encoder.geometry();

    loop {
        let request = CanFrame::new(Command::GetValue, encoder.address(), COMMAND_LEN, 0)?;
        let frame = CanFdFrame::new_with_flags(
            request.id,
            &request.data,
            Some(false),
            Some(false),
            Some(false),
            Some(false),
            None,
        )?;
        let Some(reply) = encoder.transport_mut().transfer_single(frame, true)? else {
            log::warn!("no report");
            continue;
        };
        match encoder.on_frame(&reply.data) {
            Ok(position) => log::info!(
                "position: {} (turn {}, {}/{})",
                position.value(),
                position.turn(&geometry),
                position.single_turn(&geometry),
                geometry.pulses_per_revolution
            ),
            Err(e) => log::warn!("bad report: {}", e),
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
}
