//! A rust driver for [Briter](http://www.briterencoder.com/) absolute multi-turn encoders.
//!
//! The encoders are reachable over two transports, a CAN bus and an RS485 link running a
//! Modbus-like register protocol. Frames for both are built and checked in [`protocol`];
//! [`Rs485Encoder`] and [`CanEncoder`] drive a single device over a transport implementing
//! [`SerialTransport`] or [`CanTransport`].

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true
)]
#![deny(
// missing_debug_implementations,
missing_docs,
trivial_casts,
trivial_numeric_casts,
unused_extern_crates,
unused_import_braces,
unused_qualifications,
// unused_results
)]
#![warn(clippy::unwrap_used)]

mod bus;
pub mod crc;
mod error;
pub mod protocol;
pub mod transport;

pub use bus::{CanEncoder, Rs485Config, Rs485Encoder};
pub use error::*;
#[cfg(feature = "fdcanusb")]
pub use fdcanusb;
#[cfg(feature = "fdcanusb")]
pub use fdcanusb::serial2;
pub use protocol::{registers, Geometry, Position};
pub use transport::{CanTransport, SerialTransport};
