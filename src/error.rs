use thiserror::Error;

/// Errors that can occur when talking to a Briter encoder.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors are returned unchanged from the serial transport, including read timeouts.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Transfer errors occur when writing frames to the fdcanusb.
    #[cfg(feature = "fdcanusb")]
    #[error(transparent)]
    TransportError(#[from] fdcanusb::TransferError),
    /// The frame could not be packed into a CAN frame by the fdcanusb.
    #[cfg(feature = "fdcanusb")]
    #[error("data overflow error: {0}")]
    InvalidFrameLength(#[from] fdcanusb::InvalidFrameLength),
    /// Frame errors occur when a request frame cannot be encoded. Nothing is transmitted.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    /// FrameParse errors occur when a response frame fails validation.
    #[error("frame parse error: {0}")]
    FrameParse(#[from] FrameParseError),
    /// A configuration write was not acknowledged correctly.
    ///
    /// Every failure after a successful transmit ends up here, whether the acknowledgement was
    /// corrupt or a valid frame echoed different register contents.
    #[error("write to register {register:#04x} failed")]
    WriteFailed {
        /// The register that was written.
        register: u16,
        /// Why the acknowledgement was rejected.
        #[source]
        source: FrameParseError,
    },
    /// Device addresses are a single nonzero byte.
    #[error("invalid device address: {0}")]
    InvalidAddress(u8),
}

/// Errors that can occur when encoding a request frame.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// CAN request frames are 3, 4 or 5 bytes long.
    #[error("invalid CAN data length: {0}")]
    InvalidDataLength(u8),
    /// The selection value does not fit in the payload bytes of the declared length.
    #[error("selection {selection} does not fit a frame of length {length}")]
    SelectionOverflow {
        /// The declared frame length.
        length: u8,
        /// The value that was to be packed.
        selection: u16,
    },
}

/// Errors that can occur when validating a response frame.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameParseError {
    /// The frame is shorter than its layout requires.
    #[error("frame truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the frame layout.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },
    /// The frame came from a different device.
    #[error("address mismatch: expected {expected}, got {actual}")]
    AddressMismatch {
        /// The address of the device that was queried.
        expected: u8,
        /// The address found in the frame.
        actual: u8,
    },
    /// The frame answers a different function code.
    #[error("function mismatch: expected {expected:#04x}, got {actual:#04x}")]
    FunctionMismatch {
        /// The function code that was requested.
        expected: u8,
        /// The function code found in the frame.
        actual: u8,
    },
    /// The frame is corrupt. The response should be treated as unavailable.
    #[error("crc mismatch: computed {computed:#06x}, received {received:#06x}")]
    CrcMismatch {
        /// CRC computed over the frame prefix.
        computed: u16,
        /// CRC carried by the frame.
        received: u16,
    },
    /// A CAN position report must declare a length of 7.
    #[error("invalid report length: {0}")]
    InvalidReportLength(u8),
    /// The CAN frame carries a command other than the one expected.
    #[error("unexpected command: {0:#04x}")]
    UnexpectedCommand(u8),
    /// A write acknowledgement passed CRC but echoed different register or value bytes.
    #[error("echo mismatch: sent {sent:02x?}, received {received:02x?}")]
    EchoMismatch {
        /// Register and value bytes of the request.
        sent: [u8; 4],
        /// Register and value bytes of the acknowledgement.
        received: [u8; 4],
    },
}
