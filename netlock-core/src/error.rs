//! Error types for netlock-core



/// Result type alias for netlock protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol validation errors
///
/// Every variant is caught at the encoding boundary, before any bytes
/// reach the serial link.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Device address is not exactly one hex-encoded byte
    #[error("Invalid device address {value:?}: expected exactly 2 hex digits")]
    InvalidAddressLength {
        value: String,
    },

    /// Device address contains non-hex characters
    #[error("Invalid device address {value:?}: not valid hex")]
    InvalidAddressDigit {
        value: String,
    },

    /// Door number does not fit the single-byte argument field
    #[error("Door number {value} out of range (0-255)")]
    DoorOutOfRange {
        value: u16,
    },

    /// Unknown command code
    #[error("Unknown command code: 0x{0:04X}")]
    UnknownCommand(u16),
}
