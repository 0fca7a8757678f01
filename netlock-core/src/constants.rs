//! Protocol constants

/// Frame start marker, first byte of every packet on the wire
pub const START_MARKER: u8 = 0xF3;

/// Length field value for the open-door command family
///
/// Counts the fixed-size fields following the length field itself:
/// command (2) + address (1) + return code (2) + argument (1) + LRC (1).
pub const PACKET_LENGTH: u16 = 0x0007;

/// Status/return code field, always zero in outbound packets
pub const RETURN_CODE: u16 = 0x0000;

/// Default serial read timeout (seconds)
pub const DEFAULT_READ_TIMEOUT: u64 = 1;

/// Default reconnect supervisor interval (seconds)
pub const DEFAULT_RECONNECT_INTERVAL: u64 = 5;

/// Default baud rate for the lock-controller bus
pub const DEFAULT_BAUD_RATE: u32 = 9600;
