//! LRC checksum algorithm
//!
//! The lock-controller protocol appends a single-byte Longitudinal
//! Redundancy Check to every packet:
//! 1. Take every byte of the packet body (length field through argument)
//! 2. XOR-fold them into a single byte
//! 3. Append the result after the body

use tracing::trace;

/// Calculate the LRC of a byte sequence
///
/// # Algorithm
///
/// ```text
/// lrc = 0
/// for byte in data: lrc ^= byte
/// ```
///
/// # Examples
///
/// ```
/// use netlock_core::checksum;
///
/// let lrc = checksum::lrc(&[0x00, 0x07, 0x01, 0x11, 0x01, 0x00, 0x00, 0x01]);
/// assert_eq!(lrc, 0x17);
/// ```
pub fn lrc(data: &[u8]) -> u8 {
    let lrc = data.iter().fold(0u8, |acc, byte| acc ^ byte);

    trace!(
        data_len = data.len(),
        lrc = format!("0x{:02X}", lrc),
        "Calculated LRC"
    );

    lrc
}

/// Verify an LRC
pub fn verify(data: &[u8], expected: u8) -> bool {
    lrc(data) == expected
}
