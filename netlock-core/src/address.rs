//! Device address parsing and validation
//!
//! Controllers on the RS485 bus are addressed by a single byte, which the
//! inbound API carries as a two-digit hex string (e.g. `"01"`). Parsing
//! fails fast on anything that is not exactly one hex-encoded byte; the
//! codec never truncates an oversized address.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// One-byte RS485 device address
///
/// # Examples
///
/// ```
/// use netlock_core::DeviceAddress;
///
/// let addr: DeviceAddress = "01".parse().unwrap();
/// assert_eq!(addr.as_byte(), 0x01);
/// assert_eq!(addr.to_string(), "01");
///
/// assert!("001".parse::<DeviceAddress>().is_err());
/// assert!("zz".parse::<DeviceAddress>().is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Create an address from its raw byte value
    pub fn new(byte: u8) -> Self {
        Self(byte)
    }

    /// Parse an address from a two-digit hex string
    pub fn from_hex(value: &str) -> Result<Self> {
        if value.len() != 2 {
            return Err(Error::InvalidAddressLength {
                value: value.to_string(),
            });
        }

        // from_str_radix tolerates a leading sign, which is not a hex digit
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidAddressDigit {
                value: value.to_string(),
            });
        }

        let byte = u8::from_str_radix(value, 16).map_err(|_| Error::InvalidAddressDigit {
            value: value.to_string(),
        })?;

        Ok(Self(byte))
    }

    /// Get the raw byte value
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl FromStr for DeviceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}
