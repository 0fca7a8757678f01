//! RS485 protocol command definitions

use std::fmt;

use crate::error::{Error, Result};

/// Protocol command codes
///
/// The lock-controller bus uses 16-bit big-endian command codes. Only the
/// open-door command is in use today; the remaining codes observed on the
/// bus are reserved until their payloads are documented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    /// Unlock a door on the addressed controller
    Open = 0x0111,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Open => "CMD_OPEN",
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd as u16
    }
}

impl TryFrom<u16> for Command {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0111 => Ok(Self::Open),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04x})", self.name(), *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_conversion() {
        assert_eq!(u16::from(Command::Open), 0x0111);
        assert_eq!(Command::try_from(0x0111).unwrap(), Command::Open);
    }

    #[test]
    fn test_unknown_command() {
        let result = Command::try_from(0x9999);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Open.to_string(), "CMD_OPEN(0x0111)");
    }
}
