//! RS485 protocol packet structure and encoding

use bytes::{BufMut, BytesMut};
use std::fmt;

use crate::{
    address::DeviceAddress,
    checksum,
    command::Command,
    constants::{PACKET_LENGTH, RETURN_CODE, START_MARKER},
    error::{Error, Result},
};

/// RS485 protocol packet
///
/// # Packet Structure
///
/// ```text
/// ┌────────┬─────────┬─────────┬─────────┬─────────────┬──────────┬────────┐
/// │ Marker │ Length  │ Command │ Address │ Return code │ Argument │  LRC   │
/// │ 1 byte │ 2 bytes │ 2 bytes │ 1 byte  │   2 bytes   │  1 byte  │ 1 byte │
/// │ (0xF3) │ (BE u16)│ (BE u16)│         │  (BE u16)   │          │        │
/// └────────┴─────────┴─────────┴─────────┴─────────────┴──────────┴────────┘
/// ```
///
/// The LRC is the XOR-fold of every byte from the length field through the
/// argument, excluding the start marker. Packets are derived, disposable
/// values; nothing mutates one after construction.
///
/// # Examples
///
/// ```
/// use netlock_core::{Command, DeviceAddress, Packet};
///
/// let addr = DeviceAddress::from_hex("01").unwrap();
/// let packet = Packet::new(Command::Open, addr, 1).unwrap();
///
/// assert_eq!(packet.to_hex(), "f3000701110100000117");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    /// Command code
    pub command: Command,

    /// Target controller address
    pub address: DeviceAddress,

    /// Door number (single-byte argument field)
    pub door: u8,
}

impl Packet {
    /// Packet body size in bytes (length through argument, no marker or LRC)
    pub const BODY_SIZE: usize = 8;

    /// Create a new packet, validating the door number
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoorOutOfRange`] when the door number does not fit
    /// the single-byte argument field.
    ///
    /// # Examples
    ///
    /// ```
    /// use netlock_core::{Command, DeviceAddress, Packet};
    ///
    /// let addr = DeviceAddress::new(0x01);
    /// assert!(Packet::new(Command::Open, addr, 255).is_ok());
    /// assert!(Packet::new(Command::Open, addr, 256).is_err());
    /// ```
    pub fn new(command: Command, address: DeviceAddress, door: u16) -> Result<Self> {
        if door > crate::MAX_DOOR_NUMBER {
            return Err(Error::DoorOutOfRange { value: door });
        }

        Ok(Self {
            command,
            address,
            door: door as u8,
        })
    }

    /// Create an open-door packet
    pub fn open(address: DeviceAddress, door: u16) -> Result<Self> {
        Self::new(Command::Open, address, door)
    }

    /// Encode the packet body (length through argument)
    ///
    /// This is the byte range the LRC covers.
    fn encode_body(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::BODY_SIZE);

        // Body fields (big-endian)
        buf.put_u16(PACKET_LENGTH);
        buf.put_u16(self.command.into());
        buf.put_u8(self.address.as_byte());
        buf.put_u16(RETURN_CODE);
        buf.put_u8(self.door);

        buf
    }

    /// Calculate the LRC for this packet
    pub fn checksum(&self) -> u8 {
        checksum::lrc(&self.encode_body())
    }

    /// Encode packet to wire bytes
    ///
    /// # Returns
    ///
    /// A `BytesMut` containing the complete frame: start marker, body, LRC.
    ///
    /// # Examples
    ///
    /// ```
    /// use netlock_core::{Command, DeviceAddress, Packet, PACKET_SIZE};
    ///
    /// let packet = Packet::new(Command::Open, DeviceAddress::new(0x01), 1).unwrap();
    /// let bytes = packet.encode();
    /// assert_eq!(bytes.len(), PACKET_SIZE);
    /// assert_eq!(bytes[0], 0xF3);
    /// ```
    pub fn encode(&self) -> BytesMut {
        let body = self.encode_body();
        let lrc = checksum::lrc(&body);

        let mut buf = BytesMut::with_capacity(1 + body.len() + 1);
        buf.put_u8(START_MARKER);
        buf.put_slice(&body);
        buf.put_u8(lrc);

        buf
    }

    /// Lowercase ASCII-hex rendering of the full frame
    ///
    /// Used in logs and by callers that want the packet in the textual form
    /// the protocol documentation uses.
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        1 + Self::BODY_SIZE + 1
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("command", &self.command)
            .field("address", &self.address.to_string())
            .field("door", &self.door)
            .field("checksum", &format!("0x{:02X}", self.checksum()))
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet[{}](address={}, door={})",
            self.command, self.address, self.door
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_packet_new() {
        let packet = Packet::new(Command::Open, DeviceAddress::new(0x01), 1).unwrap();
        assert_eq!(packet.command, Command::Open);
        assert_eq!(packet.address.as_byte(), 0x01);
        assert_eq!(packet.door, 1);
    }

    #[test]
    fn test_packet_door_boundaries() {
        let addr = DeviceAddress::new(0x01);

        let zero = Packet::new(Command::Open, addr, 0).unwrap();
        assert!(zero.to_hex().ends_with(&format!("00{:02x}", zero.checksum())));

        let max = Packet::new(Command::Open, addr, 255).unwrap();
        assert!(max.to_hex().ends_with(&format!("ff{:02x}", max.checksum())));

        assert!(matches!(
            Packet::new(Command::Open, addr, 256),
            Err(Error::DoorOutOfRange { value: 256 })
        ));
    }

    #[test]
    fn test_packet_open_door_scenario() {
        // Reference frame: address 01, door 1 -> f3 0007 0111 01 0000 01 17
        let addr = DeviceAddress::from_hex("01").unwrap();
        let packet = Packet::open(addr, 1).unwrap();

        assert_eq!(packet.checksum(), 0x17);
        assert_eq!(packet.to_hex(), "f3000701110100000117");
        assert_eq!(
            packet.encode().as_ref(),
            &[0xF3, 0x00, 0x07, 0x01, 0x11, 0x01, 0x00, 0x00, 0x01, 0x17]
        );
    }

    #[test]
    fn test_packet_encode_deterministic() {
        let packet = Packet::new(Command::Open, DeviceAddress::new(0x20), 9).unwrap();
        assert_eq!(packet.encode(), packet.encode());
        assert_eq!(packet.to_hex(), packet.to_hex());
    }

    #[test]
    fn test_packet_hex_round_trip() {
        let packet = Packet::new(Command::Open, DeviceAddress::new(0xAB), 42).unwrap();
        let decoded = hex::decode(packet.to_hex()).unwrap();
        assert_eq!(decoded.as_slice(), packet.encode().as_ref());
    }

    #[test]
    fn test_packet_size() {
        let packet = Packet::new(Command::Open, DeviceAddress::new(0x01), 1).unwrap();
        assert_eq!(packet.size(), crate::PACKET_SIZE);
        assert_eq!(packet.encode().len(), crate::PACKET_SIZE);
    }

    proptest! {
        #[test]
        fn prop_checksum_matches_trailing_byte(address in 0u8..=255, door in 0u16..=255) {
            let packet = Packet::new(Command::Open, DeviceAddress::new(address), door).unwrap();
            let encoded = packet.encode();

            // LRC covers everything between the marker and itself
            let body = &encoded[1..encoded.len() - 1];
            prop_assert_eq!(checksum::lrc(body), *encoded.last().unwrap());
        }

        #[test]
        fn prop_encode_is_pure(address in 0u8..=255, door in 0u16..=255) {
            let packet = Packet::new(Command::Open, DeviceAddress::new(address), door).unwrap();
            prop_assert_eq!(packet.encode(), packet.encode());
        }

        #[test]
        fn prop_frame_layout(address in 0u8..=255, door in 0u16..=255) {
            let packet = Packet::new(Command::Open, DeviceAddress::new(address), door).unwrap();
            let encoded = packet.encode();

            prop_assert_eq!(encoded.len(), crate::PACKET_SIZE);
            prop_assert_eq!(encoded[0], START_MARKER);
            prop_assert_eq!(&encoded[1..3], &[0x00, 0x07][..]);
            prop_assert_eq!(encoded[5], address);
            prop_assert_eq!(encoded[8], door as u8);
        }

        #[test]
        fn prop_door_out_of_range(door in 256u16..) {
            let result = Packet::new(Command::Open, DeviceAddress::new(0x01), door);
            let out_of_range = matches!(result, Err(Error::DoorOutOfRange { .. }));
            prop_assert!(out_of_range, "door {} was not rejected", door);
        }
    }
}
