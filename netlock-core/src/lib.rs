//! # netlock-core
//!
//! Core RS485 protocol implementation for door-lock controllers.
//!
//! This crate provides the low-level protocol primitives:
//! - Packet structure and encoding
//! - LRC checksum calculation
//! - Command definitions
//! - Address and door-number validation

pub mod address;
pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod packet;

pub use address::DeviceAddress;
pub use command::Command;
pub use error::{Error, Result};
pub use packet::Packet;

/// Protocol version information
pub const PROTOCOL_VERSION: &str = "1.0";

/// Full frame size in bytes (marker + body + LRC)
pub const PACKET_SIZE: usize = 10;

/// Highest addressable door number
pub const MAX_DOOR_NUMBER: u16 = 255;
