//! Transport layer for the lock-controller bus
//!
//! Provides the write-only serial link to the RS485 controllers.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::SerialTransport;

use async_trait::async_trait;

/// Transport trait for the outbound link
///
/// The protocol is fire-and-forget: controllers never answer, so the trait
/// has no receive side. A transport is Open while `is_connected` returns
/// true and transitions to Closed on any send failure.
#[async_trait]
pub trait Transport: Send {
    /// Open the link
    async fn connect(&mut self) -> Result<()>;

    /// Close the link
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if the link is open
    fn is_connected(&self) -> bool;

    /// Send raw bytes, writing the full buffer exactly once
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Get the port identifier for logging
    fn port_name(&self) -> String;
}
