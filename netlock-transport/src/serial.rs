//! Serial transport for the RS485 bus
//!
//! The lock controllers hang off a shared RS485 line behind a USB adapter,
//! so the link is a plain serial port: 8 data bits, no parity, one stop
//! bit, no flow control.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Default read timeout for the serial port
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial transport over an RS485 adapter
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    read_timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Create new serial transport
    ///
    /// # Arguments
    /// * `path` - Serial port path (e.g., "/dev/ttyUSB0")
    /// * `baud_rate` - Baud rate (e.g., 9600)
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            read_timeout: DEFAULT_READ_TIMEOUT,
            port: None,
        }
    }

    /// Set read timeout
    ///
    /// Must be non-zero; a zero timeout would let a wedged adapter hold the
    /// caller forever and is rejected at connect time.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        if self.read_timeout.is_zero() {
            return Err(Error::ZeroTimeout);
        }

        debug!("Opening serial port {} at {} baud...", self.path, self.baud_rate);

        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.read_timeout)
            .open()?;

        debug!("Opened serial port {}", self.path);

        self.port = Some(port);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(port) = self.port.take() {
            debug!("Closing serial port {}...", self.path);
            drop(port);
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {:02X?}", data.len(), data);

        let result = port.write_all(data).and_then(|()| port.flush());

        if let Err(e) = result {
            // A failed write means the adapter or cable is gone; the link
            // is Closed until the next successful connect.
            warn!("Write failed on {}, closing port: {}", self.path, e);
            self.port = None;
            return Err(e.into());
        }

        Ok(())
    }

    fn port_name(&self) -> String {
        self.path.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("Serial transport dropped while still connected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serial_transport_create() {
        let transport = SerialTransport::new("/dev/ttyUSB0", 9600);
        assert!(!transport.is_connected());
        assert_eq!(transport.port_name(), "/dev/ttyUSB0");
    }

    #[tokio::test]
    async fn test_serial_transport_missing_port() {
        let mut transport = SerialTransport::new("/dev/nonexistent-rs485", 9600);

        let result = transport.connect().await;
        assert!(result.is_err());
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_serial_transport_zero_timeout_rejected() {
        let mut transport =
            SerialTransport::new("/dev/ttyUSB0", 9600).with_read_timeout(Duration::ZERO);

        let result = transport.connect().await;
        assert!(matches!(result, Err(Error::ZeroTimeout)));
    }

    #[tokio::test]
    async fn test_serial_transport_send_when_closed() {
        let mut transport = SerialTransport::new("/dev/ttyUSB0", 9600);

        let result = transport.send(&[0xF3]).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_serial_transport_disconnect_idempotent() {
        let mut transport = SerialTransport::new("/dev/ttyUSB0", 9600);

        transport.disconnect().await.unwrap();
        transport.disconnect().await.unwrap();
        assert!(!transport.is_connected());
    }

    // Note: round-trip tests require a real adapter on the bus
    // #[tokio::test]
    // async fn test_serial_transport_send() {
    //     let mut transport = SerialTransport::new("/dev/ttyUSB0", 9600);
    //     transport.connect().await.unwrap();
    //     transport.send(&[0xF3, 0x00]).await.unwrap();
    //     transport.disconnect().await.unwrap();
    // }
}
