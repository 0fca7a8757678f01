//! Link management: connection lifecycle, send path, reconnect supervisor
//!
//! The [`LinkManager`] owns the single serial link to the lock-controller
//! bus. One long-lived instance is shared by every inbound request; the
//! foreground send path and the background reconnect supervisor both go
//! through the same `tokio::sync::Mutex`, so open/close transitions are
//! mutually exclusive and two competing opens can never step on each
//! other's port handle.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use netlock_core::{constants::DEFAULT_RECONNECT_INTERVAL, Command, DeviceAddress, Packet};
use netlock_transport::{SerialTransport, Transport};

use crate::config::Config;
use crate::error::{Error, Result};

/// What `send_command` does when the link cannot be opened
///
/// The bridge originally shipped fail-soft: a command hitting a closed link
/// was logged and dropped, and the caller saw success. Fail-fast replaced
/// it to make failures visible to the API caller; fail-soft survives as a
/// legacy mode for installations that depend on the old behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconnectPolicy {
    /// Drop the command with a warning when the link is closed
    FailSoft,

    /// Surface a connection error; the supervisor keeps healing the link
    #[default]
    FailFast,
}

/// Manager of the single serial link
///
/// # Examples
///
/// ```no_run
/// use netlock::{LinkManager, ReconnectPolicy};
/// use netlock_transport::SerialTransport;
///
/// #[tokio::main]
/// async fn main() -> netlock::Result<()> {
///     let transport = SerialTransport::new("/dev/ttyUSB0", 9600);
///     let mut manager = LinkManager::new(Box::new(transport), ReconnectPolicy::FailFast);
///
///     manager.connect().await?;
///     manager.start();
///
///     manager.open_door("01", 1).await?;
///
///     manager.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct LinkManager {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    policy: ReconnectPolicy,
    reconnect_interval: Duration,
    supervisor: Option<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
}

impl LinkManager {
    /// Create a new link manager around a transport
    pub fn new(transport: Box<dyn Transport>, policy: ReconnectPolicy) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            transport: Arc::new(Mutex::new(transport)),
            policy,
            reconnect_interval: Duration::from_secs(DEFAULT_RECONNECT_INTERVAL),
            supervisor: None,
            shutdown_tx,
        }
    }

    /// Build a manager (serial transport included) from process config
    pub fn from_config(config: &Config) -> Self {
        let transport = SerialTransport::new(&config.serial.port, config.serial.baud_rate)
            .with_read_timeout(config.serial.read_timeout());

        Self::new(Box::new(transport), config.serial.policy)
            .with_reconnect_interval(config.serial.reconnect_interval())
    }

    /// Set the interval between background reconnect checks
    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    /// Get the configured reconnect policy
    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Check if the link is currently open
    pub async fn is_connected(&self) -> bool {
        self.transport.lock().await.is_connected()
    }

    /// Open the link, propagating failure
    ///
    /// Meant for startup, where a dead bus is a fatal precondition and the
    /// process should decline to start. After startup, prefer letting the
    /// supervisor heal the link on its own schedule.
    pub async fn connect(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;

        if transport.is_connected() {
            return Ok(());
        }

        transport.connect().await?;
        info!("Opened link on {}", transport.port_name());

        Ok(())
    }

    /// Try to open the link if it is closed, logging the outcome
    ///
    /// Never fails; returns whether the link is open afterwards. This is
    /// the same attempt the supervisor makes on its schedule.
    pub async fn open_connection(&self) -> bool {
        let mut transport = self.transport.lock().await;
        open_connection(transport.as_mut()).await
    }

    /// Close the link
    pub async fn disconnect(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;

        if transport.is_connected() {
            transport.disconnect().await?;
            info!("Closed link on {}", transport.port_name());
        }

        Ok(())
    }

    /// Send an open-door command to a controller
    ///
    /// This is the operation the inbound API consumes. Success means the
    /// packet left the wire, not that the door opened; the controllers
    /// never acknowledge.
    pub async fn open_door(&self, address: &str, door: u16) -> Result<()> {
        self.send_command(Command::Open, address, door).await
    }

    /// Encode and send a command
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a malformed address or out-of-range door
    ///   number, before any I/O happens
    /// - [`Error::Connection`] (fail-fast only) when the link is closed and
    ///   one synchronous open attempt does not bring it up, or when the
    ///   write itself fails
    pub async fn send_command(&self, command: Command, address: &str, door: u16) -> Result<()> {
        let address = DeviceAddress::from_hex(address)?;
        let packet = Packet::new(command, address, door)?;

        self.send_packet(&packet).await
    }

    async fn send_packet(&self, packet: &Packet) -> Result<()> {
        let data = packet.encode();
        let mut transport = self.transport.lock().await;

        if !transport.is_connected() {
            // One synchronous open attempt before giving up
            warn!("Link not open, attempting to reopen...");

            if !open_connection(transport.as_mut()).await {
                match self.policy {
                    ReconnectPolicy::FailSoft => {
                        warn!("Link still closed, dropping {}", packet);
                        return Ok(());
                    }
                    ReconnectPolicy::FailFast => {
                        return Err(Error::Connection(netlock_transport::Error::NotConnected));
                    }
                }
            }
        }

        match transport.send(&data).await {
            Ok(()) => {
                info!(packet = %packet, hex = %packet.to_hex(), "Sent packet");
                Ok(())
            }
            Err(e) => {
                // The transport has already closed the handle; the
                // supervisor will heal it on its next check.
                error!("Send failed for {}: {}", packet, e);

                match self.policy {
                    ReconnectPolicy::FailSoft => Ok(()),
                    ReconnectPolicy::FailFast => Err(e.into()),
                }
            }
        }
    }

    /// Start the background reconnect supervisor
    ///
    /// One long-lived task checks the link every `reconnect_interval` and
    /// reopens it when closed. Idempotent; a second call is a no-op.
    pub fn start(&mut self) {
        if self.supervisor.is_some() {
            return;
        }

        let transport = Arc::clone(&self.transport);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let interval = self.reconnect_interval;

        let handle = tokio::spawn(async move {
            debug!("Reconnect supervisor started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        debug!("Reconnect supervisor stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let mut transport = transport.lock().await;
                        if !transport.is_connected() {
                            open_connection(transport.as_mut()).await;
                        }
                    }
                }
            }
        });

        self.supervisor = Some(handle);
    }

    /// Stop the supervisor and close the link
    pub async fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.supervisor.take() {
            if let Err(e) = handle.await {
                error!("Reconnect supervisor panicked: {}", e);
            }
        }

        let mut transport = self.transport.lock().await;
        if transport.is_connected() {
            if let Err(e) = transport.disconnect().await {
                warn!("Failed to close link during shutdown: {}", e);
            } else {
                info!("Closed link on {}", transport.port_name());
            }
        }
    }
}

/// Try to open the link, logging the outcome
///
/// Never propagates an error; callers only learn whether the link is now
/// open. Must be called with the transport lock held.
async fn open_connection(transport: &mut dyn Transport) -> bool {
    if transport.is_connected() {
        return true;
    }

    match transport.connect().await {
        Ok(()) => {
            info!("Successfully opened port {}", transport.port_name());
            true
        }
        Err(e) => {
            warn!("Error opening port {}: {}", transport.port_name(), e);
            false
        }
    }
}
