//! # netlock
//!
//! Network-to-RS485 bridge for door-lock controllers.
//!
//! ## Features
//!
//! - Exact wire encoding of the lock-controller packet format, LRC included
//! - Single long-lived serial link shared by all inbound requests
//! - Background reconnect supervisor that survives cable and adapter loss
//! - Configurable fail-fast / fail-soft policy for commands hitting a
//!   closed link
//!
//! ## Quick Start
//!
//! ```no_run
//! use netlock::{Config, LinkManager};
//!
//! #[tokio::main]
//! async fn main() -> netlock::Result<()> {
//!     let config = Config::load("app.toml")?;
//!
//!     let mut manager = LinkManager::from_config(&config);
//!
//!     // A dead bus at startup is fatal; afterwards the supervisor
//!     // keeps the link alive on its own.
//!     manager.connect().await?;
//!     manager.start();
//!
//!     // Unlock door 1 on controller 01
//!     manager.open_door("01", 1).await?;
//!
//!     manager.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod link;

// Re-exports
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use link::{LinkManager, ReconnectPolicy};

// Re-export protocol types
pub use netlock_core::{Command, DeviceAddress, Packet};
pub use netlock_transport::{SerialTransport, Transport};
