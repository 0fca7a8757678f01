//! Open-door example: the path an HTTP handler would drive

use netlock::{Config, LinkManager};

#[tokio::main]
async fn main() -> netlock::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netlock=info".into()),
        )
        .init();

    let config_path = std::env::var("NETLOCK_CONFIG").unwrap_or_else(|_| "app.toml".to_string());
    let config = Config::load(&config_path)?;

    println!("Bridging {} at {} baud", config.serial.port, config.serial.baud_rate);

    let mut manager = LinkManager::from_config(&config);

    // A dead bus at startup is a fatal precondition
    manager.connect().await?;
    println!("✓ Link open");

    // Heal the link in the background from here on
    manager.start();

    let address = std::env::var("DEVICE_ADDRESS").unwrap_or_else(|_| "01".to_string());
    let door: u16 = std::env::var("DOOR_NUMBER")
        .ok()
        .and_then(|d| d.parse().ok())
        .unwrap_or(1);

    manager.open_door(&address, door).await?;
    println!("✓ Door {} on device {} commanded open", door, address);

    manager.shutdown().await;
    println!("✓ Shut down");

    Ok(())
}
