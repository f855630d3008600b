//! Logs PM2.5 and PM10 readings from an SDS011 attached to a serial port.

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use sds011_monitor::monitor::Monitor;
use sds011_monitor::serial::{self, SerialConnector};
use sds011_monitor::Config;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const SCAN_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Serial port name
    #[arg(long = "serport", default_value = "/dev/ttyUSB0")]
    port: String,

    /// Scan for serial ports instead of monitoring
    #[arg(long)]
    scan: bool,

    /// Baud rate of the serial line
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Seconds to wait before reopening the port after a failure
    #[arg(long, default_value_t = 5)]
    reconnect_delay: u64,

    /// Number of samples buffered between reader and logger
    #[arg(long, default_value_t = 10)]
    queue_capacity: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cancel = CancellationToken::new();

    let task = if args.scan {
        info!("searching for serial ports...");
        tokio::spawn(scan_ports(cancel.clone()))
    } else {
        let config = Config::default()
            .baud_rate(args.baud)
            .reconnect_delay(Duration::from_secs(args.reconnect_delay))
            .queue_capacity(args.queue_capacity);
        let connector = SerialConnector::new(args.port, config.serial);
        info!("monitoring {}", connector.path());
        let (monitor, mut samples) = Monitor::new(connector, config)?;

        let worker = tokio::spawn(monitor.run(cancel.clone()));
        tokio::spawn(async move {
            while let Some(sample) = samples.recv().await {
                info!("PM25: {:4.1}, PM10: {:4.1}", sample.pm2_5, sample.pm10);
            }
            if let Err(e) = worker.await {
                error!("monitor task failed: {}", e);
            }
        })
    };

    tokio::signal::ctrl_c().await?;
    info!("signal caught: interrupt");
    cancel.cancel();
    task.await?;
    Ok(())
}

async fn scan_ports(cancel: CancellationToken) {
    loop {
        match serial::available_ports() {
            Ok(ports) => {
                for port in ports {
                    info!("port found: {}", port);
                }
            }
            Err(e) => error!("error listing ports: {}", e),
        }
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(SCAN_INTERVAL) => {}
        }
    }
}
