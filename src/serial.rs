//! Serial port access through `tokio-serial`.

use std::io;
use std::string::String;
use std::vec::Vec;

use embedded_io_adapters::tokio_1::FromTokio;
use log::debug;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::monitor::Connector;
use crate::{DataBits, Parity, SerialSettings, StopBits};

/// Opens a named serial port with fixed line settings.
#[derive(Debug, Clone)]
pub struct SerialConnector {
    path: String,
    settings: SerialSettings,
}

impl SerialConnector {
    pub fn new(path: impl Into<String>, settings: SerialSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Connector for SerialConnector {
    type Stream = FromTokio<SerialStream>;

    async fn open(&mut self) -> io::Result<Self::Stream> {
        debug!("Opening {} with {:?}", self.path, self.settings);
        let port = tokio_serial::new(self.path.as_str(), self.settings.baud_rate)
            .data_bits(data_bits(self.settings.data_bits))
            .parity(parity(self.settings.parity))
            .stop_bits(stop_bits(self.settings.stop_bits))
            .open_native_async()?;
        Ok(FromTokio::new(port))
    }
}

/// Names of the serial ports currently present on the system.
pub fn available_ports() -> io::Result<Vec<String>> {
    let ports = tokio_serial::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

fn data_bits(bits: DataBits) -> tokio_serial::DataBits {
    match bits {
        DataBits::Five => tokio_serial::DataBits::Five,
        DataBits::Six => tokio_serial::DataBits::Six,
        DataBits::Seven => tokio_serial::DataBits::Seven,
        DataBits::Eight => tokio_serial::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> tokio_serial::Parity {
    match parity {
        Parity::None => tokio_serial::Parity::None,
        Parity::Odd => tokio_serial::Parity::Odd,
        Parity::Even => tokio_serial::Parity::Even,
    }
}

fn stop_bits(bits: StopBits) -> tokio_serial::StopBits {
    match bits {
        StopBits::One => tokio_serial::StopBits::One,
        StopBits::Two => tokio_serial::StopBits::Two,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_default_line_settings() {
        let settings = SerialSettings::default();
        assert_eq!(data_bits(settings.data_bits), tokio_serial::DataBits::Eight);
        assert_eq!(parity(settings.parity), tokio_serial::Parity::None);
        assert_eq!(stop_bits(settings.stop_bits), tokio_serial::StopBits::One);
    }

    #[tokio::test]
    async fn opening_missing_port_fails() {
        let mut connector =
            SerialConnector::new("/dev/sds011-does-not-exist", SerialSettings::default());
        assert_eq!(connector.path(), "/dev/sds011-does-not-exist");
        assert!(connector.open().await.is_err());
    }
}
