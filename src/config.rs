use core::time::Duration;

use crate::error::ConfigError;

/// Number of data bits per character on the serial line.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity checking mode of the serial line.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Number of stop bits on the serial line.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum StopBits {
    One,
    Two,
}

/// Line settings used when opening the serial port.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct SerialSettings {
    /// Baud rate of the line. The SDS011 talks at 9600.
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for SerialSettings {
    /// Returns the 9600 8N1 settings the sensor ships with.
    fn default() -> SerialSettings {
        SerialSettings {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Configuration settings for reading the SDS011 sensor.
///
/// A `Config` is assembled up front and never mutated once a reader is running.
/// Call [`Config::validate`] before handing it over; the monitor does so when
/// it is spawned.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// Serial line settings.
    pub serial: SerialSettings,
    /// Delay between a stream failure and the next attempt to open the port.
    pub reconnect_delay: Duration,
    /// Number of decoded samples buffered between the reader and its consumer.
    pub queue_capacity: usize,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `serial` - The `SerialSettings` for the port.
    /// * `reconnect_delay` - How long to wait before reopening a failed port.
    /// * `queue_capacity` - Size of the sample queue.
    pub fn new(serial: SerialSettings, reconnect_delay: Duration, queue_capacity: usize) -> Config {
        Config {
            serial,
            reconnect_delay,
            queue_capacity,
        }
    }

    /// Sets the serial line settings for the configuration.
    pub fn serial(mut self, serial: SerialSettings) -> Self {
        self.serial = serial;
        self
    }

    /// Sets the baud rate, keeping the other line settings.
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.serial.baud_rate = baud_rate;
        self
    }

    /// Sets the delay before reopening the port after a failure.
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Sets the capacity of the sample queue.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Checks that the configuration can be used to open a reader.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every setting is usable.
    /// * `Err(ConfigError)` naming the first unusable setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.reconnect_delay.is_zero() {
            return Err(ConfigError::ZeroReconnectDelay);
        }
        Ok(())
    }
}

/// Provides default configuration values for the SDS011 sensor.
impl Default for Config {
    /// Returns the default configuration.
    ///
    /// 9600 8N1, a five second reconnect delay and room for ten queued samples.
    fn default() -> Config {
        Config {
            serial: SerialSettings::default(),
            reconnect_delay: Duration::from_secs(5),
            queue_capacity: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.data_bits, DataBits::Eight);
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
    }

    #[test]
    fn setters_do_not_touch_other_fields() {
        let config = Config::default()
            .baud_rate(19200)
            .queue_capacity(3);
        assert_eq!(config.serial.baud_rate, 19200);
        assert_eq!(config.serial.parity, Parity::None);
        assert_eq!(config.queue_capacity, 3);
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
    }

    #[test]
    fn rejects_unusable_settings() {
        assert_eq!(
            Config::default().baud_rate(0).validate(),
            Err(ConfigError::ZeroBaudRate)
        );
        assert_eq!(
            Config::default().queue_capacity(0).validate(),
            Err(ConfigError::ZeroQueueCapacity)
        );
        assert_eq!(
            Config::default().reconnect_delay(Duration::ZERO).validate(),
            Err(ConfigError::ZeroReconnectDelay)
        );
    }
}
