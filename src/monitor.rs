//! Long-running sample reader with reconnects.
//!
//! A [`Monitor`] owns a [`Connector`] and the sending half of a bounded
//! channel. Its [`run`](Monitor::run) loop opens a stream, forwards every
//! valid sample, and on any stream failure drops the stream, waits
//! [`Config::reconnect_delay`] and opens a new one. Cancelling the token stops
//! the loop; the channel closes when the monitor is dropped.

use std::fmt::Debug;
use std::future::Future;
use std::io;

use embedded_io_async::{ErrorType, Read};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{Config, ConfigError, ReadError, Sds011, Sds011Data};

/// Opens the byte stream the sensor is attached to.
pub trait Connector {
    type Stream: Read;

    fn open(&mut self) -> impl Future<Output = io::Result<Self::Stream>>;
}

// Why a stream stopped being read.
enum Exit {
    Canceled,
    Closed,
    Failed,
}

/// Worker forwarding decoded samples to a bounded channel.
pub struct Monitor<C> {
    connector: C,
    config: Config,
    samples: mpsc::Sender<Sds011Data>,
}

impl<C> Monitor<C>
where
    C: Connector,
    <C::Stream as ErrorType>::Error: Debug,
{
    /// Validates `config` and creates a monitor along with the receiving end of
    /// its sample queue.
    pub fn new(
        connector: C,
        config: Config,
    ) -> Result<(Self, mpsc::Receiver<Sds011Data>), ConfigError> {
        config.validate()?;
        let (samples, receiver) = mpsc::channel(config.queue_capacity);
        let monitor = Monitor {
            connector,
            config,
            samples,
        };
        Ok((monitor, receiver))
    }

    /// Reads the sensor until `cancel` fires or the receiver is dropped.
    ///
    /// Meant to be spawned as its own task. Stream and open failures are
    /// logged and retried after the reconnect delay; they never end the loop.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            let Some(stream) = self.open(&cancel).await else {
                return;
            };

            let mut sensor = Sds011::new(stream);
            match self.forward(&mut sensor, &cancel).await {
                Exit::Canceled => return,
                Exit::Closed => {
                    debug!("Sample receiver dropped, stopping monitor");
                    return;
                }
                Exit::Failed => {}
            }
            drop(sensor);

            if !self.backoff(&cancel).await {
                return;
            }
        }
    }

    // Opens the stream, retrying after the reconnect delay. `None` once canceled.
    async fn open(&mut self, cancel: &CancellationToken) -> Option<C::Stream> {
        loop {
            let opened = tokio::select! {
                biased;
                _ = cancel.cancelled() => return None,
                opened = self.connector.open() => opened,
            };
            match opened {
                Ok(stream) => {
                    info!("Port opened");
                    return Some(stream);
                }
                Err(e) => error!(
                    "Failed to open port: {}, retrying in {:?}",
                    e, self.config.reconnect_delay
                ),
            }
            if !self.backoff(cancel).await {
                return None;
            }
        }
    }

    async fn forward(
        &mut self,
        sensor: &mut Sds011<C::Stream>,
        cancel: &CancellationToken,
    ) -> Exit {
        loop {
            let sample = match sensor.read_sample(cancel).await {
                Ok(sample) => sample,
                Err(ReadError::Canceled) => return Exit::Canceled,
                Err(e) => {
                    warn!(
                        "Error reading frame: {}, reopening port in {:?}",
                        e, self.config.reconnect_delay
                    );
                    return Exit::Failed;
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Exit::Canceled,
                sent = self.samples.send(sample) => {
                    if sent.is_err() {
                        return Exit::Closed;
                    }
                }
            }
        }
    }

    // Waits out the reconnect delay. `false` if canceled meanwhile.
    async fn backoff(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.config.reconnect_delay) => true,
        }
    }
}
