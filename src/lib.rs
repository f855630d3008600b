//! Reader for the Nova SDS011 particulate matter sensor.
//!
//! The sensor streams ten byte frames over its UART with no out-of-band
//! framing. [`read_frame`] finds frame boundaries in that stream,
//! [`Response::decode`] classifies a frame, and [`Sds011::read_sample`] ties
//! the two together into PM2.5 / PM10 readings, skipping corrupt and
//! unsupported frames.
//!
//! With the `std` feature, [`monitor::Monitor`] runs the reader as a worker
//! that reopens the port after failures and forwards samples over a bounded
//! channel.
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

use embedded_io_async::Read;
use log::{debug, warn};

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod frame;
pub use frame::*;

mod response;
pub use response::*;

mod cancel;
pub use cancel::*;

mod reader;
pub use reader::read_frame;

#[cfg(feature = "std")]
pub mod monitor;

#[cfg(feature = "std")]
pub mod serial;

#[cfg(test)]
mod testing;

/// Represents an SDS011 air quality sensor.
///
/// Owns the serial stream for its whole lifetime. Nothing is carried over
/// between frames, so a fresh `Sds011` on a reopened stream starts synchronizing
/// from scratch.
///
/// # Type Parameters
///
/// * `Serial`: The serial interface the sensor is attached to.
///   It must implement `embedded_io_async::Read`.
pub struct Sds011<Serial> {
    serial: Serial,
    buffer: [u8; FRAME_LEN],
}

impl<S> Sds011<S>
where
    S: Read,
{
    /// Creates a new `Sds011` sensor instance.
    pub fn new(serial: S) -> Self {
        Self {
            serial,
            buffer: [0u8; FRAME_LEN],
        }
    }

    /// Releases the serial stream.
    pub fn into_inner(self) -> S {
        self.serial
    }

    /// Reads the next synchronized frame, valid or not.
    pub async fn read_frame<C>(&mut self, cancel: &C) -> Result<Frame, ReadError<S::Error>>
    where
        C: Cancellation,
    {
        read_frame(&mut self.serial, &mut self.buffer, cancel).await?;
        Ok(Frame::new(self.buffer))
    }

    /// Reads the next frame and classifies it.
    ///
    /// The frame is not checked for integrity; call [`Response::is_valid`]
    /// before trusting its content.
    ///
    /// # Returns
    ///
    /// * `Ok(Response)` for a data report or reporting mode reply.
    /// * `Err(ResponseError::Decode)` for a frame that was read but cannot be
    ///   classified. The stream is still usable.
    /// * `Err(ResponseError::Read)` if the stream failed or `cancel` fired.
    pub async fn read_response<C>(&mut self, cancel: &C) -> Result<Response, ResponseError<S::Error>>
    where
        C: Cancellation,
    {
        let frame = self.read_frame(cancel).await?;
        Response::decode(frame.as_bytes()).map_err(|e| {
            debug!("Cannot decode frame {:02X?}: {}", frame.as_bytes(), e);
            ResponseError::Decode(e)
        })
    }

    /// Reads frames until a valid data report arrives.
    ///
    /// Corrupt, unsupported and status frames are logged and dropped; the
    /// sensor never retransmits, so reading simply carries on with the next
    /// head byte.
    ///
    /// Returns an `Sds011Data` struct containing PM2.5 and PM10 values, or the
    /// `ReadError` that stopped the stream.
    pub async fn read_sample<C>(&mut self, cancel: &C) -> Result<Sds011Data, ReadError<S::Error>>
    where
        C: Cancellation,
    {
        loop {
            match self.read_response(cancel).await {
                Ok(Response::Data(data)) if data.is_valid() => {
                    let sample = data.sample();
                    debug!("Processed frame - PM2.5: {}, PM10: {}", sample.pm2_5, sample.pm10);
                    return Ok(sample);
                }
                Ok(Response::Data(data)) => {
                    let frame = data.frame();
                    warn!(
                        "Dropping corrupt frame: calculated checksum {:02X}, received {:02X}. Frame: {:02X?}",
                        frame.calculate_checksum(),
                        frame.checksum(),
                        frame.as_bytes()
                    );
                }
                Ok(Response::ReportingMode(reply)) => {
                    debug!("Ignoring reporting mode reply: {:02X?}", reply.frame().as_bytes());
                }
                Err(ResponseError::Decode(e)) => warn!("Skipping frame: {}", e),
                Err(ResponseError::Read(e)) => return Err(e),
            }
        }
    }
}
