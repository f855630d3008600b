//! Frame synchronization over an unframed byte stream.

use embassy_futures::select::{select, Either};
use embedded_io_async::Read;
use log::debug;

use crate::cancel::Cancellation;
use crate::constants::{is_response_id, FRAME_LEN, HEAD};
use crate::error::ReadError;

/// Reads one synchronized ten byte frame from `serial` into `buf`.
///
/// Bytes are consumed one at a time until a head byte is seen. The byte after
/// it must be a reply command ID; otherwise both bytes are dropped and the head
/// search starts over. The remaining eight bytes are then read in as many
/// reads as the stream needs.
///
/// The frame is only located, not validated: checksum and tail are left to
/// [`Frame::is_valid`](crate::Frame::is_valid).
///
/// # Returns
///
/// * `Ok(10)` once a frame has been copied into `buf[..10]`.
/// * `Err(ReadError::BufferTooShort)` if `buf` is shorter than ten bytes. No
///   byte is read in that case.
/// * `Err(ReadError::PortReadError)` if the stream returned zero bytes.
/// * `Err(ReadError::Canceled)` if `cancel` fired during a read.
/// * `Err(ReadError::Io)` with the stream's own error.
///
/// After an error the content of `buf` is unspecified.
pub async fn read_frame<S, C>(
    serial: &mut S,
    buf: &mut [u8],
    cancel: &C,
) -> Result<usize, ReadError<S::Error>>
where
    S: Read + ?Sized,
    C: Cancellation,
{
    if buf.len() < FRAME_LEN {
        return Err(ReadError::BufferTooShort);
    }

    let mut skipped = 0usize;
    let mut byte = [0u8; 1];
    loop {
        loop {
            read_some(serial, &mut byte, cancel).await?;
            if byte[0] == HEAD {
                break;
            }
            skipped += 1;
        }
        buf[0] = HEAD;

        read_some(serial, &mut byte, cancel).await?;
        if is_response_id(byte[0]) {
            buf[1] = byte[0];
            break;
        }
        // The second byte is not reconsidered as a head.
        debug!("Discarding head followed by {:02X}, resyncing", byte[0]);
        skipped += 2;
    }
    if skipped > 0 {
        debug!("Skipped {} bytes before frame head", skipped);
    }

    let mut filled = 2;
    while filled < FRAME_LEN {
        match read_some(serial, &mut buf[filled..FRAME_LEN], cancel).await {
            Ok(n) => filled += n,
            Err(e) => {
                debug!("Frame read aborted after {} of {} bytes", filled, FRAME_LEN);
                return Err(e);
            }
        }
    }

    debug!("Read frame: {:02X?}", &buf[..FRAME_LEN]);
    Ok(filled)
}

// One read racing the cancellation signal. Cancellation wins when both are ready.
async fn read_some<S, C>(
    serial: &mut S,
    buf: &mut [u8],
    cancel: &C,
) -> Result<usize, ReadError<S::Error>>
where
    S: Read + ?Sized,
    C: Cancellation,
{
    match select(cancel.cancelled(), serial.read(buf)).await {
        Either::First(()) => Err(ReadError::Canceled),
        Either::Second(Ok(0)) => Err(ReadError::PortReadError),
        Either::Second(Ok(n)) => Ok(n),
        Either::Second(Err(e)) => Err(ReadError::Io(e)),
    }
}
