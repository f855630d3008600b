use thiserror::Error;

use crate::constants::FRAME_LEN;
use crate::response::StatusKind;

/// Errors returned while pulling a frame off the byte stream.
///
/// `E` is the error type of the underlying stream, passed through untouched so
/// callers can tell a dead port apart from a cancellation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<E> {
    #[error("buffer must be at least {} bytes long", FRAME_LEN)]
    BufferTooShort,
    #[error("port read returned no bytes")]
    PortReadError,
    #[error("read canceled")]
    Canceled,
    #[error("port read failed: {0:?}")]
    Io(E),
}

/// Errors returned while classifying a frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame must be at least {} bytes long", FRAME_LEN)]
    BufferTooShort,
    #[error("bad type: command 0x{command:02X}, subtype 0x{subtype:02X}")]
    BadType { command: u8, subtype: u8 },
    #[error("{0:?} reply decoding is not implemented")]
    NotImplemented(StatusKind),
}

/// Errors returned by [`Config::validate`](crate::Config::validate).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("baud rate must be greater than zero")]
    ZeroBaudRate,
    #[error("queue capacity must be greater than zero")]
    ZeroQueueCapacity,
    #[error("reconnect delay must be greater than zero")]
    ZeroReconnectDelay,
}

/// Errors returned by [`Sds011::read_response`](crate::Sds011::read_response).
///
/// Keeps stream failures apart from frames that were read but could not be
/// classified; only the former mean the stream is unusable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError<E> {
    #[error("{0}")]
    Read(ReadError<E>),
    #[error("{0}")]
    Decode(DecodeError),
}

impl<E> From<ReadError<E>> for ResponseError<E> {
    fn from(e: ReadError<E>) -> Self {
        ResponseError::Read(e)
    }
}

impl<E> From<DecodeError> for ResponseError<E> {
    fn from(e: DecodeError) -> Self {
        ResponseError::Decode(e)
    }
}
