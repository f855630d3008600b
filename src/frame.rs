//! Raw wire frames.
//!
//! Every reply from the sensor is ten bytes long:
//!
//! ```text
//! offset: 0    1      2..=7    8         9
//! value:  0xAA cmdID  payload  checksum  0xAB
//! ```
//!
//! The checksum is the sum of the six payload bytes, modulo 256. Command frames
//! sent to the sensor use the same head, tail and checksum scheme over a
//! nineteen byte layout.

use crate::constants::{is_response_id, FRAME_LEN, HEAD, REQUEST_LEN, TAIL};

/// Sums `bytes` modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// A ten byte reply frame, copied verbatim off the wire.
///
/// Holding a `Frame` says nothing about its integrity: use [`Frame::is_valid`]
/// or [`Frame::checksum_valid`] before trusting its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Wraps raw frame bytes.
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }

    /// Copies the first ten bytes of `bytes`, or returns `None` if it is too short.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; FRAME_LEN] = bytes.get(..FRAME_LEN)?.try_into().ok()?;
        Some(Frame(raw))
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn command_id(&self) -> u8 {
        self.0[1]
    }

    /// The six payload bytes between the command ID and the checksum.
    pub fn payload(&self) -> &[u8] {
        &self.0[2..FRAME_LEN - 2]
    }

    /// The checksum byte carried by the frame.
    pub fn checksum(&self) -> u8 {
        self.0[FRAME_LEN - 2]
    }

    /// The checksum computed from the payload.
    pub fn calculate_checksum(&self) -> u8 {
        checksum(self.payload())
    }

    pub fn checksum_valid(&self) -> bool {
        self.checksum() == self.calculate_checksum()
    }

    /// Checks head, command ID, tail and checksum.
    pub fn is_valid(&self) -> bool {
        self.0[0] == HEAD
            && self.0[FRAME_LEN - 1] == TAIL
            && is_response_id(self.command_id())
            && self.checksum_valid()
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }
}

/// A nineteen byte command frame as sent to the sensor.
///
/// Only the wire layout is modelled; nothing in this crate sends commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request([u8; REQUEST_LEN]);

impl Request {
    pub const fn new(bytes: [u8; REQUEST_LEN]) -> Self {
        Request(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; REQUEST_LEN] {
        &self.0
    }

    /// The checksum byte carried by the request.
    pub fn checksum(&self) -> u8 {
        self.0[REQUEST_LEN - 2]
    }

    /// The checksum computed over bytes 2..=16.
    pub fn calculate_checksum(&self) -> u8 {
        checksum(&self.0[2..REQUEST_LEN - 2])
    }
}
