//! Typed replies decoded from validated-shape frames.

use crate::constants::*;
use crate::error::DecodeError;
use crate::frame::Frame;

/// Represents the unique identifier of the SDS011 sensor.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct DeviceID {
    /// The first byte of the device ID.
    pub id1: u8,
    /// The second byte of the device ID.
    pub id2: u8,
}

impl Default for DeviceID {
    /// Returns the broadcast device id.
    fn default() -> DeviceID {
        DeviceID {
            id1: 0xff,
            id2: 0xff,
        }
    }
}

/// Status reply subtypes carried by `0xC5` frames.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum StatusKind {
    ReportingMode,
    DeviceId,
    WorkingMode,
    FirmwareVersion,
    WorkingPeriod,
}

impl StatusKind {
    /// Maps a subtype byte onto a known status reply.
    pub fn from_subtype(subtype: u8) -> Option<Self> {
        match subtype {
            REPORTING_MODE_REPLY => Some(StatusKind::ReportingMode),
            DEVICE_ID_REPLY => Some(StatusKind::DeviceId),
            WORKING_MODE_REPLY => Some(StatusKind::WorkingMode),
            FIRMWARE_VERSION_REPLY => Some(StatusKind::FirmwareVersion),
            WORKING_PERIOD_REPLY => Some(StatusKind::WorkingPeriod),
            _ => None,
        }
    }
}

/// Represents a single data sample read from the SDS011 sensor.
///
/// Contains PM2.5 and PM10 particulate matter concentration values. The sensor
/// reports counts of 0.1 µg/m³, so both values carry one decimal digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sds011Data {
    /// PM2.5 concentration in µg/m³.
    pub pm2_5: f32,
    /// PM10 concentration in µg/m³.
    pub pm10: f32,
}

/// A `0xC0` data report.
///
/// Frame: AA C0 PM25_L PM25_H PM10_L PM10_H ID1 ID2 CS AB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataResponse(Frame);

impl DataResponse {
    pub fn frame(&self) -> &Frame {
        &self.0
    }

    /// PM2.5 concentration in µg/m³.
    ///
    /// Bytes 2 and 3 are read as a little-endian count of 0.1 µg/m³. This scale
    /// has not been confirmed against the device datasheet; reading the same
    /// bytes as whole µg/m³ would give a value ten times larger.
    pub fn pm2_5(&self) -> f32 {
        tenths(self.0.as_bytes()[2], self.0.as_bytes()[3])
    }

    /// PM10 concentration in µg/m³.
    ///
    /// Bytes 4 and 5, with the same 0.1 µg/m³ scale as [`DataResponse::pm2_5`].
    pub fn pm10(&self) -> f32 {
        tenths(self.0.as_bytes()[4], self.0.as_bytes()[5])
    }

    /// The identifier of the device that sent the report.
    pub fn device_id(&self) -> DeviceID {
        DeviceID {
            id1: self.0.as_bytes()[6],
            id2: self.0.as_bytes()[7],
        }
    }

    /// Like [`Frame::is_valid`], but only accepts the data report command ID.
    pub fn is_valid(&self) -> bool {
        self.0.command_id() == DATA_REPORT_ID && self.0.is_valid()
    }

    pub fn sample(&self) -> Sds011Data {
        Sds011Data {
            pm2_5: self.pm2_5(),
            pm10: self.pm10(),
        }
    }
}

/// A `0xC5` reply to a reporting mode command. Its fields are not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingModeResponse(Frame);

impl ReportingModeResponse {
    pub fn frame(&self) -> &Frame {
        &self.0
    }
}

/// A reply from the sensor, classified by command ID and status subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Data(DataResponse),
    ReportingMode(ReportingModeResponse),
}

impl Response {
    /// Classifies the first ten bytes of `bytes`.
    ///
    /// Decoding only looks at the command ID and status subtype. The checksum
    /// and sentinels are left to [`Response::is_valid`] so callers can still
    /// inspect a corrupt frame before dropping it.
    pub fn decode(bytes: &[u8]) -> Result<Response, DecodeError> {
        let frame = Frame::from_slice(bytes).ok_or(DecodeError::BufferTooShort)?;
        let subtype = frame.payload()[0];

        match frame.command_id() {
            DATA_REPORT_ID => Ok(Response::Data(DataResponse(frame))),
            REPLY_ID => match StatusKind::from_subtype(subtype) {
                Some(StatusKind::ReportingMode) => {
                    Ok(Response::ReportingMode(ReportingModeResponse(frame)))
                }
                Some(kind) => Err(DecodeError::NotImplemented(kind)),
                None => Err(DecodeError::BadType {
                    command: REPLY_ID,
                    subtype,
                }),
            },
            command => Err(DecodeError::BadType { command, subtype }),
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Response::Data(data) => data.frame(),
            Response::ReportingMode(reply) => reply.frame(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Response::Data(data) => data.is_valid(),
            Response::ReportingMode(reply) => reply.frame().is_valid(),
        }
    }
}

// Converts a little-endian count of 0.1 µg/m³ into µg/m³.
fn tenths(lo: u8, hi: u8) -> f32 {
    f32::from(u16::from_le_bytes([lo, hi])) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::tests::DATA_FRAME;
    use crate::frame::checksum;

    fn status_frame(subtype: u8) -> [u8; 10] {
        let mut raw = [0xAA, 0xC5, subtype, 0x01, 0x00, 0x00, 0xA1, 0x60, 0x00, 0xAB];
        raw[8] = checksum(&raw[2..8]);
        raw
    }

    #[test]
    fn decodes_captured_data_frame() {
        let response = Response::decode(&DATA_FRAME).unwrap();
        let Response::Data(data) = response else {
            panic!("expected a data response, got {response:?}");
        };
        assert!(data.frame().checksum_valid());
        assert!(data.is_valid());
        assert_eq!(data.pm2_5(), 123.6);
        assert_eq!(data.pm10(), 261.8);
        assert_eq!(data.device_id(), DeviceID { id1: 0xA1, id2: 0x60 });
        assert_ne!(data.device_id(), DeviceID::default());
        assert_eq!(
            data.sample(),
            Sds011Data {
                pm2_5: 123.6,
                pm10: 261.8
            }
        );
    }

    #[test]
    fn decodes_fixed_point_tenths() {
        assert_eq!(tenths(0x68, 0x00), 10.4);
        assert_eq!(tenths(0x00, 0x00), 0.0);
        assert_eq!(tenths(0xFF, 0xFF), 6553.5);
    }

    #[test]
    fn decode_does_not_check_integrity() {
        let mut raw = DATA_FRAME;
        raw[8] = 0x00;
        let response = Response::decode(&raw).unwrap();
        assert!(matches!(response, Response::Data(_)));
        assert!(!response.is_valid());
        assert!(!response.frame().checksum_valid());
    }

    #[test]
    fn data_validity_pins_command_id() {
        let raw = status_frame(REPORTING_MODE_REPLY);
        let frame = Frame::new(raw);
        assert!(frame.is_valid());
        assert!(!DataResponse(frame).is_valid());
    }

    #[test]
    fn reporting_mode_reply_decodes() {
        let raw = status_frame(REPORTING_MODE_REPLY);
        let response = Response::decode(&raw).unwrap();
        assert!(matches!(response, Response::ReportingMode(_)));
        assert!(response.is_valid());
        assert_eq!(response.frame().as_bytes(), &raw);
    }

    #[test]
    fn other_status_replies_are_not_implemented() {
        let cases = [
            (DEVICE_ID_REPLY, StatusKind::DeviceId),
            (WORKING_MODE_REPLY, StatusKind::WorkingMode),
            (FIRMWARE_VERSION_REPLY, StatusKind::FirmwareVersion),
            (WORKING_PERIOD_REPLY, StatusKind::WorkingPeriod),
        ];
        for (subtype, kind) in cases {
            assert_eq!(
                Response::decode(&status_frame(subtype)),
                Err(DecodeError::NotImplemented(kind))
            );
        }
    }

    #[test]
    fn unknown_command_and_subtype_are_bad_types() {
        let mut raw = DATA_FRAME;
        raw[1] = 0xB4;
        assert_eq!(
            Response::decode(&raw),
            Err(DecodeError::BadType {
                command: 0xB4,
                subtype: 0xD4
            })
        );
        assert_eq!(
            Response::decode(&status_frame(0x04)),
            Err(DecodeError::BadType {
                command: REPLY_ID,
                subtype: 0x04
            })
        );
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(
            Response::decode(&DATA_FRAME[..9]),
            Err(DecodeError::BufferTooShort)
        );
    }
}
