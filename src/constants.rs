// HEAD is the byte that marks the beginning of any frame (command or data).
pub const HEAD: u8 = 0xAA;

// TAIL is the byte that marks the end of any frame (command or data).
pub const TAIL: u8 = 0xAB;

// COMMAND_ID is the byte that identifies a command frame sent to the sensor.
pub const COMMAND_ID: u8 = 0xB4;

// DATA_REPORT_ID is the byte that identifies a data report frame received from the sensor.
pub const DATA_REPORT_ID: u8 = 0xC0;

// REPLY_ID is the byte that identifies a status reply frame received from the sensor.
pub const REPLY_ID: u8 = 0xC5;

// FRAME_LEN is the length of every frame received from the sensor.
pub const FRAME_LEN: usize = 10;

// REQUEST_LEN is the length of every command frame sent to the sensor.
pub const REQUEST_LEN: usize = 19;

// Status reply subtypes, found in the first payload byte of a REPLY_ID frame.
pub const REPORTING_MODE_REPLY: u8 = 0x02;
pub const DEVICE_ID_REPLY: u8 = 0x05;
pub const WORKING_MODE_REPLY: u8 = 0x06;
pub const FIRMWARE_VERSION_REPLY: u8 = 0x07;
pub const WORKING_PERIOD_REPLY: u8 = 0x08;

/// Returns true if `id` is a command ID the sensor uses for replies.
pub const fn is_response_id(id: u8) -> bool {
    id == DATA_REPORT_ID || id == REPLY_ID
}
