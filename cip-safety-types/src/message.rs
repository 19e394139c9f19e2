//! Data-message formats: the four wire shapes a safety I/O connection can
//! carry its payload in.

use crate::mode::ModeByte;

/// Which of the four data-message wire formats a connection uses.
///
/// Replaces the format-selection preprocessor axis of the original
/// reference implementation with a plain runtime tag, dispatched on by the
/// codec entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMessageFormat {
    /// Base Format, Short (1-2 byte payload).
    BaseShort,
    /// Base Format, Long (3-250 byte payload, carried twice).
    BaseLong,
    /// Extended Format, Short (1-2 byte payload).
    ExtendedShort,
    /// Extended Format, Long (3-250 byte payload, carried twice).
    ExtendedLong,
}

impl DataMessageFormat {
    /// True for the two Long formats, which carry Actual and Complement
    /// data plus a dedicated Actual-vs-Complement agreement check.
    pub fn is_long(self) -> bool {
        matches!(self, Self::BaseLong | Self::ExtendedLong)
    }

    /// True for the two Base formats, which carry a TimeStamp/TimeStamp CRC
    /// pair that the Extended formats fold into their Mode Byte instead.
    pub fn is_base(self) -> bool {
        matches!(self, Self::BaseShort | Self::BaseLong)
    }

    /// The inclusive `(min, max)` Actual Data payload length this format
    /// allows: `(1, 2)` for Short, `(3, 250)` for Long.
    pub fn payload_range(self) -> (u8, u8) {
        if self.is_long() {
            (3, 250)
        } else {
            (1, 2)
        }
    }
}

/// A decoded data message, valid for any of the four wire formats.
///
/// `payload` holds only the Actual data; Complement data (for Long formats)
/// is derived on demand rather than stored, since it is always the
/// bitwise-NOT of `payload` once a message has passed integrity checks.
#[derive(Debug, Clone, Copy)]
pub struct DataMessage<'a> {
    /// The wire format this message was built for / decoded from.
    pub format: DataMessageFormat,
    /// Mode Byte carried by this message.
    pub mode: ModeByte,
    /// Actual payload bytes (1-2 bytes for Short, 3-250 for Long).
    pub payload: &'a [u8],
    /// 2-byte Time Stamp, unit 128 µs. Base formats additionally protect it
    /// with a dedicated TimeStamp CRC-S1 field; Extended formats fold the
    /// same wire bytes into their Actual/Complement CRC-S5 computation
    /// instead of carrying a separate TimeStamp CRC.
    pub time_stamp: u16,
}
