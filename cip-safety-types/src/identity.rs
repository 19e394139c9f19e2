//! Producer/consumer identity triads used to seed the per-connection CRCs.

/// A Connection Serial Number as carried in the Forward_Open request.
pub type CnxnSerialNumber = u16;

/// The Rollover Count carried in Extended Format messages. Never
/// transmitted on the wire; mixed into the per-message CRC seed and
/// maintained by the caller from the running time-stamp counter.
pub type RolloverCount = u16;

/// The Production Identifier: the originator's side of a safety connection.
///
/// Serializes on the wire as `VendorId(LE) || DeviceSerialNumber(LE) ||
/// ConnectionSerialNumber(LE)`, in that order, which is also the order the
/// CRC seeding functions hash it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pid {
    /// Vendor ID of the device that opened the connection.
    pub vendor_id: u16,
    /// Serial number of the device that opened the connection.
    pub device_serial_number: u32,
    /// Serial number of the connection itself.
    pub connection_serial_number: CnxnSerialNumber,
}

/// The Consumption Identifier: the target's side of a safety connection.
///
/// Same wire layout and field order as [`Pid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cid {
    /// Vendor ID of the device consuming the connection.
    pub vendor_id: u16,
    /// Serial number of the device consuming the connection.
    pub device_serial_number: u32,
    /// Serial number of the connection itself.
    pub connection_serial_number: CnxnSerialNumber,
}

impl Pid {
    /// Serializes this identifier into its 8-byte little-endian wire form.
    pub fn to_bytes(&self) -> [u8; 8] {
        identity_to_bytes(self.vendor_id, self.device_serial_number, self.connection_serial_number)
    }
}

impl Cid {
    /// Serializes this identifier into its 8-byte little-endian wire form.
    pub fn to_bytes(&self) -> [u8; 8] {
        identity_to_bytes(self.vendor_id, self.device_serial_number, self.connection_serial_number)
    }
}

fn identity_to_bytes(vendor_id: u16, device_serial_number: u32, cnxn_serial_number: u16) -> [u8; 8] {
    let mut buf = [0u8; 8];
    buf[0..2].copy_from_slice(&vendor_id.to_le_bytes());
    buf[2..6].copy_from_slice(&device_serial_number.to_le_bytes());
    buf[6..8].copy_from_slice(&cnxn_serial_number.to_le_bytes());
    buf
}

/// The three CRC seeds derived from a [`Pid`], one per CRC engine used to
/// seed producer-side checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PidSeeds {
    /// Seed for the CRC-S1 engine.
    pub s1: u8,
    /// Seed for the CRC-S3 engine.
    pub s3: u16,
    /// Seed for the CRC-S5 engine.
    pub s5: u32,
}

/// The CRC seeds derived from a [`Cid`]. Time Coordination messages only
/// ever use the CRC-S3 (Base) or CRC-S5 (Extended) seed, so unlike
/// [`PidSeeds`] there is no `s1` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CidSeeds {
    /// Seed for the CRC-S3 engine.
    pub s3: u16,
    /// Seed for the CRC-S5 engine.
    pub s5: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_golden_vector_serializes_in_field_order() {
        let pid = Pid {
            vendor_id: 0x1234,
            device_serial_number: 0x1234_5678,
            connection_serial_number: 0xABCD,
        };
        assert_eq!(
            pid.to_bytes(),
            [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xCD, 0xAB]
        );
    }
}
