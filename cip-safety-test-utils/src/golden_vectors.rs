//! Fixed PID/CID values and their known-correct wire/seed forms, shared by
//! every crate's test suite so a golden vector only needs updating in one
//! place.

use cip_safety_core::{Cid, CidSeeds, Pid, PidSeeds};

/// The Production Identifier used throughout the core's test vectors:
/// `VendorID=0x1234, DeviceSerialNumber=0x12345678,
/// ConnectionSerialNumber=0xABCD`.
pub const GOLDEN_PID: Pid = Pid {
    vendor_id: 0x1234,
    device_serial_number: 0x1234_5678,
    connection_serial_number: 0xABCD,
};

/// The matching Consumption Identifier for the golden connection, same
/// fields as [`GOLDEN_PID`] but on the consuming side.
pub const GOLDEN_CID: Cid = Cid {
    vendor_id: 0x1234,
    device_serial_number: 0x1234_5678,
    connection_serial_number: 0xABCD,
};

/// The known-correct 8-byte little-endian wire serialization of
/// [`GOLDEN_PID`]/[`GOLDEN_CID`]: `34 12 78 56 34 12 CD AB`.
pub const GOLDEN_IDENTITY_BYTES: [u8; 8] = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xCD, 0xAB];

/// Re-derives [`GOLDEN_PID`]'s seed set by calling the core's own seeding
/// function, so tests that need a `PidSeeds` don't hardcode CRC output.
pub fn golden_pid_seeds() -> PidSeeds {
    cip_safety_core::seeding::seed_from_pid(&GOLDEN_PID)
}

/// Re-derives [`GOLDEN_CID`]'s seed set.
pub fn golden_cid_seeds() -> CidSeeds {
    cip_safety_core::seeding::seed_from_cid(&GOLDEN_CID)
}
