//! Time Coordination and Time Correction message codecs.
//!
//! Time Coordination travels consumer-to-producer, seeded with the
//! consumer's CID seeds. Time Correction travels producer-to-multicast-
//! consumers, seeded with the producer's PID seeds. Neither folds in the
//! Rollover Count: §4.5 of the core specification seeds both purely from
//! the identifier, unlike the Extended Format data-message codecs.

use cip_safety_types::error::{CipSafetyError, CipSafetyResult};
use cip_safety_types::identity::{CidSeeds, PidSeeds};
use cip_safety_types::message::DataMessageFormat;
use cip_safety_util::byteorder::{read_u16_le, write_u16_le};
use cip_safety_util::crc::{s3, s5};
use cip_safety_util::parity::{parity_ok, redundant_byte, with_even_parity};

/// Base Format Time Coordination wire length: `Ack_Byte | Value(2) |
/// Ack_Byte_2 | CRC-S3(2)`.
pub const TCOO_BASE_LEN: usize = 6;
/// Extended Format Time Coordination wire length: `Ack_Byte | Value(2) |
/// CRC-S5(3)`.
pub const TCOO_EXTENDED_LEN: usize = 6;
/// Base Format Time Correction wire length, same shape as Time
/// Coordination with Mcast_Byte in place of Ack_Byte.
pub const TCR_BASE_LEN: usize = 6;
/// Extended Format Time Correction wire length.
pub const TCR_EXTENDED_LEN: usize = 6;

/// A decoded Time Coordination message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCoordination {
    /// Consumer-reported time value, 128 µs units.
    pub consumer_time_value: u16,
    /// Low 7 bits of Ack_Byte (the parity bit is not part of the semantic
    /// payload).
    pub ack_semantic: u8,
}

/// A decoded Time Correction message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCorrection {
    /// Producer-reported correction value, 128 µs units.
    pub time_correction_value: u16,
    /// Low 7 bits of Mcast_Byte.
    pub mcast_semantic: u8,
}

/// Builds a Time Coordination message into `out`, returning the number of
/// bytes written.
pub fn build_tcoo(
    format: DataMessageFormat,
    cid_seeds: &CidSeeds,
    consumer_time_value: u16,
    ack_semantic: u8,
    out: &mut [u8],
) -> CipSafetyResult<usize> {
    if out.len() < TCOO_BASE_LEN {
        return Err(CipSafetyError::WireTooShort);
    }
    let ack_byte = with_even_parity(ack_semantic & 0x7F);
    out[0] = ack_byte;
    write_u16_le(&mut out[1..3], consumer_time_value);

    if format.is_base() {
        out[3] = redundant_byte(ack_byte);
        let mut crc_input = [0u8; 3];
        crc_input[0] = ack_byte;
        crc_input[1..3].copy_from_slice(&consumer_time_value.to_le_bytes());
        let crc = s3::compute(&crc_input, cid_seeds.s3);
        write_u16_le(&mut out[4..6], crc);
    } else {
        let mut crc_input = [0u8; 3];
        crc_input[0] = ack_byte;
        crc_input[1..3].copy_from_slice(&consumer_time_value.to_le_bytes());
        let crc = s5::compute(&crc_input, cid_seeds.s5);
        out[3] = (crc & 0xFF) as u8;
        out[4] = ((crc >> 8) & 0xFF) as u8;
        out[5] = ((crc >> 16) & 0xFF) as u8;
    }
    Ok(TCOO_BASE_LEN)
}

/// Verifies a received Time Coordination message.
pub fn verify_tcoo(format: DataMessageFormat, cid_seeds: &CidSeeds, bytes: &[u8]) -> CipSafetyResult<TimeCoordination> {
    if bytes.len() < TCOO_BASE_LEN {
        return Err(CipSafetyError::WireTooShort);
    }
    let ack_byte = bytes[0];
    let consumer_time_value = read_u16_le(&bytes[1..3]);

    if !parity_ok(ack_byte) {
        return Err(CipSafetyError::AckByteParity);
    }
    if format.is_base() && bytes[3] != redundant_byte(ack_byte) {
        return Err(CipSafetyError::AckByteParity);
    }

    let mut crc_input = [0u8; 3];
    crc_input[0] = ack_byte;
    crc_input[1..3].copy_from_slice(&consumer_time_value.to_le_bytes());

    let crc_ok = if format.is_base() {
        let crc = s3::compute(&crc_input, cid_seeds.s3);
        crc == read_u16_le(&bytes[4..6])
    } else {
        let crc = s5::compute(&crc_input, cid_seeds.s5);
        crc == ((bytes[3] as u32) | ((bytes[4] as u32) << 8) | ((bytes[5] as u32) << 16))
    };
    if !crc_ok {
        return Err(CipSafetyError::TimeStampCrcMismatch);
    }

    Ok(TimeCoordination { consumer_time_value, ack_semantic: ack_byte & 0x7F })
}

/// Builds a Time Correction message into `out`, returning the number of
/// bytes written. Only meaningful on a multicast connection; seeded with
/// the producer's PID, not the consumer's CID.
pub fn build_tcr(
    format: DataMessageFormat,
    pid_seeds: &PidSeeds,
    time_correction_value: u16,
    mcast_semantic: u8,
    out: &mut [u8],
) -> CipSafetyResult<usize> {
    if out.len() < TCR_BASE_LEN {
        return Err(CipSafetyError::WireTooShort);
    }
    let mcast_byte = with_even_parity(mcast_semantic & 0x7F);
    out[0] = mcast_byte;
    write_u16_le(&mut out[1..3], time_correction_value);

    let mut crc_input = [0u8; 3];
    crc_input[0] = mcast_byte;
    crc_input[1..3].copy_from_slice(&time_correction_value.to_le_bytes());

    if format.is_base() {
        out[3] = redundant_byte(mcast_byte);
        let crc = s3::compute(&crc_input, pid_seeds.s3);
        write_u16_le(&mut out[4..6], crc);
    } else {
        let crc = s5::compute(&crc_input, pid_seeds.s5);
        out[3] = (crc & 0xFF) as u8;
        out[4] = ((crc >> 8) & 0xFF) as u8;
        out[5] = ((crc >> 16) & 0xFF) as u8;
    }
    Ok(TCR_BASE_LEN)
}

/// Verifies a received Time Correction message.
pub fn verify_tcr(format: DataMessageFormat, pid_seeds: &PidSeeds, bytes: &[u8]) -> CipSafetyResult<TimeCorrection> {
    if bytes.len() < TCR_BASE_LEN {
        return Err(CipSafetyError::WireTooShort);
    }
    let mcast_byte = bytes[0];
    let time_correction_value = read_u16_le(&bytes[1..3]);

    if !parity_ok(mcast_byte) {
        return Err(CipSafetyError::McastByteParity);
    }
    if format.is_base() && bytes[3] != redundant_byte(mcast_byte) {
        return Err(CipSafetyError::McastByteParity);
    }

    let mut crc_input = [0u8; 3];
    crc_input[0] = mcast_byte;
    crc_input[1..3].copy_from_slice(&time_correction_value.to_le_bytes());

    let crc_ok = if format.is_base() {
        let crc = s3::compute(&crc_input, pid_seeds.s3);
        crc == read_u16_le(&bytes[4..6])
    } else {
        let crc = s5::compute(&crc_input, pid_seeds.s5);
        crc == ((bytes[3] as u32) | ((bytes[4] as u32) << 8) | ((bytes[5] as u32) << 16))
    };
    if !crc_ok {
        return Err(CipSafetyError::TimeStampCrcMismatch);
    }

    Ok(TimeCorrection { time_correction_value, mcast_semantic: mcast_byte & 0x7F })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cip_safety_types::identity::{Cid, Pid};
    use crate::seeding::{seed_from_cid, seed_from_pid};

    fn golden_cid() -> Cid {
        Cid { vendor_id: 0x1234, device_serial_number: 0x1234_5678, connection_serial_number: 0xABCD }
    }

    fn golden_pid() -> Pid {
        Pid { vendor_id: 0x1234, device_serial_number: 0x1234_5678, connection_serial_number: 0xABCD }
    }

    #[test]
    fn tcoo_round_trips_base_and_extended() {
        for format in [DataMessageFormat::BaseShort, DataMessageFormat::ExtendedShort] {
            let seeds = seed_from_cid(&golden_cid());
            let mut buf = [0u8; 8];
            let len = build_tcoo(format, &seeds, 0x3344, 0x2A, &mut buf).unwrap();
            let decoded = verify_tcoo(format, &seeds, &buf[..len]).unwrap();
            assert_eq!(decoded.consumer_time_value, 0x3344);
            assert_eq!(decoded.ack_semantic, 0x2A);
        }
    }

    #[test]
    fn tcr_round_trips_base_and_extended() {
        for format in [DataMessageFormat::BaseShort, DataMessageFormat::ExtendedShort] {
            let seeds = seed_from_pid(&golden_pid());
            let mut buf = [0u8; 8];
            let len = build_tcr(format, &seeds, 0x7788, 0x15, &mut buf).unwrap();
            let decoded = verify_tcr(format, &seeds, &buf[..len]).unwrap();
            assert_eq!(decoded.time_correction_value, 0x7788);
            assert_eq!(decoded.mcast_semantic, 0x15);
        }
    }

    #[test]
    fn tcoo_byte2_corruption_is_caught_by_the_redundant_byte_check_not_the_crc() {
        let seeds = seed_from_cid(&golden_cid());
        let mut buf = [0u8; 8];
        let len = build_tcoo(DataMessageFormat::BaseShort, &seeds, 0x3344, 0x2A, &mut buf).unwrap();
        buf[3] ^= 0xFF; // Ack_Byte_2, excluded from the CRC but cross-checked against Ack_Byte
        assert_eq!(
            verify_tcoo(DataMessageFormat::BaseShort, &seeds, &buf[..len]).unwrap_err(),
            CipSafetyError::AckByteParity
        );
    }

    #[test]
    fn tcoo_value_bit_flip_is_detected() {
        let seeds = seed_from_cid(&golden_cid());
        let mut buf = [0u8; 8];
        let len = build_tcoo(DataMessageFormat::BaseShort, &seeds, 0x3344, 0x2A, &mut buf).unwrap();
        buf[1] ^= 0x01;
        assert!(verify_tcoo(DataMessageFormat::BaseShort, &seeds, &buf[..len]).is_err());
    }

    #[test]
    fn tcr_parity_flip_is_detected() {
        let seeds = seed_from_pid(&golden_pid());
        let mut buf = [0u8; 8];
        let len = build_tcr(DataMessageFormat::ExtendedShort, &seeds, 0x7788, 0x15, &mut buf).unwrap();
        buf[0] ^= 0x80;
        assert_eq!(
            verify_tcr(DataMessageFormat::ExtendedShort, &seeds, &buf[..len]).unwrap_err(),
            CipSafetyError::McastByteParity
        );
    }
}
