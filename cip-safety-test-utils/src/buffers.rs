//! Heap-backed buffer builders. The core's codecs take caller-supplied
//! fixed slices; these helpers add the `Vec<u8>` plumbing that is fine for
//! a test harness but out of place in a `no_std` library.

use cip_safety_core::message::build_data_msg;
use cip_safety_core::{DataMessageFormat, ModeSemantic, PidSeeds, RolloverCount};

/// Builds a data message of the given format and returns it as an owned
/// byte vector, sized exactly to the wire length the codec reports.
pub fn build_data_msg_vec(
    format: DataMessageFormat,
    seeds: &PidSeeds,
    rollover_count: RolloverCount,
    payload: &[u8],
    mode_semantic: ModeSemantic,
    time_stamp: u16,
) -> Vec<u8> {
    let mut buf = [0u8; 512];
    let len = build_data_msg(format, seeds, rollover_count, payload, mode_semantic, time_stamp, &mut buf)
        .expect("golden test inputs must build cleanly");
    buf[..len].to_vec()
}

/// A harmless, all-zero Mode semantic used by tests that don't care about
/// the Mode Byte's specific bits.
pub const NEUTRAL_MODE: ModeSemantic = ModeSemantic { run_idle: false, tbd_2: false, tbd: false };
