//! Identifier seeding: derives the per-connection CRC seeds from a PID or
//! CID, and carries the Extended Format seed one step further through the
//! per-message Rollover Count.

use cip_safety_types::identity::{Cid, CidSeeds, Pid, PidSeeds, RolloverCount};
use cip_safety_util::crc::{s1, s3, s5};

/// Derives the PID-seed set `{s1, s3, s5}` from a Production Identifier:
/// CRC-S1, CRC-S3 and CRC-S5 each computed over the identifier's 8-byte
/// little-endian serialization with preset 0.
///
/// Base Short uses only `s1`; Base Long uses `s1` and `s3`; Extended Short
/// uses `s5` alone; Extended Long uses `s3` and `s5`.
pub fn seed_from_pid(pid: &Pid) -> PidSeeds {
    let bytes = pid.to_bytes();
    let seeds = PidSeeds {
        s1: s1::compute(&bytes, 0),
        s3: s3::compute(&bytes, 0),
        s5: s5::compute(&bytes, 0),
    };
    cip_safety_util::log_crc_seed!("seeding", "pid", seeds);
    seeds
}

/// Derives the CID-seed set `{s3, s5}` from a Consumption Identifier, used
/// to seed Time Coordination message verification (CRC-S3 for Base,
/// CRC-S5 for Extended).
pub fn seed_from_cid(cid: &Cid) -> CidSeeds {
    let bytes = cid.to_bytes();
    let seeds = CidSeeds {
        s3: s3::compute(&bytes, 0),
        s5: s5::compute(&bytes, 0),
    };
    cip_safety_util::log_crc_seed!("seeding", "cid", seeds);
    seeds
}

/// Carries a PID-seed CRC-S3 value one more step through the 2-byte
/// little-endian Rollover Count for a single Extended Format message.
/// The Rollover Count is never transmitted; it is derived by the caller
/// from the connection's running time-stamp counter.
pub fn pid_rollover_seed_s3(pid_seeds: &PidSeeds, rollover_count: RolloverCount) -> u16 {
    s3::compute_rollover_step(rollover_count, pid_seeds.s3)
}

/// Carries a PID-seed CRC-S5 value one more step through the 2-byte
/// little-endian Rollover Count for a single Extended Format message.
pub fn pid_rollover_seed_s5(pid_seeds: &PidSeeds, rollover_count: RolloverCount) -> u32 {
    s5::compute_rollover_step(rollover_count, pid_seeds.s5)
}
