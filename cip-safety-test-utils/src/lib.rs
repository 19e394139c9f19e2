//! Test utilities for the CIP Safety protocol core.
//!
//! Golden PID/CID vectors and small `Vec`-backed helpers around the
//! core's slice-based codecs, kept in their own crate so the `no_std`
//! library crates never carry an allocator dependency for the sake of
//! their own tests.

pub mod buffers;
pub mod golden_vectors;

pub use buffers::{build_data_msg_vec, NEUTRAL_MODE};
pub use golden_vectors::{golden_cid_seeds, golden_pid_seeds, GOLDEN_CID, GOLDEN_IDENTITY_BYTES, GOLDEN_PID};
