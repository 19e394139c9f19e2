#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
//! # cip-safety-util
//!
//! Low-level, allocation-free building blocks for the CIP Safety protocol
//! core: the five CRC engines, little-endian byte-order primitives, the
//! parity/Actual-vs-Complement helpers, Mode Byte CRC-seed masking, and the
//! `std`-gated logging macros. This crate has no dependency on
//! `cip-safety-core`; the codecs in that crate are built on top of it.
//!
//! ## Modules
//! - [`crc`]: CRC-S1 through CRC-S5, table-driven, incremental-seed.
//! - [`byteorder`]: little-endian read/write helpers and a length-checked
//!   cursor.
//! - [`parity`]: even-parity table, redundant-byte derivation,
//!   Actual-vs-Complement data check.
//! - [`mode_mask`]: the `0xE0`/`0x1F` Mode Byte masks used when seeding
//!   data-message CRCs.
//! - [`log`]: `log_integrity_failure!`/`log_crc_seed!` macros.

pub mod byteorder;
pub mod crc;
pub mod log;
pub mod mode_mask;
pub mod parity;
