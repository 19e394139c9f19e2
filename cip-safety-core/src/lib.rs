#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
//! # cip-safety-core
//!
//! The CIP Safety Volume 5 protocol core: identifier seeding, the four
//! data-message wire codecs, Time Coordination/Time Correction, and the
//! SafetyOpen connection-establishment integrity checks, built on the CRC
//! engines and primitives in `cip-safety-util`.
//!
//! A producer calls [`seeding::seed_from_pid`] once per connection, then
//! [`message::build_data_msg`] per outgoing message; a consumer calls
//! [`seeding::seed_from_pid`] (or [`seeding::seed_from_cid`] for time
//! messages) and [`message::verify_data_msg`] per incoming message.
//! [`safety_open`] is invoked once, at connection establishment, and gates
//! whether any data messages may be exchanged at all.
//!
//! ## Modules
//! - [`seeding`]: PID/CID → CRC seed derivation, plus the Rollover-Count
//!   seeding step for Extended Format.
//! - [`message`]: the four data-message codecs (Base/Extended ×
//!   Short/Long).
//! - [`time_message`]: Time Coordination and Time Correction codecs.
//! - [`safety_open`]: CPCRC, SCCRC/SCID, and the wire-length ↔
//!   payload-length mapping.

pub mod message;
pub mod safety_open;
pub mod seeding;
pub mod time_message;

pub use cip_safety_types::error::{CipSafetyError, CipSafetyResult};
pub use cip_safety_types::identity::{Cid, CidSeeds, CnxnSerialNumber, Pid, PidSeeds, RolloverCount};
pub use cip_safety_types::message::{DataMessage, DataMessageFormat};
pub use cip_safety_types::mode::{ModeByte, ModeSemantic};
pub use cip_safety_types::safety_open::Scid;
