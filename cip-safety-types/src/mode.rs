//! The Mode Byte: three semantic bits plus their redundant encoding.
//!
//! Bit layout, bit 7 down to bit 0 (CIP Safety Volume 5, the Mode Byte
//! figure): `Run/Idle | TBD_2 | TBD | N_Run/Idle | TBD_2_Copy | N_TBD |
//! unused(2)`. The three high bits are the semantic payload a producer
//! chooses; the next three are their redundant counterparts, related to the
//! primary bits by a fixed XOR mask so a consumer can self-check the byte
//! without a CRC.

use bitfields::bitfield;

/// Mode Byte bit layout. `bitfields` lays out fields LSB-first in
/// declaration order, so the lowest bits are declared first here even
/// though CIP Safety's own figure reads MSB-first: `unused` occupies bits
/// 0-1, `run_idle` occupies bit 7.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct ModeByte {
    /// Bits 0-1: unused per CIP Safety.
    #[bits(2)]
    unused: u8,
    /// Bit 2: redundant copy of TBD, carried inverted.
    #[bits(1)]
    pub n_tbd: bool,
    /// Bit 3: redundant copy of TBD_2, carried unchanged.
    #[bits(1)]
    pub tbd_2_copy: bool,
    /// Bit 4: redundant copy of Run/Idle, carried inverted.
    #[bits(1)]
    pub n_run_idle: bool,
    /// Bit 5: TBD (vendor-defined).
    #[bits(1)]
    pub tbd: bool,
    /// Bit 6: TBD_2 (vendor-defined).
    #[bits(1)]
    pub tbd_2: bool,
    /// Bit 7: Run/Idle.
    #[bits(1)]
    pub run_idle: bool,
}

/// The three semantic bits a producer chooses for a Mode Byte; the
/// redundant bits are derived, never chosen directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSemantic {
    /// Run/Idle flag.
    pub run_idle: bool,
    /// Vendor-defined TBD_2 bit.
    pub tbd_2: bool,
    /// Vendor-defined TBD bit.
    pub tbd: bool,
}

impl ModeByte {
    /// Builds a Mode Byte from its three semantic bits, deriving the
    /// redundant bits by construction so the result always satisfies
    /// [`ModeByte::redundant_bits_ok`].
    pub fn build(semantic: ModeSemantic) -> Self {
        let mut mb = ModeByte::new();
        mb.set_run_idle(semantic.run_idle);
        mb.set_tbd_2(semantic.tbd_2);
        mb.set_tbd(semantic.tbd);
        mb.set_n_run_idle(!semantic.run_idle);
        mb.set_tbd_2_copy(semantic.tbd_2);
        mb.set_n_tbd(!semantic.tbd);
        mb
    }

    /// Reconstructs a Mode Byte from its raw wire representation.
    pub fn from_byte(byte: u8) -> Self {
        ModeByte::from_bits(byte)
    }

    /// Extracts the three semantic bits, ignoring the redundant encoding.
    pub fn semantic(&self) -> ModeSemantic {
        ModeSemantic {
            run_idle: self.run_idle(),
            tbd_2: self.tbd_2(),
            tbd: self.tbd(),
        }
    }

    /// Checks that the redundant bits agree with the semantic bits:
    /// `Run/Idle == !N_Run/Idle`, `TBD_2 == TBD_2_Copy`, `TBD == !N_TBD`.
    pub fn redundant_bits_ok(&self) -> bool {
        check_redundant_bits(self.into_bits())
    }
}

/// Redundancy XOR mask relating the two 3-bit groups of a Mode Byte, per
/// CIP Safety: bit 7 (Run/Idle) differs from bit 4 (N_Run/Idle), bit 6
/// (TBD_2) agrees with bit 3 (TBD_2_Copy), bit 5 (TBD) differs from bit 2
/// (N_TBD).
const REDUNDANCY_XOR: u8 = 0x05;

/// Computes the redundant-bit invariant directly over a raw Mode Byte:
/// `((b >> 5) & 0x07) ^ ((b >> 2) & 0x07) == 0x05`. Used by the
/// data-message consumer path, which only ever holds the raw wire byte.
pub fn check_redundant_bits(byte: u8) -> bool {
    ((byte >> 5) & 0x07) ^ ((byte >> 2) & 0x07) == REDUNDANCY_XOR
}

/// Computes a full Mode Byte from a byte that already carries the three
/// semantic bits in bits 7-5 (bits 4-0 zero), matching
/// `((b & 0xE3) | (((b >> 3) & 0x1C) ^ 0x14))` from the CIP Safety
/// reference. Equivalent to [`ModeByte::build`] but operating on a raw byte
/// instead of a [`ModeSemantic`].
pub fn encode_redundant_bits(semantic_byte: u8) -> u8 {
    (semantic_byte & 0xE3) | (((semantic_byte >> 3) & 0x1C) ^ 0x14)
}
