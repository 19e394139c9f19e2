//! Types used by SafetyOpen connection-establishment integrity checks.

/// The Safety Configuration Identifier: an SCCRC plus the safety
/// configuration time stamp it was computed against. A caller can only
/// meaningfully persist or compare an SCCRC alongside the time stamp it was
/// derived from, so the two travel together as one type (this bundling is
/// not in the distilled core spec; it mirrors `CSS_t_SCID` in the
/// originating system's API headers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scid {
    /// CRC-S4 computed over `{major_sw_rev, hardware_id, config_data}`.
    pub crc: u32,
    /// Safety configuration time, 4 bytes as carried on the wire.
    pub time: u32,
    /// Safety configuration date, 2 bytes as carried on the wire.
    pub date: u16,
}
