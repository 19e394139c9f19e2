/// Error types for the CIP Safety protocol core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipSafetyError {
    /// Actual data CRC did not match the value carried on the wire.
    ActualCrcMismatch,
    /// Complement data CRC did not match the value carried on the wire.
    ComplementCrcMismatch,
    /// Time Stamp CRC did not match the value carried on the wire.
    TimeStampCrcMismatch,
    /// Mode Byte redundant bits failed their self-check.
    ModeByteRedundantBits,
    /// Actual data and complement data disagreed bit-for-bit.
    ActualVsComplementData,
    /// Ack_Byte failed its even-parity check.
    AckByteParity,
    /// Mcast_Byte failed its even-parity check.
    McastByteParity,
    /// Wire buffer shorter than the selected format requires.
    WireTooShort,
    /// Wire buffer longer than the selected format allows.
    WireTooLong,
    /// Wire buffer length is not a valid (even, where required) length.
    WireLengthNotEven,
    /// CPCRC computed over a Forward_Open request did not match.
    CpcrcMismatch,
    /// SCCRC computed over safety configuration data did not match.
    SccrcMismatch,
    /// The requested data-message format is not enabled in this build.
    UnsupportedFormat,
}

/// Result alias used throughout the CIP Safety protocol core.
pub type CipSafetyResult<T> = Result<T, CipSafetyError>;

#[cfg(feature = "std")]
impl std::fmt::Display for CipSafetyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CipSafetyError {}
