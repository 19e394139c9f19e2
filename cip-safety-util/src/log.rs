//! Logging macros for the CIP Safety protocol core, mirroring the
//! `std`-gated, no-op-in-`no_std` pattern of the IO-Link stack's
//! `log_utils` module. Two macros cover this crate's two observable
//! events instead of a generic function/state-transition pair, since the
//! core has no state machine of its own to trace.

/// Logs that an integrity check failed, before the caller returns the
/// corresponding error. Compiles to nothing unless the `std` feature is
/// enabled.
#[macro_export]
macro_rules! log_integrity_failure {
    ($module:expr, $check_name:expr, $details:expr) => {
        #[cfg(feature = "std")]
        {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::SystemTime::UNIX_EPOCH)
                .unwrap()
                .as_secs();
            std::eprintln!("[{}] [{}] [{}] {}", now, $module, $check_name, $details);
        }
    };
}

/// Logs that a PID/CID CRC seed set was derived, for field diagnostics.
/// Compiles to nothing unless the `std` feature is enabled.
#[macro_export]
macro_rules! log_crc_seed {
    ($module:expr, $seed_kind:expr, $value:expr) => {
        #[cfg(feature = "std")]
        {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::SystemTime::UNIX_EPOCH)
                .unwrap()
                .as_secs();
            std::println!("[{}] [{}] [{}] {:?}", now, $module, $seed_kind, $value);
        }
    };
}
