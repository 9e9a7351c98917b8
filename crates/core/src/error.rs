//! Error types for light2-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Value outside its numeric domain or not aligned to its step.
    #[error("value out of range: {field} = {value} (allowed {min}..={max} in steps of {step})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
        step: i64,
    },

    /// Buffer length mismatch at a decode boundary.
    #[error("wrong size for {what}: got {actual} bytes, expected {expected}")]
    Size {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Wire value with no mapping in a closed enumeration.
    #[error("unknown {field} value: 0x{value:02X}")]
    UnknownEnum { field: &'static str, value: u8 },

    /// Report signature (version + message type) does not match the expected one.
    #[error("unexpected report header: expected {expected:02X?}, got {actual:02X?}")]
    UnexpectedHeader { expected: [u8; 3], actual: [u8; 3] },

    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Operation timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Profile serialization/deserialization error.
    #[error("profile error: {0}")]
    Profile(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `bytes` is exactly `expected` long.
pub(crate) fn expect_len(what: &'static str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::Size {
            what,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
