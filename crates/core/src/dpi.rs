//! Packed DPI value for one step (x and y axis).
//!
//! The firmware stores each axis as a quotient of 50 DPI. Both quotients need
//! up to 12 bits, so the low 8 bits of each get their own byte and the high
//! nibbles share a leading "offset" byte:
//!
//! ```text
//!   byte0          byte1      byte2
//!   [qx 11:8 | qy 11:8]  [qx 7:0]   [qy 7:0]
//! ```
//!
//! Example: `01 F0 2C` → qx = 0x0F0 (12000 DPI), qy = 0x12C (15000 DPI).

use crate::error::{expect_len, Error, Result};
use serde::{Deserialize, Serialize};

/// Lowest DPI the sensor accepts.
pub const DPI_MIN: u16 = 50;
/// Highest DPI the sensor accepts.
pub const DPI_MAX: u16 = 16000;
/// DPI granularity; also the divisor used on the wire.
pub const DPI_STEP: u16 = 50;

/// A validated x/y DPI pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDpiValue")]
pub struct DpiValue {
    x: u16,
    y: u16,
}

#[derive(Deserialize)]
struct RawDpiValue {
    x: i64,
    y: i64,
}

impl TryFrom<RawDpiValue> for DpiValue {
    type Error = Error;

    fn try_from(raw: RawDpiValue) -> Result<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl DpiValue {
    /// Encoded size in bytes.
    pub const BYTE_SIZE: usize = 3;

    /// Create a DPI pair in human-readable units.
    ///
    /// Both axes must lie in `50..=16000` and be a multiple of 50. Values are
    /// never clamped or rounded.
    pub fn new(x: i64, y: i64) -> Result<Self> {
        Ok(Self {
            x: validate_axis("dpi_x", x)?,
            y: validate_axis("dpi_y", y)?,
        })
    }

    /// Same DPI on both axes.
    pub fn uniform(dpi: i64) -> Result<Self> {
        Self::new(dpi, dpi)
    }

    /// Factory-table entry; `dpi` must already be a legal value.
    pub(crate) const fn factory(dpi: u16) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// X-axis DPI.
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Y-axis DPI.
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Pack into the 3-byte wire form.
    pub fn encode(&self) -> [u8; 3] {
        let qx = self.x / DPI_STEP;
        let qy = self.y / DPI_STEP;

        let offset = ((qx >> 4) & 0xF0) | ((qy >> 8) & 0x0F);
        [offset as u8, (qx & 0xFF) as u8, (qy & 0xFF) as u8]
    }

    /// Unpack from the 3-byte wire form.
    ///
    /// A quotient of zero or one above 320 decodes to an out-of-range DPI and
    /// is rejected the same way as at construction.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len("dpi value", bytes, Self::BYTE_SIZE)?;

        let qx = ((u32::from(bytes[0]) << 4) & 0x0F00) | u32::from(bytes[1]);
        let qy = ((u32::from(bytes[0]) << 8) & 0x0F00) | u32::from(bytes[2]);

        Self::new(
            i64::from(qx * u32::from(DPI_STEP)),
            i64::from(qy * u32::from(DPI_STEP)),
        )
    }
}

impl std::fmt::Display for DpiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.x == self.y {
            write!(f, "{} DPI", self.x)
        } else {
            write!(f, "{}x{} DPI", self.x, self.y)
        }
    }
}

fn validate_axis(field: &'static str, value: i64) -> Result<u16> {
    let min = i64::from(DPI_MIN);
    let max = i64::from(DPI_MAX);
    let step = i64::from(DPI_STEP);

    if !(min..=max).contains(&value) || value % step != 0 {
        return Err(Error::OutOfRange {
            field,
            value,
            min,
            max,
            step,
        });
    }
    Ok(value as u16)
}
