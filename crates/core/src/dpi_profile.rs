//! The seven-step DPI table and the active step.
//!
//! Wire layout (23 bytes):
//!
//! | Offset | Field                                       |
//! |--------|---------------------------------------------|
//! | 0      | current step                                |
//! | 1      | enable mask, bit i = step i+1, bit 7 spare  |
//! | 2..23  | 7 × packed [`DpiValue`], step 1 first       |
//!
//! Older firmware exchanges the same block without the leading step byte
//! (22 bytes). Both layouts are available; the settings frame uses the
//! 23-byte one.

use crate::dpi::DpiValue;
use crate::error::{expect_len, Result};
use serde::{Deserialize, Serialize};

/// Number of selectable DPI steps.
pub const DPI_STEP_COUNT: usize = 7;

/// Encoded size of the stepped layout.
pub const DPI_PROFILE_LEN: usize = 1 + DPI_STEP_TABLE_LEN;
/// Encoded size of the older layout without the step byte.
pub const DPI_STEP_TABLE_LEN: usize = 1 + DPI_STEP_COUNT * DpiValue::BYTE_SIZE;

const SPARE_MASK_BIT: u8 = 1 << 7;

/// One slot of the DPI table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpiStep {
    /// Whether the DPI button cycles through this step.
    pub enabled: bool,
    pub value: DpiValue,
}

/// DPI steps plus the currently selected step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpiProfile {
    /// Active step as the firmware reports it. Passed through unchecked.
    pub current_step: u8,
    /// Steps in device order (index 0 = step 1).
    pub steps: [DpiStep; DPI_STEP_COUNT],
    /// Bit 7 of the enable mask. Unused, kept so re-encoding is lossless.
    #[serde(default)]
    pub spare_bit: bool,
}

impl Default for DpiProfile {
    fn default() -> Self {
        let step = |dpi: u16| DpiStep {
            enabled: true,
            value: DpiValue::factory(dpi),
        };
        Self {
            current_step: 1,
            steps: [
                step(400),
                step(800),
                step(1200),
                step(2400),
                step(3200),
                step(6400),
                step(16000),
            ],
            spare_bit: false,
        }
    }
}

impl DpiProfile {
    /// Enable mask as sent on the wire.
    pub fn enabled_mask(&self) -> u8 {
        let mask = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.enabled)
            .fold(0u8, |mask, (i, _)| mask | (1 << i));
        if self.spare_bit {
            mask | SPARE_MASK_BIT
        } else {
            mask
        }
    }

    /// Number of steps the DPI button cycles through.
    pub fn enabled_count(&self) -> usize {
        self.steps.iter().filter(|step| step.enabled).count()
    }

    /// Encode the 23-byte block.
    pub fn encode(&self) -> [u8; DPI_PROFILE_LEN] {
        let mut buf = [0u8; DPI_PROFILE_LEN];
        buf[0] = self.current_step;
        buf[1..].copy_from_slice(&self.encode_steps());
        buf
    }

    /// Decode the 23-byte block.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len("dpi profile", bytes, DPI_PROFILE_LEN)?;
        Self::decode_steps(&bytes[1..], bytes[0])
    }

    /// Encode the 22-byte block used by firmware without the step byte.
    pub fn encode_steps(&self) -> [u8; DPI_STEP_TABLE_LEN] {
        let mut buf = [0u8; DPI_STEP_TABLE_LEN];
        buf[0] = self.enabled_mask();
        for (chunk, step) in buf[1..]
            .chunks_exact_mut(DpiValue::BYTE_SIZE)
            .zip(self.steps.iter())
        {
            chunk.copy_from_slice(&step.value.encode());
        }
        buf
    }

    /// Decode the 22-byte block. That layout carries no step byte, so the
    /// caller supplies `current_step` from wherever its context keeps it.
    pub fn decode_steps(bytes: &[u8], current_step: u8) -> Result<Self> {
        expect_len("dpi step table", bytes, DPI_STEP_TABLE_LEN)?;

        let mask = bytes[0];
        let mut steps = Self::default().steps;
        for (i, (step, chunk)) in steps
            .iter_mut()
            .zip(bytes[1..].chunks_exact(DpiValue::BYTE_SIZE))
            .enumerate()
        {
            *step = DpiStep {
                enabled: mask & (1 << i) != 0,
                value: DpiValue::decode(chunk)?,
            };
        }

        Ok(Self {
            current_step,
            steps,
            spare_bit: mask & SPARE_MASK_BIT != 0,
        })
    }
}
