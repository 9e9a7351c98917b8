//! Reports the mouse sends on its own, and dispatch of inbound reports.
//!
//! Pressing the DPI button makes the device emit a 64-byte notification:
//!
//! | Offset | Field                              |
//! |--------|------------------------------------|
//! | 0      | version, 0x04                      |
//! | 1..3   | message type `A2 02`               |
//! | 3      | new DPI step                       |
//! | 4..7   | packed [`DpiValue`] of that step   |
//! | 7..64  | zero                               |

use crate::dpi::DpiValue;
use crate::error::{expect_len, Result};
use crate::frame::{check_signature, SettingsFrame, VERSION};
use crate::REPORT_LEN;

/// Message type of the DPI-changed notification.
pub const DPI_CHANGED_MESSAGE_TYPE: [u8; 2] = [0xA2, 0x02];

/// The device switched to another DPI step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpiChangedReport {
    /// Step the device switched to, as reported.
    pub step: u8,
    pub dpi: DpiValue,
}

impl DpiChangedReport {
    pub fn encode(&self) -> [u8; REPORT_LEN] {
        let mut buf = [0u8; REPORT_LEN];
        buf[0] = VERSION;
        buf[1..3].copy_from_slice(&DPI_CHANGED_MESSAGE_TYPE);
        buf[3] = self.step;
        buf[4..7].copy_from_slice(&self.dpi.encode());
        buf
    }

    /// Decode the notification. The zero tail is not inspected.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len("dpi changed report", bytes, REPORT_LEN)?;
        check_signature(bytes, DPI_CHANGED_MESSAGE_TYPE)?;
        Ok(Self {
            step: bytes[3],
            dpi: DpiValue::decode(&bytes[4..7])?,
        })
    }
}

/// Any report the device may send to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundReport {
    Settings(SettingsFrame),
    DpiChanged(DpiChangedReport),
}

impl InboundReport {
    /// Decode an inbound report, choosing the codec from its message type.
    ///
    /// Unknown signatures fail with [`crate::error::Error::UnexpectedHeader`]
    /// against the settings signature.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        expect_len("inbound report", bytes, REPORT_LEN)?;
        if bytes[0] == VERSION && bytes[1..3] == DPI_CHANGED_MESSAGE_TYPE {
            DpiChangedReport::decode(bytes).map(Self::DpiChanged)
        } else {
            SettingsFrame::decode(bytes).map(Self::Settings)
        }
    }
}
