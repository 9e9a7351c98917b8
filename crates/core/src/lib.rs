//! light2-core: settings report codec for the Sharkoon Light2 200 mouse.
//!
//! This crate translates DPI steps, lighting and the other mouse settings
//! to and from the fixed 64-byte HID report the firmware expects. The codecs
//! are pure; device I/O goes through the [`transport::HidTransport`] seam.

pub mod dpi;
pub mod dpi_profile;
pub mod error;
pub mod frame;
pub mod hid;
#[cfg(test)]
mod integration_tests;
pub mod lighting;
pub mod notify;
pub mod profile;
pub mod transport;

pub use dpi::DpiValue;
pub use dpi_profile::{DpiProfile, DpiStep};
pub use error::{Error, Result};
pub use frame::{Command, SettingsFrame};
pub use lighting::{Illumination, LedEffect, RgbColor};

/// Sharkoon USB Vendor ID.
pub const SHARKOON_VID: u16 = 0x2EA8;

/// Known Sharkoon product IDs.
pub mod pids {
    /// Light2 200.
    pub const LIGHT2_200: u16 = 0x2203;
}

/// USB interface carrying the settings reports.
pub const DATA_INTERFACE: i32 = 1;

/// Size of every report exchanged with the device.
pub const REPORT_LEN: usize = 64;
