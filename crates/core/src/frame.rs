//! The 64-byte settings report exchanged with the mouse.
//!
//! Byte layout (0-indexed):
//!
//! | Offset | Field                                        |
//! |--------|----------------------------------------------|
//! | 0      | version, always 0x04                         |
//! | 1..3   | message type, always `A0 01`                 |
//! | 3      | command (0x01 get, 0x02 set)                 |
//! | 4..7   | reserved (observed `01 02 A5`)               |
//! | 7..30  | [`DpiProfile`] block                         |
//! | 30..33 | reserved                                     |
//! | 33     | lift-off distance                            |
//! | 34..37 | reserved                                     |
//! | 37     | LED effect                                   |
//! | 38     | LED frequency                                |
//! | 39     | LED brightness                               |
//! | 40     | profile id                                   |
//! | 41     | reserved                                     |
//! | 42..63 | 7 × RGB colors                               |
//! | 63     | reserved                                     |
//!
//! Reserved regions are kept as opaque bytes: whatever was decoded is encoded
//! again unchanged.

use crate::dpi_profile::{DpiProfile, DPI_PROFILE_LEN};
use crate::error::{expect_len, Error, Result};
use crate::lighting::{Illumination, LedEffect, RgbColor, COLOR_COUNT};
use crate::REPORT_LEN;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Protocol version byte.
pub const VERSION: u8 = 0x04;
/// Message type of the settings report.
pub const SETTINGS_MESSAGE_TYPE: [u8; 2] = [0xA0, 0x01];

mod offsets {
    use std::ops::Range;

    pub const COMMAND: usize = 3;
    pub const HEADER_RESERVED: Range<usize> = 4..7;
    pub const DPI: Range<usize> = 7..30;
    pub const DPI_RESERVED: Range<usize> = 30..33;
    pub const LIFT_OFF: usize = 33;
    pub const LIFT_OFF_RESERVED: Range<usize> = 34..37;
    pub const LED_EFFECT: usize = 37;
    pub const LED_FREQUENCY: usize = 38;
    pub const LED_BRIGHTNESS: usize = 39;
    pub const PROFILE_ID: usize = 40;
    pub const LED_RESERVED: usize = 41;
    pub const COLORS: Range<usize> = 42..63;
    pub const TRAILING_RESERVED: usize = 63;
}

/// Direction of a settings report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Command {
    /// Ask the device for its current settings.
    Get = 0x01,
    /// Submit settings to the device.
    Set = 0x02,
}

impl Command {
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            0x01 => Ok(Self::Get),
            0x02 => Ok(Self::Set),
            other => Err(Error::UnknownEnum {
                field: "command",
                value: other,
            }),
        }
    }
}

/// A complete settings report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFrame {
    pub command: Command,
    /// Bytes 4–6.
    pub header_reserved: [u8; 3],
    pub dpi: DpiProfile,
    /// Bytes 30–32.
    pub dpi_reserved: [u8; 3],
    /// Raw lift-off distance (observed 2–4 for UI levels 1–3).
    pub lift_off_distance: u8,
    /// Bytes 34–36.
    pub lift_off_reserved: [u8; 3],
    pub illumination: Illumination,
    /// Byte 41.
    pub led_reserved: u8,
    /// Byte 63.
    pub trailing_reserved: u8,
}

impl Default for SettingsFrame {
    fn default() -> Self {
        Self {
            command: Command::Set,
            header_reserved: [0x01, 0x02, 0xA5],
            dpi: DpiProfile::default(),
            dpi_reserved: [0x00; 3],
            lift_off_distance: 2,
            lift_off_reserved: [0x02, 0x00, 0xA5],
            illumination: Illumination::default(),
            led_reserved: 0x00,
            trailing_reserved: 0x00,
        }
    }
}

impl SettingsFrame {
    /// The "get settings" request: header with command 0x01, all else zero.
    pub fn get_request() -> [u8; REPORT_LEN] {
        let mut buf = [0u8; REPORT_LEN];
        write_header(&mut buf, Command::Get);
        buf
    }

    /// Encode into the 64-byte report.
    pub fn encode(&self) -> [u8; REPORT_LEN] {
        let mut buf = [0u8; REPORT_LEN];
        write_header(&mut buf, self.command);
        buf[offsets::HEADER_RESERVED].copy_from_slice(&self.header_reserved);
        buf[offsets::DPI].copy_from_slice(&self.dpi.encode());
        buf[offsets::DPI_RESERVED].copy_from_slice(&self.dpi_reserved);
        buf[offsets::LIFT_OFF] = self.lift_off_distance;
        buf[offsets::LIFT_OFF_RESERVED].copy_from_slice(&self.lift_off_reserved);

        let ils = &self.illumination;
        buf[offsets::LED_EFFECT] = ils.effect.as_byte();
        buf[offsets::LED_FREQUENCY] = ils.frequency;
        buf[offsets::LED_BRIGHTNESS] = ils.brightness;
        buf[offsets::PROFILE_ID] = ils.profile_id;
        buf[offsets::LED_RESERVED] = self.led_reserved;
        for (chunk, color) in buf[offsets::COLORS].chunks_exact_mut(3).zip(ils.colors) {
            chunk.copy_from_slice(&color.to_bytes());
        }
        buf[offsets::TRAILING_RESERVED] = self.trailing_reserved;

        trace!(report_hex = format_args!("{:02X?}", buf), "settings frame encoded");
        buf
    }

    /// Decode a 64-byte report.
    ///
    /// Fails on a wrong length, a foreign header, an unknown command or LED
    /// effect, or an out-of-range DPI value. Nothing is returned on failure.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len("settings frame", bytes, REPORT_LEN)?;
        check_signature(bytes, SETTINGS_MESSAGE_TYPE)?;
        trace!(report_hex = format_args!("{:02X?}", bytes), "decoding settings frame");

        let command = Command::from_byte(bytes[offsets::COMMAND])?;
        let dpi = DpiProfile::decode(&bytes[offsets::DPI])?;
        let effect = LedEffect::from_byte(bytes[offsets::LED_EFFECT])?;

        let mut colors = [RgbColor::BLACK; COLOR_COUNT];
        for (color, chunk) in colors
            .iter_mut()
            .zip(bytes[offsets::COLORS].chunks_exact(3))
        {
            *color = RgbColor::new(chunk[0], chunk[1], chunk[2]);
        }

        Ok(Self {
            command,
            header_reserved: array_at(bytes, offsets::HEADER_RESERVED.start),
            dpi,
            dpi_reserved: array_at(bytes, offsets::DPI_RESERVED.start),
            lift_off_distance: bytes[offsets::LIFT_OFF],
            lift_off_reserved: array_at(bytes, offsets::LIFT_OFF_RESERVED.start),
            illumination: Illumination {
                effect,
                frequency: bytes[offsets::LED_FREQUENCY],
                brightness: bytes[offsets::LED_BRIGHTNESS],
                profile_id: bytes[offsets::PROFILE_ID],
                colors,
            },
            led_reserved: bytes[offsets::LED_RESERVED],
            trailing_reserved: bytes[offsets::TRAILING_RESERVED],
        })
    }
}

fn write_header(buf: &mut [u8; REPORT_LEN], command: Command) {
    buf[0] = VERSION;
    buf[1..3].copy_from_slice(&SETTINGS_MESSAGE_TYPE);
    buf[offsets::COMMAND] = command as u8;
}

/// Verify the version byte and message type of a report.
pub(crate) fn check_signature(bytes: &[u8], message_type: [u8; 2]) -> Result<()> {
    let actual = array_at::<3>(bytes, 0);
    let expected = [VERSION, message_type[0], message_type[1]];
    if actual != expected {
        return Err(Error::UnexpectedHeader { expected, actual });
    }
    Ok(())
}

/// Copy `N` bytes starting at `at`. Callers have already checked the length.
fn array_at<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

const _: () = assert!(offsets::DPI.end - offsets::DPI.start == DPI_PROFILE_LEN);
const _: () = assert!(offsets::COLORS.end - offsets::COLORS.start == COLOR_COUNT * 3);
