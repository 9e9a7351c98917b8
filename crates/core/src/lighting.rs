//! Illumination settings carried inside the settings frame.
//!
//! These fields have no wire framing of their own; the frame codec reads and
//! writes them at fixed offsets.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of configurable colors.
pub const COLOR_COUNT: usize = 7;

/// LED effect selected on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum LedEffect {
    #[default]
    Cycle = 0,
    Pulsating = 1,
    Permanent = 2,
    ColorChange = 3,
    SingleMarquee = 4,
    MultiMarquee = 5,
    Ripple = 6,
    Trigger = 7,
    Heartbeat = 8,
    Off = 9,
}

impl LedEffect {
    /// All effects in wire order.
    pub const ALL: &'static [LedEffect] = &[
        LedEffect::Cycle,
        LedEffect::Pulsating,
        LedEffect::Permanent,
        LedEffect::ColorChange,
        LedEffect::SingleMarquee,
        LedEffect::MultiMarquee,
        LedEffect::Ripple,
        LedEffect::Trigger,
        LedEffect::Heartbeat,
        LedEffect::Off,
    ];

    /// Map a wire byte to an effect.
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            0 => Ok(Self::Cycle),
            1 => Ok(Self::Pulsating),
            2 => Ok(Self::Permanent),
            3 => Ok(Self::ColorChange),
            4 => Ok(Self::SingleMarquee),
            5 => Ok(Self::MultiMarquee),
            6 => Ok(Self::Ripple),
            7 => Ok(Self::Trigger),
            8 => Ok(Self::Heartbeat),
            9 => Ok(Self::Off),
            other => Err(Error::UnknownEnum {
                field: "led_effect",
                value: other,
            }),
        }
    }

    /// Wire byte for this effect.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cycle => "Cycle",
            Self::Pulsating => "Pulsating",
            Self::Permanent => "Permanent",
            Self::ColorChange => "Color Change",
            Self::SingleMarquee => "Single Marquee",
            Self::MultiMarquee => "Multi Marquee",
            Self::Ripple => "Ripple",
            Self::Trigger => "Trigger",
            Self::Heartbeat => "Heartbeat",
            Self::Off => "Off",
        }
    }
}

impl TryFrom<u8> for LedEffect {
    type Error = Error;

    fn try_from(b: u8) -> Result<Self> {
        Self::from_byte(b)
    }
}

impl std::fmt::Display for LedEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Plain RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

/// Illumination fields of the settings frame.
///
/// Frequency (observed 0–2, lower is faster) and brightness (observed 0–10)
/// are passed through as raw bytes; so is `profile_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Illumination {
    pub effect: LedEffect,
    pub frequency: u8,
    pub brightness: u8,
    /// Onboard profile the lighting applies to.
    pub profile_id: u8,
    pub colors: [RgbColor; COLOR_COUNT],
}

impl Default for Illumination {
    fn default() -> Self {
        Self {
            effect: LedEffect::Cycle,
            frequency: 1,
            brightness: 10,
            profile_id: 1,
            colors: [RgbColor::BLACK; COLOR_COUNT],
        }
    }
}
