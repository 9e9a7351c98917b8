//! Named settings snapshots stored as JSON.

use crate::error::{Error, Result};
use crate::frame::SettingsFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A saved mouse configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile display name.
    pub name: String,
    /// Full settings frame, reserved bytes included.
    pub settings: SettingsFrame,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            settings: SettingsFrame::default(),
        }
    }
}

impl Profile {
    pub fn new(name: impl Into<String>, settings: SettingsFrame) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Profile(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Profile(e.to_string()))
    }
}

/// Write a profile to `path`, replacing any existing file.
pub fn save_profile(profile: &Profile, path: &Path) -> Result<()> {
    let json = profile.to_json()?;
    std::fs::write(path, json)
        .map_err(|e| Error::Profile(format!("write {}: {e}", path.display())))?;
    debug!(name = %profile.name, path = %path.display(), "Profile saved");
    Ok(())
}

/// Read a profile from `path`.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| Error::Profile(format!("read {}: {e}", path.display())))?;
    let profile = Profile::from_json(&json)?;
    debug!(name = %profile.name, path = %path.display(), "Profile loaded");
    Ok(profile)
}
