//! [`HidTransport`] backed by a hidapi device handle.
//!
//! Opening the right handle is the caller's job. On the Light2 200 the
//! settings reports travel over interface [`crate::DATA_INTERFACE`]; the
//! version byte 0x04 doubles as the HID report ID, so reports are written
//! unchanged.

use crate::error::{Error, Result};
use crate::transport::HidTransport;
use crate::REPORT_LEN;
use std::ffi::CStr;
use std::sync::Mutex;
use tracing::debug;

/// Default read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: i32 = 500;

/// A hidapi device wrapped so that writes and reads on it are serialized.
pub struct HidapiTransport {
    device: Mutex<hidapi::HidDevice>,
    read_timeout_ms: i32,
}

impl HidapiTransport {
    pub fn new(device: hidapi::HidDevice) -> Self {
        Self {
            device: Mutex::new(device),
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Open the device node at `path` (as listed by hidapi).
    pub fn open_path(api: &hidapi::HidApi, path: &CStr) -> Result<Self> {
        let device = api
            .open_path(path)
            .map_err(|e| Error::Hid(format!("open {}: {e}", path.to_string_lossy())))?;
        debug!(path = %path.to_string_lossy(), "Opened Light2 HID interface");
        Ok(Self::new(device))
    }

    pub fn with_read_timeout(mut self, timeout_ms: i32) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, hidapi::HidDevice>> {
        self.device
            .lock()
            .map_err(|_| Error::Hid("device handle lock poisoned".to_string()))
    }
}

impl HidTransport for HidapiTransport {
    fn write_report(&self, data: &[u8]) -> Result<()> {
        let device = self.lock()?;
        let written = device
            .write(data)
            .map_err(|e| Error::Hid(format!("write: {e}")))?;
        if written != data.len() {
            return Err(Error::Hid(format!(
                "short write: {written} of {} bytes",
                data.len()
            )));
        }
        Ok(())
    }

    fn read_report(&self) -> Result<Vec<u8>> {
        let device = self.lock()?;
        let mut response = [0u8; REPORT_LEN];
        let n = device
            .read_timeout(&mut response, self.read_timeout_ms)
            .map_err(|e| Error::Hid(format!("read_timeout: {e}")))?;

        if n == 0 {
            return Err(Error::Timeout(format!(
                "hid_read timed out after {}ms",
                self.read_timeout_ms
            )));
        }

        Ok(response[..n].to_vec())
    }
}
