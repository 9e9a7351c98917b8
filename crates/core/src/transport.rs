//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface. The codecs never touch a transport;
//! the helpers here only move their byte buffers.

use crate::error::{Error, Result};
use crate::frame::{Command, SettingsFrame};
use crate::notify::InboundReport;
use tracing::{debug, trace, warn};

/// Upper bound on inbound reports inspected while waiting for a settings frame.
///
/// The mouse may interleave DPI-changed notifications with its answer.
pub const MAX_INBOUND_REPORTS: usize = 4;

/// Abstraction over raw HID report exchange.
///
/// Implementations must serialize access to one physical device handle.
pub trait HidTransport: Send {
    /// Write one 64-byte report.
    fn write_report(&self, data: &[u8]) -> Result<()>;

    /// Read the next inbound report.
    fn read_report(&self) -> Result<Vec<u8>>;
}

/// Ask the device for its settings and decode the answer.
///
/// DPI-changed notifications and reports with an unknown signature that
/// arrive before the settings frame are skipped.
pub fn request_settings(transport: &dyn HidTransport) -> Result<SettingsFrame> {
    let request = SettingsFrame::get_request();
    trace!(report_hex = format_args!("{:02X?}", request), "Light2 TX");
    transport.write_report(&request)?;

    for attempt in 1..=MAX_INBOUND_REPORTS {
        let raw = transport.read_report()?;
        trace!(report_hex = format_args!("{:02X?}", raw), "Light2 RX");

        match InboundReport::parse(&raw) {
            Ok(InboundReport::Settings(frame)) => return Ok(frame),
            Ok(InboundReport::DpiChanged(report)) => {
                debug!(
                    step = report.step,
                    dpi = %report.dpi,
                    attempt,
                    "Skipping DPI change notification"
                );
            }
            Err(Error::UnexpectedHeader { actual, .. }) => {
                warn!(
                    header = format_args!("{:02X?}", actual),
                    attempt, "Discarding report with unknown signature"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::Timeout(format!(
        "no settings frame within {MAX_INBOUND_REPORTS} inbound reports"
    )))
}

/// Send settings to the device.
///
/// The command byte is always written as [`Command::Set`]; every other byte
/// of the frame, reserved regions included, goes out as encoded.
pub fn apply_settings(transport: &dyn HidTransport, frame: &SettingsFrame) -> Result<()> {
    let outgoing = if frame.command == Command::Set {
        frame.encode()
    } else {
        debug!(command = ?frame.command, "Rewriting command byte to Set");
        SettingsFrame {
            command: Command::Set,
            ..frame.clone()
        }
        .encode()
    };

    trace!(report_hex = format_args!("{:02X?}", outgoing), "Light2 TX");
    transport.write_report(&outgoing)
}

/// A mock HID transport for testing.
///
/// Records written reports and replays queued inbound reports.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock transport that returns preconfigured inbound reports.
    pub struct MockTransport {
        written: Mutex<Vec<Vec<u8>>>,
        inbound: Mutex<VecDeque<Vec<u8>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                inbound: Mutex::new(VecDeque::new()),
            }
        }

        /// Queue a report for the next `read_report` call.
        pub fn push_inbound(&self, report: impl Into<Vec<u8>>) {
            self.inbound.lock().unwrap().push_back(report.into());
        }

        /// All reports written so far, oldest first.
        pub fn written(&self) -> Vec<Vec<u8>> {
            self.written.lock().unwrap().clone()
        }
    }

    impl HidTransport for MockTransport {
        fn write_report(&self, data: &[u8]) -> Result<()> {
            self.written.lock().unwrap().push(data.to_vec());
            Ok(())
        }

        fn read_report(&self) -> Result<Vec<u8>> {
            self.inbound
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Timeout("mock: no inbound report queued".into()))
        }
    }
}
