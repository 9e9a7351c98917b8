//! Integration tests: exercise the full flow using a simulated Light2 200.
//!
//! The simulated device keeps its settings as raw bytes, answers get requests
//! with them and stores whatever set frame it receives, so the tests observe
//! exactly what would reach the firmware.

#[cfg(test)]
mod tests {
    use crate::dpi::DpiValue;
    use crate::error::{Error, Result};
    use crate::frame::{Command, SettingsFrame};
    use crate::lighting::{LedEffect, RgbColor};
    use crate::notify::DpiChangedReport;
    use crate::transport::{apply_settings, request_settings, HidTransport};
    use crate::REPORT_LEN;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct SimulatedLight2 {
        stored: Mutex<[u8; REPORT_LEN]>,
        outbox: Mutex<VecDeque<Vec<u8>>>,
    }

    impl SimulatedLight2 {
        /// Device whose firmware holds `stored`, including its reserved bytes.
        fn with_settings(stored: [u8; REPORT_LEN]) -> Self {
            Self {
                stored: Mutex::new(stored),
                outbox: Mutex::new(VecDeque::new()),
            }
        }

        fn stored(&self) -> [u8; REPORT_LEN] {
            *self.stored.lock().unwrap()
        }

        fn press_dpi_button(&self, step: u8, dpi: DpiValue) {
            self.outbox
                .lock()
                .unwrap()
                .push_back(DpiChangedReport { step, dpi }.encode().to_vec());
        }
    }

    impl HidTransport for SimulatedLight2 {
        fn write_report(&self, data: &[u8]) -> Result<()> {
            if data.len() != REPORT_LEN || data[..3] != [0x04, 0xA0, 0x01] {
                return Err(Error::Hid(format!("device rejected {data:02X?}")));
            }
            match data[3] {
                0x01 => {
                    let reply = self.stored().to_vec();
                    self.outbox.lock().unwrap().push_back(reply);
                }
                0x02 => self.stored.lock().unwrap().copy_from_slice(data),
                other => return Err(Error::Hid(format!("unknown command {other:#04X}"))),
            }
            Ok(())
        }

        fn read_report(&self) -> Result<Vec<u8>> {
            self.outbox
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Timeout("simulated device idle".into()))
        }
    }

    /// Factory settings with firmware-specific content in every reserved region.
    fn firmware_bytes() -> [u8; REPORT_LEN] {
        let mut bytes = SettingsFrame::default().encode();
        bytes[3] = 0x01;
        bytes[4..7].copy_from_slice(&[0x00, 0x00, 0x00]);
        bytes[30..33].copy_from_slice(&[0x5A, 0x01, 0x9C]);
        bytes[34..37].copy_from_slice(&[0x03, 0x11, 0xA5]);
        bytes[41] = 0x01;
        bytes[63] = 0x42;
        bytes
    }

    /// Test: full read→modify→write cycle keeps every unmodeled byte.
    #[test]
    fn read_modify_write_preserves_reserved_bytes() {
        let device = SimulatedLight2::with_settings(firmware_bytes());

        let mut frame = request_settings(&device).unwrap();
        assert_eq!(frame.command, Command::Get);
        frame.dpi.steps[3].value = DpiValue::new(14250, 6800).unwrap();
        frame.dpi.steps[5].enabled = false;
        frame.illumination.effect = LedEffect::Permanent;
        frame.illumination.colors[0] = RgbColor::new(0xFF, 0x80, 0x00);
        apply_settings(&device, &frame).unwrap();

        let stored = device.stored();
        let before = firmware_bytes();
        assert_eq!(stored[3], 0x02);
        assert_eq!(stored[8], 0b0101_1111);
        assert_eq!(&stored[18..21], &[0x10, 0x1D, 0x88]);
        assert_eq!(stored[37], 2);
        assert_eq!(&stored[42..45], &[0xFF, 0x80, 0x00]);
        for i in [4, 5, 6, 30, 31, 32, 34, 35, 36, 41, 63] {
            assert_eq!(stored[i], before[i], "reserved byte {i} changed");
        }

        let reread = request_settings(&device).unwrap();
        assert_eq!(reread.dpi, frame.dpi);
        assert_eq!(reread.illumination, frame.illumination);
    }

    /// Test: unchanged settings are written back byte-for-byte.
    #[test]
    fn unmodified_frame_writes_back_identically() {
        let device = SimulatedLight2::with_settings(SettingsFrame::default().encode());
        let frame = request_settings(&device).unwrap();
        apply_settings(&device, &frame).unwrap();
        assert_eq!(device.stored(), SettingsFrame::default().encode());
    }

    /// Test: a DPI button press racing the get request does not confuse the read.
    #[test]
    fn notification_before_settings_is_skipped() {
        let device = SimulatedLight2::with_settings(SettingsFrame::default().encode());
        device.press_dpi_button(3, DpiValue::new(1200, 1200).unwrap());

        let frame = request_settings(&device).unwrap();
        assert_eq!(frame, SettingsFrame::default());
    }

    /// Test: invalid DPI is rejected at construction, before any frame exists.
    #[test]
    fn invalid_dpi_never_reaches_device() {
        let device = SimulatedLight2::with_settings(SettingsFrame::default().encode());
        let before = device.stored();

        assert!(matches!(
            DpiValue::new(16050, 800),
            Err(Error::OutOfRange { .. })
        ));
        assert_eq!(device.stored(), before);
    }

    /// Test: corrupted firmware state surfaces as a typed error, not a frame.
    #[test]
    fn corrupt_effect_byte_fails_read() {
        let mut bytes = SettingsFrame::default().encode();
        bytes[37] = 0x0C;
        let device = SimulatedLight2::with_settings(bytes);

        assert!(matches!(
            request_settings(&device),
            Err(Error::UnknownEnum {
                field: "led_effect",
                value: 0x0C
            })
        ));
    }

    /// Test: codec calls from many threads need no coordination.
    #[test]
    fn concurrent_codec_use_is_independent() {
        use std::thread;

        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                thread::spawn(move || {
                    let mut frame = SettingsFrame::default();
                    frame.dpi.current_step = i;
                    frame.illumination.brightness = i;
                    for _ in 0..100 {
                        let bytes = frame.encode();
                        let decoded = SettingsFrame::decode(&bytes).unwrap();
                        assert_eq!(decoded, frame);
                    }
                    frame.encode()[7]
                })
            })
            .collect();

        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().expect("thread panicked") as usize, i);
        }
    }

    /// Test: concurrent reads share one device handle safely.
    ///
    /// Every thread writes before it reads, so a reply is always queued.
    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let device = Arc::new(SimulatedLight2::with_settings(
            SettingsFrame::default().encode(),
        ));

        let mut handles = vec![];
        for _ in 0..4 {
            let device_ref = Arc::clone(&device);
            handles.push(thread::spawn(move || {
                let frame = request_settings(device_ref.as_ref()).unwrap();
                assert_eq!(frame, SettingsFrame::default());
            }));
        }

        for h in handles {
            h.join().expect("thread panicked");
        }
    }
}
