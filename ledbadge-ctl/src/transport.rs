// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial transport layer for badge communication.

use anyhow::{bail, Context, Result};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::io::{Read, Write};
use std::time::Duration;

use ledbadge_common::protocol::{Command, Response, MAX_FRAME_SIZE, USB_PID, USB_VID};
use ledbadge_common::{FrameDecoder, FrameEvent};

/// Default timeout for serial operations in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Whether a USB VID/PID pair belongs to the badge.
pub fn is_badge(vid: u16, pid: u16) -> bool {
    vid == USB_VID && pid == USB_PID
}

/// Names of the serial ports enumerated as the badge.
pub fn badge_ports(ports: &[SerialPortInfo]) -> Vec<String> {
    ports
        .iter()
        .filter(|info| match &info.port_type {
            SerialPortType::UsbPort(usb) => is_badge(usb.vid, usb.pid),
            _ => false,
        })
        .map(|info| info.port_name.clone())
        .collect()
}

/// Find the first attached badge.
pub fn find_badge() -> Result<String> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    match badge_ports(&ports).into_iter().next() {
        Some(name) => Ok(name),
        None => bail!(
            "Badge not found (no serial port with USB ID {:04x}:{:04x})",
            USB_VID,
            USB_PID
        ),
    }
}

/// How long stale bytes are drained before each request.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);

/// Read bytes from `reader` until one response frame is complete.
///
/// Empty frames are skipped; a frame that does not decode or overruns
/// [`MAX_FRAME_SIZE`] is an error.
pub fn read_response<R: Read + ?Sized>(
    reader: &mut R,
    decoder: &mut FrameDecoder<MAX_FRAME_SIZE>,
) -> Result<Response> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(1) => match decoder.push::<Response>(byte[0]) {
                Some(FrameEvent::Frame(response)) => return Ok(response),
                Some(FrameEvent::Corrupt) => bail!("Malformed response frame"),
                None => {}
            },
            Ok(_) => bail!("Serial port closed"),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                bail!("Timeout waiting for response");
            }
            Err(e) => bail!("Serial read error: {}", e),
        }
    }
}

/// Request/response link to the badge over its CDC serial port.
pub struct Transport {
    port: Box<dyn SerialPort>,
    decoder: FrameDecoder<MAX_FRAME_SIZE>,
}

impl Transport {
    /// Open `port_name`, or the first attached badge when `None`.
    pub fn open(port_name: Option<&str>) -> Result<Self> {
        let name = match port_name {
            Some(name) => name.to_string(),
            None => find_badge()?,
        };

        // CDC ignores the baud rate; any value opens the port.
        let port = serialport::new(&name, 115200)
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .open()
            .with_context(|| format!("Failed to open serial port {}", name))?;

        Ok(Self {
            port,
            decoder: FrameDecoder::new(),
        })
    }

    pub fn port_name(&self) -> String {
        self.port.name().unwrap_or_else(|| "?".to_string())
    }

    fn send(&mut self, cmd: &Command) -> Result<()> {
        let mut buf = [0u8; MAX_FRAME_SIZE + 1];
        let encoded = postcard::to_slice_cobs(cmd, &mut buf)
            .map_err(|e| anyhow::anyhow!("Failed to serialize command: {}", e))?;
        self.port
            .write_all(encoded)
            .context("Failed to write to serial port")?;
        self.port.flush()?;
        Ok(())
    }

    /// Throw away anything the badge sent before this request, including a
    /// half-received frame.
    fn discard_stale_input(&mut self) {
        let mut buf = [0u8; 64];
        let timeout = self.port.timeout();
        let _ = self.port.set_timeout(DRAIN_TIMEOUT);
        while self.port.read(&mut buf).unwrap_or(0) > 0 {}
        let _ = self.port.set_timeout(timeout);
        self.decoder = FrameDecoder::new();
    }

    /// Issue `cmd` and wait for the badge's answer.
    pub fn send_recv(&mut self, cmd: &Command) -> Result<Response> {
        self.discard_stale_input();
        self.send(cmd)?;
        read_response(&mut *self.port, &mut self.decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_badge_matches_usb_id() {
        assert!(is_badge(0x1209, 0xD035));
        assert!(!is_badge(0x1209, 0xD036));
        assert!(!is_badge(0x2E8A, 0xD035));
    }

    #[test]
    fn test_badge_ports_skips_non_usb_ports() {
        let ports = vec![
            SerialPortInfo {
                port_name: "/dev/ttyS0".to_string(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "/dev/ttyAMA0".to_string(),
                port_type: SerialPortType::PciPort,
            },
        ];
        assert!(badge_ports(&ports).is_empty());
    }

    fn frame(resp: &Response) -> Vec<u8> {
        let mut buf = [0u8; MAX_FRAME_SIZE + 1];
        postcard::to_slice_cobs(resp, &mut buf).unwrap().to_vec()
    }

    #[test]
    fn test_read_response_skips_leading_delimiters() {
        let mut bytes = vec![0x00, 0x00];
        bytes.extend(frame(&Response::status()));
        let mut reader = std::io::Cursor::new(bytes);
        let mut decoder = FrameDecoder::new();

        let response = read_response(&mut reader, &mut decoder).unwrap();
        assert_eq!(response, Response::status());
    }

    #[test]
    fn test_read_response_rejects_oversize_frame() {
        let bytes = vec![0x01u8; MAX_FRAME_SIZE + 8]
            .into_iter()
            .chain([0x00])
            .collect::<Vec<_>>();
        let mut reader = std::io::Cursor::new(bytes);
        let mut decoder = FrameDecoder::new();

        let err = read_response(&mut reader, &mut decoder).unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn test_read_response_reports_closed_port() {
        let mut reader = std::io::Cursor::new(vec![0x02u8, 0x01]);
        let mut decoder = FrameDecoder::new();

        let err = read_response(&mut reader, &mut decoder).unwrap_err();
        assert!(err.to_string().contains("closed"));
    }
}
