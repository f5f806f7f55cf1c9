// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Byte-stream reassembly of COBS-delimited postcard frames.
//!
//! USB CDC delivers bytes in arbitrary chunks. [`FrameDecoder`] collects them
//! until a `0x00` delimiter arrives and then decodes the frame.

use serde::de::DeserializeOwned;

/// Result of feeding one byte to a [`FrameDecoder`].
#[derive(Debug, PartialEq, Eq)]
pub enum FrameEvent<T> {
    /// Delimiter seen and the frame decoded.
    Frame(T),
    /// Delimiter seen but the frame did not decode, or it overflowed.
    Corrupt,
}

/// Accumulates one frame of at most `N` encoded bytes.
pub struct FrameDecoder<const N: usize> {
    buf: [u8; N],
    pos: usize,
    overflowed: bool,
}

impl<const N: usize> Default for FrameDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameDecoder<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            pos: 0,
            overflowed: false,
        }
    }

    /// Feed one byte. Returns an event when a delimiter closes a frame.
    ///
    /// Empty frames (back-to-back delimiters) are ignored.
    pub fn push<T: DeserializeOwned>(&mut self, byte: u8) -> Option<FrameEvent<T>> {
        if byte != 0x00 {
            if self.pos < N {
                self.buf[self.pos] = byte;
                self.pos += 1;
            } else {
                self.overflowed = true;
            }
            return None;
        }

        let len = self.pos;
        let overflowed = self.overflowed;
        self.pos = 0;
        self.overflowed = false;

        if overflowed {
            return Some(FrameEvent::Corrupt);
        }
        if len == 0 {
            return None;
        }

        match postcard::from_bytes_cobs::<T>(&mut self.buf[..len]) {
            Ok(value) => Some(FrameEvent::Frame(value)),
            Err(_) => Some(FrameEvent::Corrupt),
        }
    }

    /// Bytes buffered for the frame in progress.
    pub fn pending(&self) -> usize {
        self.pos
    }
}

/// Outcome of one write attempt on a [`FrameSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStep {
    /// This many bytes were accepted.
    Wrote(usize),
    /// No room right now.
    WouldBlock,
    /// The link is unusable.
    Failed,
}

/// Byte sink that can stall, such as a USB CDC endpoint.
pub trait FrameSink {
    fn write(&mut self, bytes: &[u8]) -> WriteStep;

    /// Give the link a chance to drain after [`WriteStep::WouldBlock`].
    fn stall(&mut self);
}

/// Write `frame` to `sink`, tolerating at most `max_stalls` stalls.
/// A zero-length write counts as a stall.
///
/// Returns `true` when the whole frame went out. On give-up the rest of the
/// frame is dropped, so a host that stops reading cannot wedge the caller.
pub fn write_bounded<S: FrameSink>(sink: &mut S, frame: &[u8], max_stalls: u32) -> bool {
    let mut offset = 0;
    let mut stalls = 0;

    while offset < frame.len() {
        match sink.write(&frame[offset..]) {
            WriteStep::Wrote(n) if n > 0 => offset += n,
            WriteStep::Wrote(_) | WriteStep::WouldBlock if stalls < max_stalls => {
                stalls += 1;
                sink.stall();
            }
            _ => return false,
        }
    }

    true
}
