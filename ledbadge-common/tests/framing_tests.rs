// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for bounded frame writes.

use ledbadge_common::framing::{write_bounded, FrameSink, WriteStep};

/// Sink that accepts up to `room` bytes, then blocks until `drain_per_stall`
/// frees more space on each stall.
struct FakeSink {
    room: usize,
    drain_per_stall: usize,
    fail: bool,
    written: Vec<u8>,
    stalls: u32,
}

impl FakeSink {
    fn new(room: usize, drain_per_stall: usize) -> Self {
        Self {
            room,
            drain_per_stall,
            fail: false,
            written: Vec::new(),
            stalls: 0,
        }
    }
}

impl FrameSink for FakeSink {
    fn write(&mut self, bytes: &[u8]) -> WriteStep {
        if self.fail {
            return WriteStep::Failed;
        }
        if self.room == 0 {
            return WriteStep::WouldBlock;
        }
        let n = bytes.len().min(self.room);
        self.written.extend_from_slice(&bytes[..n]);
        self.room -= n;
        WriteStep::Wrote(n)
    }

    fn stall(&mut self) {
        self.stalls += 1;
        self.room += self.drain_per_stall;
    }
}

/// Sink that reports success without taking any bytes.
struct ZeroSink {
    stalls: u32,
}

impl FrameSink for ZeroSink {
    fn write(&mut self, _bytes: &[u8]) -> WriteStep {
        WriteStep::Wrote(0)
    }

    fn stall(&mut self) {
        self.stalls += 1;
    }
}

const FRAME: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 0];

#[test]
fn test_write_bounded_sends_whole_frame_when_room() {
    let mut sink = FakeSink::new(64, 0);
    assert!(write_bounded(&mut sink, &FRAME, 10));
    assert_eq!(sink.written, FRAME);
    assert_eq!(sink.stalls, 0);
}

#[test]
fn test_write_bounded_resumes_after_stalls() {
    let mut sink = FakeSink::new(3, 2);
    assert!(write_bounded(&mut sink, &FRAME, 10));
    assert_eq!(sink.written, FRAME);
    assert_eq!(sink.stalls, 3);
}

#[test]
fn test_write_bounded_gives_up_when_host_stops_reading() {
    // Buffer full and never drained: must return instead of spinning.
    let mut sink = FakeSink::new(2, 0);
    assert!(!write_bounded(&mut sink, &FRAME, 100));
    assert_eq!(sink.written, &FRAME[..2]);
    assert_eq!(sink.stalls, 100);
}

#[test]
fn test_write_bounded_zero_stall_budget() {
    let mut sink = FakeSink::new(0, 8);
    assert!(!write_bounded(&mut sink, &FRAME, 0));
    assert!(sink.written.is_empty());
    assert_eq!(sink.stalls, 0);
}

#[test]
fn test_write_bounded_stops_on_failure() {
    let mut sink = FakeSink::new(64, 0);
    sink.fail = true;
    assert!(!write_bounded(&mut sink, &FRAME, 100));
    assert_eq!(sink.stalls, 0);
}

#[test]
fn test_write_bounded_counts_zero_length_writes_as_stalls() {
    let mut sink = ZeroSink { stalls: 0 };
    assert!(!write_bounded(&mut sink, &FRAME, 5));
    assert_eq!(sink.stalls, 5);
}

#[test]
fn test_write_bounded_empty_frame_is_trivially_sent() {
    let mut sink = FakeSink::new(0, 0);
    assert!(write_bounded(&mut sink, &[], 0));
}
