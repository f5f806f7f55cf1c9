// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and logic for the ledbadge firmware and its host tool.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for the firmware
//! - `std` feature: Enables `std` support for host tools

#![cfg_attr(not(feature = "std"), no_std)]

pub mod board;
pub mod boot_mode;
pub mod framing;
pub mod protocol;

// Re-export commonly used types
pub use boot_mode::{
    BootDecision, BootOutcome, BootPlatform, BootSelector, InputLine, InputSampler, Polarity, Pull,
    BOOT_BANNER,
};
pub use framing::{write_bounded, FrameDecoder, FrameEvent, FrameSink, WriteStep};
pub use protocol::{AckStatus, Command, RebootTarget, Response};
pub use protocol::{MAX_FRAME_SIZE, USB_PID, USB_VID};

pub use board::{BOOT_KEY, BOOT_KEY_GPIO};
