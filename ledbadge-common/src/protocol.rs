// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Shared protocol types for badge <-> host communication over USB CDC.
//!
//! Frames are postcard-encoded and COBS-delimited with `0x00`. The types work
//! in both `no_std` (firmware) and `std` (host) builds.

#[cfg(feature = "std")]
extern crate alloc;

use serde::{Deserialize, Serialize};

use crate::boot_mode::BOOT_BANNER;

// --- USB identity ---

pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0xD035;
pub const USB_MANUFACTURER: &str = "ledbadge";
pub const USB_PRODUCT: &str = "LED Badge";
pub const USB_SERIAL_NUMBER: &str = "LB0001";

/// Firmware version reported in [`Response::Status`].
pub const FIRMWARE_VERSION: u32 = 1;

// --- Framing ---

/// Largest encoded frame either side will accept, delimiter excluded.
pub const MAX_FRAME_SIZE: usize = 64;

/// Capacity of the banner string in a status response.
pub const BANNER_CAPACITY: usize = 16;

#[cfg(not(feature = "std"))]
pub type Banner = heapless::String<BANNER_CAPACITY>;
#[cfg(feature = "std")]
pub type Banner = alloc::string::String;

// --- Command / Response protocol ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetStatus,
    Reboot { target: RebootTarget },
}

/// Where a reboot should land.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootTarget {
    /// The ROM USB bootloader, ready for reflashing.
    Bootloader,
    /// A plain reset back into this firmware.
    Application,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Response {
    Ack(AckStatus),
    Status { banner: Banner, version: u32 },
}

impl Response {
    /// Status response carrying the boot banner and [`FIRMWARE_VERSION`].
    pub fn status() -> Self {
        let mut banner = Banner::new();
        // The banner is a compile-time constant shorter than the capacity.
        let _ = banner.push_str(BOOT_BANNER);
        Response::Status {
            banner,
            version: FIRMWARE_VERSION,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    Ok,
    BadCommand,
}
