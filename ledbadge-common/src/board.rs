// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board configuration of the badge.

use crate::boot_mode::{BootSelector, InputLine};

/// GPIO carrying the boot key.
pub const BOOT_KEY_GPIO: u8 = 2;

/// Crystal frequency of the board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

/// The boot key: active-low with the internal pull-up.
pub const BOOT_KEY: BootSelector = BootSelector::active_low(InputLine::new(BOOT_KEY_GPIO));
