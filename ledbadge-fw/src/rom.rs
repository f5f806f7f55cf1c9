// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Hand-off to the RP2040 ROM USB bootloader.

use rp2040_hal as hal;

/// Reset into the ROM USB bootloader (mass storage and PICOBOOT enabled).
///
/// The ROM call does not come back on working silicon. It is typed as
/// returning, so callers must follow it with [`halt`].
pub fn enter_bootloader() {
    cortex_m::interrupt::disable();
    hal::rom_data::reset_to_usb_boot(0, 0);
}

/// Park the core with interrupts off.
pub fn halt() -> ! {
    cortex_m::interrupt::disable();
    loop {
        cortex_m::asm::nop();
    }
}
