// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED badge firmware entry point.
//!
//! Holding the boot key at power-up drops into the RP2040 ROM USB bootloader
//! for reflashing. Otherwise USB comes up and the firmware idles.

#![no_std]
#![no_main]

mod boot_key;
mod peripherals;
mod platform;
mod rom;
mod usb_link;

use defmt_rtt as _;
use ledbadge_common::{BootOutcome, BOOT_KEY};
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

#[entry]
fn main() -> ! {
    defmt::debug!("ledbadge init");

    let p = peripherals::system_init();
    let mut boot_key = p.boot_key;
    let mut platform = platform::Platform::new(p.usb);

    match BOOT_KEY.run(&mut boot_key, &mut platform) {
        BootOutcome::Halted => {
            defmt::debug!("ROM bootloader returned, halting");
            rom::halt();
        }
        outcome @ BootOutcome::Idle => outcome.hold(),
    }
}
