// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Platform initialization for the badge.

use ledbadge_common::board::XTAL_FREQ_HZ;
use rp2040_hal as hal;

use crate::boot_key::{BootKey, BootKeyPin};

pub struct Peripherals {
    pub boot_key: BootKey,
    pub usb: UsbPeripherals,
}

pub struct UsbPeripherals {
    pub regs: hal::pac::USBCTRL_REGS,
    pub dpram: hal::pac::USBCTRL_DPRAM,
    pub clock: hal::clocks::UsbClock,
    pub resets: hal::pac::RESETS,
}

/// Bring up clocks and the GPIO bank. Must run before anything touches a pin.
///
/// A clock failure leaves nothing sensible to do, so it panics.
pub fn system_init() -> Peripherals {
    let mut pac = unsafe { hal::pac::Peripherals::steal() };

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap_or_else(|_| defmt::panic!("clock init failed"));

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let key_pin: BootKeyPin = pins.gpio2.reconfigure();

    Peripherals {
        boot_key: BootKey::new(ledbadge_common::BOOT_KEY.line, key_pin),
        usb: UsbPeripherals {
            regs: pac.USBCTRL_REGS,
            dpram: pac.USBCTRL_DPRAM,
            clock: clocks.usb_clock,
            resets: pac.RESETS,
        },
    }
}
