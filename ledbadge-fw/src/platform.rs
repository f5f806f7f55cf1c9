// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board implementation of the boot platform collaborators.

use ledbadge_common::BootPlatform;

use crate::peripherals::UsbPeripherals;
use crate::{rom, usb_link};

pub struct Platform {
    usb: Option<UsbPeripherals>,
}

impl Platform {
    pub fn new(usb: UsbPeripherals) -> Self {
        Self { usb: Some(usb) }
    }
}

impl BootPlatform for Platform {
    fn enter_bootloader(&mut self) {
        defmt::debug!("Boot key held, entering ROM bootloader");
        rom::enter_bootloader();
    }

    fn init_usb(&mut self) {
        match self.usb.take() {
            Some(usb) => usb_link::init(usb),
            None => defmt::warn!("USB already initialized"),
        }
    }

    fn emit(&mut self, line: &str) {
        defmt::println!("{=str}", line);
    }
}
