// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Boot key sampling on an RP2040 SIO input.

use embedded_hal::digital::InputPin;
use ledbadge_common::{InputLine, InputSampler, Pull};
use rp2040_hal as hal;

pub type BootKeyPin =
    hal::gpio::Pin<hal::gpio::bank0::Gpio2, hal::gpio::FunctionSioInput, hal::gpio::DynPullType>;

/// Pull resistors need a moment to charge the pad before the first read.
const SETTLE_CYCLES: u32 = 1_000;

pub struct BootKey {
    line: InputLine,
    pin: BootKeyPin,
}

impl BootKey {
    pub fn new(line: InputLine, pin: BootKeyPin) -> Self {
        Self { line, pin }
    }

    fn check_line(&self, line: InputLine) {
        assert!(line == self.line, "boot key asked for a GPIO it does not own");
    }
}

impl InputSampler for BootKey {
    fn configure_input(&mut self, line: InputLine, pull: Pull) {
        self.check_line(line);
        self.pin.set_pull_type(match pull {
            Pull::Up => hal::gpio::DynPullType::Up,
            Pull::Down => hal::gpio::DynPullType::Down,
        });
        cortex_m::asm::delay(SETTLE_CYCLES);
    }

    fn read_level(&mut self, line: InputLine) -> bool {
        self.check_line(line);
        match self.pin.is_high() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}
