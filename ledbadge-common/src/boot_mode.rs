// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Boot mode selection - pure logic without hardware dependencies.
//!
//! At power-up the firmware samples the boot key once and takes exactly one of
//! two terminal paths: re-enter the ROM USB bootloader, or bring up the USB
//! interface and idle. Hardware access goes through [`InputSampler`] and
//! [`BootPlatform`] so the decision can be exercised on the host with fakes.

/// Number of user GPIO lines in RP2040 bank 0.
pub const GPIO_LINE_COUNT: u8 = 30;

/// Line emitted on the diagnostic channel once the application path is up.
pub const BOOT_BANNER: &str = "ledbadge";

/// Pull resistor direction for an input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
}

/// Which logical level means "asserted" on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Pressed reads as low (button to ground, pull-up).
    ActiveLow,
    /// Pressed reads as high (button to supply, pull-down).
    ActiveHigh,
}

impl Polarity {
    /// Translate a raw pin level into an asserted/not-asserted flag.
    pub fn is_asserted(self, level: bool) -> bool {
        match self {
            Polarity::ActiveLow => !level,
            Polarity::ActiveHigh => level,
        }
    }
}

/// Identifier of one physical digital input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputLine(u8);

impl InputLine {
    /// Create a line identifier.
    ///
    /// Panics if `id` is not a bank 0 GPIO. In a `const` item this turns into
    /// a compile error, which is where a bad pin number belongs.
    pub const fn new(id: u8) -> Self {
        assert!(id < GPIO_LINE_COUNT, "GPIO line out of range");
        Self(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

/// Outcome of sampling the boot key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootDecision {
    EnterBootloader,
    ContinueApplication,
}

/// Terminal state reached by [`BootSelector::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootOutcome {
    /// The bootloader transfer came back. Nothing after it is safe to run.
    Halted,
    /// USB is up and the banner went out; nothing left to do.
    Idle,
}

impl BootOutcome {
    /// Hold the processor forever. Both terminal states end here.
    pub fn hold(self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Digital input capability used by the selector.
pub trait InputSampler {
    /// Configure `line` as an input with the given pull. Called once, before
    /// any [`read_level`](Self::read_level).
    fn configure_input(&mut self, line: InputLine, pull: Pull);

    /// Instantaneous logical level of `line`. No inversion is applied.
    fn read_level(&mut self, line: InputLine) -> bool;
}

/// Platform collaborators reached from the two terminal paths.
pub trait BootPlatform {
    /// Hand the processor to the ROM bootloader. On hardware this does not
    /// return; if it does, the selector stops in [`BootOutcome::Halted`].
    fn enter_bootloader(&mut self);

    /// Bring up the USB device interface.
    fn init_usb(&mut self);

    /// Write one line to the diagnostic channel. Failures are swallowed.
    fn emit(&mut self, line: &str);
}

/// The boot key configuration and the single decision made from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootSelector {
    pub line: InputLine,
    pub pull: Pull,
    pub polarity: Polarity,
}

impl BootSelector {
    pub const fn new(line: InputLine, pull: Pull, polarity: Polarity) -> Self {
        Self {
            line,
            pull,
            polarity,
        }
    }

    /// Active-low key with the internal pull-up, the usual "BOOT" button wiring.
    pub const fn active_low(line: InputLine) -> Self {
        Self::new(line, Pull::Up, Polarity::ActiveLow)
    }

    /// Map a sampled level to a decision.
    pub fn decide(&self, level: bool) -> BootDecision {
        if self.polarity.is_asserted(level) {
            BootDecision::EnterBootloader
        } else {
            BootDecision::ContinueApplication
        }
    }

    /// Sample the key once and take exactly one terminal path.
    pub fn run<S, P>(&self, sampler: &mut S, platform: &mut P) -> BootOutcome
    where
        S: InputSampler,
        P: BootPlatform,
    {
        sampler.configure_input(self.line, self.pull);
        let level = sampler.read_level(self.line);

        match self.decide(level) {
            BootDecision::EnterBootloader => {
                platform.enter_bootloader();
                BootOutcome::Halted
            }
            BootDecision::ContinueApplication => {
                platform.init_usb();
                platform.emit(BOOT_BANNER);
                BootOutcome::Idle
            }
        }
    }
}
