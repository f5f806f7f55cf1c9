// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! USB CDC control link, serviced from the USBCTRL interrupt.
//!
//! The host can query status and ask for a reboot, either into the ROM
//! bootloader or back into this firmware. Frames are COBS-delimited postcard.

use ledbadge_common::protocol::{
    AckStatus, Command, RebootTarget, Response, MAX_FRAME_SIZE, USB_MANUFACTURER, USB_PID,
    USB_PRODUCT, USB_SERIAL_NUMBER, USB_VID,
};
use ledbadge_common::{write_bounded, FrameDecoder, FrameEvent, FrameSink, WriteStep};
use rp2040_hal as hal;
use rp2040_hal::pac::interrupt;
use rp2040_hal::usb::UsbBus;
use usb_device::class_prelude::UsbBusAllocator;
use usb_device::prelude::*;
use usbd_serial::SerialPort;

use crate::peripherals::UsbPeripherals;
use crate::rom;

/// Polls granted to one response before it is dropped. The link is serviced
/// from the interrupt, so a host that stops reading must not wedge it.
const MAX_TX_STALLS: u32 = 100;

/// Static storage for UsbBusAllocator (required by usb-device for 'static lifetime).
static mut USB_BUS: Option<UsbBusAllocator<UsbBus>> = None;

/// Written once in [`init`] before the interrupt is unmasked, then only
/// touched from `USBCTRL_IRQ`.
static mut USB_LINK: Option<UsbLink> = None;

pub struct UsbLink {
    serial: SerialPort<'static, UsbBus>,
    usb_dev: UsbDevice<'static, UsbBus>,
    decoder: FrameDecoder<MAX_FRAME_SIZE>,
}

impl UsbLink {
    fn new(usb_bus: &'static UsbBusAllocator<UsbBus>) -> Self {
        let serial = SerialPort::new(usb_bus);
        let usb_dev = UsbDeviceBuilder::new(usb_bus, UsbVidPid(USB_VID, USB_PID))
            .strings(&[StringDescriptors::default()
                .manufacturer(USB_MANUFACTURER)
                .product(USB_PRODUCT)
                .serial_number(USB_SERIAL_NUMBER)])
            .unwrap_or_else(|_| defmt::panic!("too many USB string descriptors"))
            .device_class(usbd_serial::USB_CLASS_CDC)
            .build();

        Self {
            serial,
            usb_dev,
            decoder: FrameDecoder::new(),
        }
    }

    /// Poll the device and handle every complete frame that arrived.
    fn service(&mut self) {
        self.usb_dev.poll(&mut [&mut self.serial]);

        let mut tmp = [0u8; 64];
        let count = match self.serial.read(&mut tmp) {
            Ok(count) => count,
            Err(_) => return,
        };

        // One BadCommand per chunk, however many corrupt frames it held.
        let mut nacked = false;
        for &byte in &tmp[..count] {
            match self.decoder.push::<Command>(byte) {
                Some(FrameEvent::Frame(cmd)) => self.handle_command(cmd),
                Some(FrameEvent::Corrupt) => {
                    defmt::warn!("Dropping malformed frame");
                    if !nacked {
                        nacked = true;
                        self.send(&Response::Ack(AckStatus::BadCommand));
                    }
                }
                None => {}
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::GetStatus => self.send(&Response::status()),
            Command::Reboot { target } => {
                self.send(&Response::Ack(AckStatus::Ok));
                self.flush();
                match target {
                    RebootTarget::Bootloader => {
                        defmt::debug!("Host requested ROM bootloader");
                        rom::enter_bootloader();
                        rom::halt();
                    }
                    RebootTarget::Application => {
                        defmt::debug!("Host requested reset");
                        cortex_m::peripheral::SCB::sys_reset();
                    }
                }
            }
        }
    }

    /// Send a response as a COBS-framed postcard message.
    ///
    /// Dropped when no host holds the port open, or when the host stops
    /// draining the endpoint.
    fn send(&mut self, resp: &Response) {
        if !self.serial.dtr() {
            return;
        }

        let mut buf = [0u8; MAX_FRAME_SIZE + 1];
        let Ok(encoded) = postcard::to_slice_cobs(resp, &mut buf) else {
            return;
        };

        if !write_bounded(self, encoded, MAX_TX_STALLS) {
            defmt::warn!("Host not reading, response dropped");
        }
    }

    /// Keep the bus alive long enough for the last response to leave.
    fn flush(&mut self) {
        for _ in 0..100 {
            self.usb_dev.poll(&mut [&mut self.serial]);
            let _ = self.serial.flush();
            cortex_m::asm::delay(10_000);
        }
    }
}

impl FrameSink for UsbLink {
    fn write(&mut self, bytes: &[u8]) -> WriteStep {
        match self.serial.write(bytes) {
            Ok(n) => WriteStep::Wrote(n),
            Err(UsbError::WouldBlock) => WriteStep::WouldBlock,
            Err(_) => WriteStep::Failed,
        }
    }

    fn stall(&mut self) {
        self.usb_dev.poll(&mut [&mut self.serial]);
    }
}

/// Enable the USB controller, publish the link and unmask its interrupt.
pub fn init(mut usb: UsbPeripherals) {
    let usb_bus = UsbBusAllocator::new(hal::usb::UsbBus::new(
        usb.regs,
        usb.dpram,
        usb.clock,
        true,
        &mut usb.resets,
    ));

    let usb_bus: &'static UsbBusAllocator<UsbBus> = unsafe {
        USB_BUS = Some(usb_bus);
        match (*core::ptr::addr_of!(USB_BUS)).as_ref() {
            Some(bus) => bus,
            None => defmt::unreachable!(),
        }
    };

    let link = UsbLink::new(usb_bus);
    unsafe {
        USB_LINK = Some(link);
        cortex_m::peripheral::NVIC::unmask(hal::pac::Interrupt::USBCTRL_IRQ);
    }
}

#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    // Sole accessor once init() has unmasked the interrupt.
    if let Some(link) = unsafe { (*core::ptr::addr_of_mut!(USB_LINK)).as_mut() } {
        link.service();
    }
}
