// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for badge operations.

use std::io::Write;

use anyhow::{bail, Context, Result};

use ledbadge_common::protocol::{AckStatus, Command, RebootTarget, Response};

use crate::transport::{self, Transport};

/// List serial ports that enumerate as the badge.
pub fn list() -> Result<()> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    let badges = transport::badge_ports(&ports);

    if badges.is_empty() {
        println!("No badge found");
    }
    for name in badges {
        println!("{}", name);
    }

    Ok(())
}

/// Get and display badge status.
pub fn status(transport: &mut Transport) -> Result<()> {
    let response = transport.send_recv(&Command::GetStatus)?;

    match response {
        Response::Status { banner, version } => {
            println!("Badge Status:");
            println!("  Port:     {}", transport.port_name());
            println!("  Firmware: {} v{}", banner, version);
        }
        Response::Ack(status) => {
            println!("Unexpected ACK response: {:?}", status);
        }
    }

    Ok(())
}

/// Reboot the badge into the ROM USB bootloader.
pub fn bootloader(transport: &mut Transport) -> Result<()> {
    print!("Rebooting to bootloader... ");
    std::io::stdout().flush()?;

    reboot_to(transport, RebootTarget::Bootloader)?;

    println!("OK");
    println!("The badge now enumerates as the RP2040 USB boot device.");
    Ok(())
}

/// Reboot the badge back into its firmware.
pub fn reboot(transport: &mut Transport) -> Result<()> {
    print!("Rebooting device... ");
    std::io::stdout().flush()?;

    reboot_to(transport, RebootTarget::Application)?;

    println!("OK");
    Ok(())
}

fn reboot_to(transport: &mut Transport, target: RebootTarget) -> Result<()> {
    let response = transport.send_recv(&Command::Reboot { target })?;

    match response {
        Response::Ack(AckStatus::Ok) => Ok(()),
        Response::Ack(status) => bail!("Reboot failed: {:?}", status),
        _ => bail!("Unexpected response: {:?}", response),
    }
}
