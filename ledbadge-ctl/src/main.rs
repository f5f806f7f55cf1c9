// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Host control tool for the LED badge via USB CDC.
//!
//! Usage:
//!   ledbadge-ctl list
//!   ledbadge-ctl status
//!   ledbadge-ctl --port /dev/ttyACM0 bootloader

mod cli;
mod commands;
mod transport;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args)
}
