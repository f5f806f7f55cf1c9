// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::transport::Transport;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "ledbadge-ctl")]
#[command(about = "Control tool for the LED badge")]
pub struct Cli {
    /// Serial port (e.g., /dev/ttyACM0). Auto-detected by USB ID when omitted.
    #[arg(short, long)]
    pub port: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List attached badges
    List,

    /// Get badge status
    Status,

    /// Reboot into the ROM USB bootloader for reflashing
    Bootloader,

    /// Reboot back into the badge firmware
    Reboot,
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    if let Commands::List = cli.command {
        return commands::list();
    }

    let mut transport = Transport::open(cli.port.as_deref())?;

    match cli.command {
        Commands::List => unreachable!("handled before opening a port"),
        Commands::Status => commands::status(&mut transport),
        Commands::Bootloader => commands::bootloader(&mut transport),
        Commands::Reboot => commands::reboot(&mut transport),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_port_is_optional() {
        let cli = Cli::try_parse_from(["ledbadge-ctl", "bootloader"]).unwrap();
        assert!(cli.port.is_none());
        assert!(matches!(cli.command, Commands::Bootloader));
    }

    #[test]
    fn test_explicit_port() {
        let cli = Cli::try_parse_from(["ledbadge-ctl", "--port", "/dev/ttyACM3", "status"]).unwrap();
        assert_eq!(cli.port.as_deref(), Some("/dev/ttyACM3"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["ledbadge-ctl"]).is_err());
    }
}
