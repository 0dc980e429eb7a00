//! `show platform inventory` - delegates to the inventory module.

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::config::Config;
use crate::process::Cmd;
use crate::registry::Context;

/// Python module that prints the platform inventory.
pub const INVENTORY_MODULE: &str = "cisco.bin.inventory";

pub fn command() -> Command {
    Command::new("inventory")
        .about("Show platform inventory information")
}

/// The inventory command line for `config`.
pub fn inventory_cmd(config: &Config) -> Cmd {
    Cmd::from_path(&config.python)
        .args(["-m", INVENTORY_MODULE, "show"])
}

/// Execute the inventory command.
pub fn cmd_inventory(_matches: &ArgMatches, ctx: &mut Context<'_>) -> Result<()> {
    inventory_cmd(ctx.config).invoke(ctx.out);
    Ok(())
}
