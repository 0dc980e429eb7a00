//! `show npu` commands.

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::registry::Context;

pub const NPU_STATUS: &str = "NPU status: not supported on this platform";

/// The `npu` group itself; handlers attach beneath it.
pub fn group() -> Command {
    Command::new("npu")
        .about("Show NPU information")
        .subcommand_required(true)
        .arg_required_else_help(true)
}

pub fn status_command() -> Command {
    Command::new("status").about("Show NPU status")
}

/// Execute `npu status`.
pub fn cmd_status(_matches: &ArgMatches, ctx: &mut Context<'_>) -> Result<()> {
    writeln!(ctx.out, "{}", NPU_STATUS)?;
    Ok(())
}
