//! The `show` shell that platform extensions plug into.
//!
//! Only the parts an extension relies on are here: a top-level `show`
//! command, a `platform` group, and `show version`, which prints the shell's
//! own version before handing over to the platform hook.

use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::registry::{Context, Extension};

/// Host command tree before any extension is loaded.
pub fn command() -> Command {
    Command::new("show")
        .about("Show switch state and platform information")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv)"),
        )
        .subcommand(
            Command::new("platform")
                .about("Show platform-specific hardware info")
                .subcommand_required(true)
                .arg_required_else_help(true),
        )
        .subcommand(
            Command::new("version")
                .about("Show version information")
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Display extensive version information"),
                ),
        )
}

/// The host with one platform extension loaded.
pub struct Host {
    cli: Command,
    extension: Extension,
}

impl Host {
    /// Build the command tree and register `extension` into it.
    pub fn load(extension: Extension) -> crate::error::Result<Self> {
        let mut cli = command();
        extension.register(&mut cli)?;
        Ok(Self { cli, extension })
    }

    pub fn cli(&self) -> &Command {
        &self.cli
    }

    /// Parse `args` against the loaded command tree.
    pub fn try_parse<I, T>(&self, args: I) -> std::result::Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        self.cli.clone().try_get_matches_from(args)
    }

    /// Run whatever the command line selected.
    pub fn run(&self, matches: &ArgMatches, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(result) = self.extension.dispatch(matches, ctx) {
            return result;
        }

        match matches.subcommand() {
            Some(("version", sub)) => self.version(sub.get_flag("verbose"), ctx),
            Some((name, _)) => bail!("'{}' has no handler", name),
            None => Ok(()),
        }
    }

    fn version(&self, verbose: bool, ctx: &mut Context<'_>) -> Result<()> {
        writeln!(ctx.out, "Software Version: {}", env!("CARGO_PKG_VERSION"))?;
        if let Some(hook) = self.extension.version {
            hook(verbose, ctx)?;
        }
        Ok(())
    }
}
