//! `show platform idprom` - IDPROM contents via platform.py.
//!
//! The flags are not all compatible with each other or with explicit names.
//! Conflicts are resolved by dropping the weaker flag with a warning; the
//! command always goes on to run the platform tool with what is left.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use crate::process;
use crate::registry::Context;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct IdpromArgs {
    /// IDPROM names to show
    #[arg(value_name = "NAME")]
    pub name: Vec<String>,

    /// Hexdump raw IDPROMs
    #[arg(long, overrides_with_all = ["raw", "no_raw"])]
    pub raw: bool,

    /// Decode IDPROMs (default)
    #[arg(long, overrides_with_all = ["raw", "no_raw"])]
    pub no_raw: bool,

    /// Dump all known IDPROMs
    #[arg(long, overrides_with_all = ["all", "no_all"])]
    pub all: bool,

    /// Only the IDPROMs named or the default set (default)
    #[arg(long, overrides_with_all = ["all", "no_all"])]
    pub no_all: bool,

    /// List known IDPROMs
    #[arg(long, overrides_with_all = ["list", "no_list"])]
    pub list: bool,

    /// Show IDPROM contents rather than names (default)
    #[arg(long, overrides_with_all = ["list", "no_list"])]
    pub no_list: bool,
}

/// One `idprom` invocation after flag parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdpromRequest {
    pub names: Vec<String>,
    pub raw: bool,
    pub all: bool,
    pub list: bool,
}

impl From<IdpromArgs> for IdpromRequest {
    fn from(args: IdpromArgs) -> Self {
        // Each flag overrides itself and its negation, so the last one given
        // wins and repeats are accepted.
        Self {
            names: args.name,
            raw: args.raw,
            all: args.all,
            list: args.list,
        }
    }
}

/// A flag dropped because of a conflicting option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdpromWarning {
    AllWithNames,
    AllWithList,
    ListWithNames,
    RawWithList,
}

impl fmt::Display for IdpromWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AllWithNames => "--all ignored when given a list of IDPROM names",
            Self::AllWithList => "--all ignored when combined with --list",
            Self::ListWithNames => "--list ignored when given a list of IDPROM names",
            Self::RawWithList => "--raw ignored when combined with --list",
        };
        f.write_str(msg)
    }
}

/// The platform tool command line and the warnings produced building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpromPlan {
    pub argv: Vec<String>,
    pub warnings: Vec<IdpromWarning>,
}

impl IdpromRequest {
    /// Resolve flag conflicts and build `[tool, "idprom", flags..., names...]`.
    ///
    /// Checks run in a fixed order (`--all`, `--list`, `--raw`) and each may
    /// add one warning. `--raw` yields to `--list` even when `--list` itself
    /// was dropped.
    pub fn plan(&self, platform_py: &Path) -> IdpromPlan {
        let mut argv = vec![
            platform_py.to_string_lossy().into_owned(),
            "idprom".to_string(),
        ];
        let mut warnings = Vec::new();
        let named = !self.names.is_empty();

        if self.all {
            if named {
                warnings.push(IdpromWarning::AllWithNames);
            } else if self.list {
                warnings.push(IdpromWarning::AllWithList);
            } else {
                argv.push("--all".to_string());
            }
        }
        if self.list {
            if named {
                warnings.push(IdpromWarning::ListWithNames);
            } else {
                argv.push("--list".to_string());
            }
        }
        if self.raw {
            if self.list {
                warnings.push(IdpromWarning::RawWithList);
            } else {
                argv.push("--raw".to_string());
            }
        }
        argv.extend(self.names.iter().cloned());

        IdpromPlan { argv, warnings }
    }
}

pub fn command() -> Command {
    let idprom = Command::new("idprom")
        .about("Show platform IDPROM information");
    IdpromArgs::augment_args(idprom)
}

/// Execute the idprom command.
pub fn cmd_idprom(matches: &ArgMatches, ctx: &mut Context<'_>) -> Result<()> {
    let request = IdpromRequest::from(IdpromArgs::from_arg_matches(matches)?);
    let plan = request.plan(&ctx.config.platform_py);

    for warning in &plan.warnings {
        tracing::debug!(%warning, "dropping idprom option");
        writeln!(ctx.out, "?Option {}\n", warning)?;
    }
    process::invoke(&plan.argv, ctx.out);
    Ok(())
}
