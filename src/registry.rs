//! Attaching extension commands to the host's command groups.
//!
//! An [`ExtensionDescriptor`] lists, per group key, the commands an extension
//! contributes. [`GroupRoots`] says where each group key lives in the host's
//! command tree. [`install`] walks the descriptor and attaches every command
//! whose group resolves; keys that do not resolve are skipped without error.

use std::collections::HashMap;
use std::io::Write;

use clap::{ArgMatches, Command};

use crate::config::Config;
use crate::error::{Result, ShowError};

/// State handed to a command handler.
pub struct Context<'a> {
    pub config: &'a Config,
    /// Command output. Diagnostics go through `tracing` instead.
    pub out: &'a mut dyn Write,
}

/// Runs an extension command with its parsed arguments.
pub type Handler = fn(&ArgMatches, &mut Context<'_>) -> anyhow::Result<()>;

/// A command contributed by an extension.
#[derive(Clone, Copy)]
pub struct ExtensionCommand {
    /// Subcommand name; must match the name of the built command.
    pub name: &'static str,
    /// Builds the clap command, including its arguments.
    pub build: fn() -> Command,
    /// Handler, or `None` for a pure group that only holds subcommands.
    pub run: Option<Handler>,
}

impl ExtensionCommand {
    pub const fn new(name: &'static str, build: fn() -> Command, run: Handler) -> Self {
        Self {
            name,
            build,
            run: Some(run),
        }
    }

    pub const fn group(name: &'static str, build: fn() -> Command) -> Self {
        Self {
            name,
            build,
            run: None,
        }
    }
}

/// Identifies a command group that extensions can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// The host's top-level command.
    Cli,
    /// `platform` commands.
    Platform,
    /// `npu` commands.
    Npu,
}

/// Commands to attach, grouped by key, in attachment order.
#[derive(Default, Clone)]
pub struct ExtensionDescriptor {
    entries: Vec<(GroupKey, Vec<ExtensionCommand>)>,
}

impl ExtensionDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add commands under `key`, after anything already listed for it.
    pub fn with(
        mut self,
        key: GroupKey,
        commands: impl IntoIterator<Item = ExtensionCommand>,
    ) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.extend(commands),
            None => self.entries.push((key, commands.into_iter().collect())),
        }
        self
    }

    pub fn get(&self, key: GroupKey) -> &[ExtensionCommand] {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, cmds)| cmds.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[ExtensionCommand])> {
        self.entries.iter().map(|(k, cmds)| (*k, cmds.as_slice()))
    }
}

#[derive(Debug, Clone)]
struct GroupRoot {
    /// Subcommand names leading from the host's top-level command to the group.
    path: Vec<String>,
    /// Imported roots must be provided by the host.
    imported: bool,
}

/// Where each group key lives in the host's command tree.
#[derive(Debug, Clone)]
pub struct GroupRoots {
    roots: HashMap<GroupKey, GroupRoot>,
}

impl Default for GroupRoots {
    fn default() -> Self {
        let mut roots = HashMap::new();
        roots.insert(
            GroupKey::Cli,
            GroupRoot {
                path: Vec::new(),
                imported: false,
            },
        );
        Self { roots }
    }
}

impl GroupRoots {
    /// Registry containing only the host's top-level command.
    pub fn new() -> Self {
        Self::default()
    }

    /// A group the host must already provide.
    pub fn import(mut self, key: GroupKey, path: &[&str]) -> Self {
        self.insert(key, path, true);
        self
    }

    /// A group that may be created by extensions attached earlier.
    pub fn nested(mut self, key: GroupKey, path: &[&str]) -> Self {
        self.insert(key, path, false);
        self
    }

    fn insert(&mut self, key: GroupKey, path: &[&str], imported: bool) {
        let path = path.iter().map(|s| s.to_string()).collect();
        self.roots.insert(key, GroupRoot { path, imported });
    }

    pub fn path(&self, key: GroupKey) -> Option<&[String]> {
        self.roots.get(&key).map(|root| root.path.as_slice())
    }

    /// Check that every imported group exists under `cli`.
    pub fn verify(&self, cli: &Command) -> Result<()> {
        for root in self.roots.values().filter(|r| r.imported) {
            if !resolves(cli, &root.path) {
                return Err(ShowError::MissingModule {
                    name: root.path.join(" "),
                });
            }
        }
        Ok(())
    }
}

/// Attach the descriptor's commands to the host command tree.
///
/// Fails only if an imported group is missing from the host. A descriptor key
/// with no root, or whose root is absent from the tree, attaches nothing.
/// Calling this twice attaches everything twice.
pub fn install(
    cli: &mut Command,
    descriptor: &ExtensionDescriptor,
    roots: &GroupRoots,
) -> Result<()> {
    roots.verify(cli)?;

    for (key, commands) in descriptor.iter() {
        let Some(path) = roots.path(key) else {
            tracing::debug!(?key, "no group root registered, skipping");
            continue;
        };
        if !resolves(cli, path) {
            tracing::debug!(
                ?key,
                path = %path.join(" "),
                "group root not in command tree, skipping"
            );
            continue;
        }

        let host = std::mem::take(cli);
        *cli = attach(host, path, commands);
        tracing::debug!(?key, count = commands.len(), "attached extension commands");
    }
    Ok(())
}

fn resolves(cmd: &Command, path: &[String]) -> bool {
    let mut current = cmd;
    for name in path {
        match current.find_subcommand(name) {
            Some(sub) => current = sub,
            None => return false,
        }
    }
    true
}

fn attach(cmd: Command, path: &[String], commands: &[ExtensionCommand]) -> Command {
    match path.split_first() {
        None => commands
            .iter()
            .fold(cmd, |cmd, ext| cmd.subcommand((ext.build)())),
        Some((head, rest)) => cmd.mut_subcommand(head, |group| attach(group, rest, commands)),
    }
}

/// Run the extension handler matching the parsed command line.
///
/// Returns `None` when the matched command does not belong to an extension,
/// leaving it to the host.
pub fn dispatch(
    descriptor: &ExtensionDescriptor,
    roots: &GroupRoots,
    matches: &ArgMatches,
    ctx: &mut Context<'_>,
) -> Option<anyhow::Result<()>> {
    let (path, leaf) = matched_path(matches);
    let (name, group) = path.split_last()?;

    for (key, commands) in descriptor.iter() {
        let Some(root) = roots.path(key) else {
            continue;
        };
        if !root.iter().map(String::as_str).eq(group.iter().copied()) {
            continue;
        }
        if let Some(ext) = commands.iter().find(|c| c.name == *name) {
            return ext.run.map(|run| run(leaf, ctx));
        }
    }
    None
}

/// Subcommand names from the top-level command down to the innermost match.
fn matched_path(matches: &ArgMatches) -> (Vec<&str>, &ArgMatches) {
    let mut path = Vec::new();
    let mut leaf = matches;
    while let Some((name, sub)) = leaf.subcommand() {
        path.push(name);
        leaf = sub;
    }
    (path, leaf)
}

/// Platform hook called by the host's `show version` flow with its verbose flag.
pub type VersionHook = fn(bool, &mut Context<'_>) -> anyhow::Result<()>;

/// Everything a platform contributes to the host.
pub struct Extension {
    pub descriptor: ExtensionDescriptor,
    pub roots: GroupRoots,
    pub version: Option<VersionHook>,
}

impl Extension {
    /// Attach this extension's commands to the host. Call once.
    pub fn register(&self, cli: &mut Command) -> Result<()> {
        install(cli, &self.descriptor, &self.roots)
    }

    pub fn dispatch(
        &self,
        matches: &ArgMatches,
        ctx: &mut Context<'_>,
    ) -> Option<anyhow::Result<()>> {
        dispatch(&self.descriptor, &self.roots, matches, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> Command {
        Command::new("show")
            .subcommand(Command::new("platform").subcommand(Command::new("summary")))
            .subcommand(Command::new("version"))
    }

    fn hello(_: &ArgMatches, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        writeln!(ctx.out, "hello")?;
        Ok(())
    }

    fn hello_ext() -> ExtensionCommand {
        ExtensionCommand::new("hello", || Command::new("hello"), hello)
    }

    fn npu_group() -> ExtensionCommand {
        ExtensionCommand::group("npu", || Command::new("npu"))
    }

    fn platform_roots() -> GroupRoots {
        GroupRoots::new().import(GroupKey::Platform, &["platform"])
    }

    fn subcommand_names(cmd: &Command) -> Vec<&str> {
        cmd.get_subcommands().map(|c| c.get_name()).collect()
    }

    #[test]
    fn test_attaches_under_resolved_group() {
        let mut cli = host();
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Platform, [hello_ext()]);

        install(&mut cli, &descriptor, &platform_roots()).unwrap();

        let platform = cli.find_subcommand("platform").unwrap();
        assert_eq!(subcommand_names(platform), vec!["summary", "hello"]);
        let mut top = subcommand_names(&cli);
        top.sort_unstable();
        assert_eq!(top, vec!["platform", "version"]);
    }

    #[test]
    fn test_unregistered_key_is_skipped() {
        let mut cli = host();
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Npu, [hello_ext()]);

        install(&mut cli, &descriptor, &GroupRoots::new()).unwrap();

        assert_eq!(subcommand_names(&cli), vec!["platform", "version"]);
        let platform = cli.find_subcommand("platform").unwrap();
        assert!(platform.find_subcommand("hello").is_none());
    }

    #[test]
    fn test_nested_root_missing_from_tree_is_skipped() {
        let mut cli = host();
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Npu, [hello_ext()]);
        let roots = GroupRoots::new().nested(GroupKey::Npu, &["npu"]);

        install(&mut cli, &descriptor, &roots).unwrap();

        assert!(cli.find_subcommand("npu").is_none());
        assert!(cli.find_subcommand("hello").is_none());
    }

    #[test]
    fn test_missing_import_fails_with_name() {
        let mut cli = Command::new("show");
        let descriptor = ExtensionDescriptor::new();

        let roots = platform_roots();

        let err = install(&mut cli, &descriptor, &roots).unwrap_err();
        assert!(matches!(err, ShowError::MissingModule { .. }));
        assert_eq!(err.to_string(), "platform - required module not found");
    }

    #[test]
    fn test_descriptor_order_allows_nested_groups() {
        let mut cli = host();
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Cli, [npu_group()])
            .with(GroupKey::Npu, [hello_ext()]);
        let roots = GroupRoots::new().nested(GroupKey::Npu, &["npu"]);

        install(&mut cli, &descriptor, &roots).unwrap();

        let npu = cli.find_subcommand("npu").unwrap();
        assert_eq!(subcommand_names(npu), vec!["hello"]);
    }

    #[test]
    fn test_with_extends_existing_key() {
        let a = ExtensionCommand::new("a", || Command::new("a"), hello);
        let b = ExtensionCommand::new("b", || Command::new("b"), hello);
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Platform, [a])
            .with(GroupKey::Platform, [b]);

        let names: Vec<_> = descriptor
            .get(GroupKey::Platform)
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(descriptor.get(GroupKey::Npu).is_empty());
    }

    #[test]
    fn test_dispatch_routes_to_handler() {
        let mut cli = host();
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Platform, [hello_ext()]);
        let roots = platform_roots();
        install(&mut cli, &descriptor, &roots).unwrap();

        let argv = ["show", "platform", "hello"];
        let matches = cli.try_get_matches_from(argv).unwrap();
        let config = Config::default();
        let mut out = Vec::new();
        let mut ctx = Context {
            config: &config,
            out: &mut out,
        };

        let result = dispatch(&descriptor, &roots, &matches, &mut ctx);
        assert!(matches!(result, Some(Ok(()))));
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    }

    #[test]
    fn test_dispatch_leaves_host_commands_alone() {
        let descriptor = ExtensionDescriptor::new()
            .with(GroupKey::Platform, [hello_ext()]);
        let roots = platform_roots();

        let argv = ["show", "platform", "summary"];
        let matches = host().try_get_matches_from(argv).unwrap();
        let config = Config::default();
        let mut out = Vec::new();
        let mut ctx = Context {
            config: &config,
            out: &mut out,
        };

        assert!(dispatch(&descriptor, &roots, &matches, &mut ctx).is_none());
        assert!(out.is_empty());
    }
}
