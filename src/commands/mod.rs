//! Cisco 8000 command handlers.
//!
//! Each submodule handles one extension command:
//! - `npu` - `show npu status`
//! - `inventory` - `show platform inventory`
//! - `idprom` - `show platform idprom`
//! - `version` - platform part of `show version`
//!
//! [`extension`] ties them to the host's command groups.

pub mod idprom;
pub mod inventory;
pub mod npu;
pub mod version;

use clap::Command;

use crate::error::Result;
use crate::registry::{Extension, ExtensionCommand, ExtensionDescriptor, GroupKey, GroupRoots};

pub use idprom::cmd_idprom;
pub use inventory::cmd_inventory;
pub use npu::cmd_status;

/// Commands contributed to each group, in attachment order.
///
/// `npu` is attached under the top-level command before its own children.
pub fn descriptor() -> ExtensionDescriptor {
    let npu_group = ExtensionCommand::group("npu", npu::group);
    let npu_status = ExtensionCommand::new("status", npu::status_command, cmd_status);
    let platform_inventory = ExtensionCommand::new("inventory", inventory::command, cmd_inventory);
    let platform_idprom = ExtensionCommand::new("idprom", idprom::command, cmd_idprom);

    ExtensionDescriptor::new()
        .with(GroupKey::Cli, [npu_group])
        .with(GroupKey::Npu, [npu_status])
        .with(GroupKey::Platform, [platform_inventory, platform_idprom])
}

/// Where the groups live: `platform` comes from the host, `npu` from us.
pub fn group_roots() -> GroupRoots {
    GroupRoots::new()
        .import(GroupKey::Platform, &["platform"])
        .nested(GroupKey::Npu, &["npu"])
}

/// The Cisco 8000 extension.
pub fn extension() -> Extension {
    Extension {
        descriptor: descriptor(),
        roots: group_roots(),
        version: Some(version::version),
    }
}

/// Load the Cisco 8000 commands into the host's top-level command.
pub fn register(cli: &mut Command) -> Result<()> {
    extension().register(cli)
}
