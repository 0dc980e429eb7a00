//! Platform hook for `show version`.
//!
//! The host prints its own version information and then calls [`version`] to
//! list the SDK components recorded in build_info.yaml.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};

use crate::error::ShowError;
use crate::registry::Context;

/// Contents of build_info.yaml that `show version` uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildInfo {
    /// One single-entry mapping per component, component -> version.
    #[serde(default)]
    pub sdk_versions: Option<Vec<Mapping>>,
}

impl BuildInfo {
    /// Read and parse a build info file. Never cached.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let bytes = fs::read(path).map_err(|source| ShowError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes, path)
    }

    /// Parse build info bytes; `path` is only used in errors. Text that is
    /// not UTF-8 is a parse error.
    pub fn parse(bytes: &[u8], path: &Path) -> crate::error::Result<Self> {
        let parse_err = |source| ShowError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let doc: Value = serde_yaml_ng::from_slice(bytes).map_err(parse_err)?;
        if doc.is_null() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_value(doc).map_err(parse_err)
    }

    /// `(component, version)` pairs in file order.
    pub fn components(&self) -> Vec<(String, String)> {
        self.sdk_versions
            .iter()
            .flatten()
            .flat_map(|entry| entry.iter())
            .map(|(k, v)| (scalar(k), scalar(v)))
            .collect()
    }
}

/// Render a YAML scalar the way build tooling reports it: booleans and null
/// are spelled `True`, `False` and `None`.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Write one `<component>: <version>` line per SDK component.
///
/// `verbose` is accepted for the host's version flow but does not change the
/// output. A missing or unparsable file is an error for the caller.
pub fn version(_verbose: bool, ctx: &mut Context<'_>) -> Result<()> {
    let info = BuildInfo::load(&ctx.config.build_info)?;
    for (component, version) in info.components() {
        writeln!(ctx.out, "{}: {}", component, version)?;
    }
    Ok(())
}
