//! Configuration for the platform extensions.
//!
//! Paths default to the fixed locations on a Cisco 8000 image. Each can be
//! overridden from the environment (or a `.env` file loaded by the binary).
//! Environment variables take precedence over `.env`.

use std::collections::HashMap;
use std::path::PathBuf;

/// Interpreter used to run Python platform modules.
pub const DEFAULT_PYTHON: &str = "/usr/bin/python3";

/// Platform management tool that knows about IDPROMs.
pub const DEFAULT_PLATFORM_PY: &str = "/opt/cisco/bin/platform.py";

/// YAML file describing the installed SDK component versions.
pub const DEFAULT_BUILD_INFO: &str = "/opt/cisco/etc/build_info.yaml";

/// Extension configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interpreter for `-m cisco.bin.inventory` (default: /usr/bin/python3)
    pub python: PathBuf,
    /// Path to platform.py (default: /opt/cisco/bin/platform.py)
    pub platform_py: PathBuf,
    /// Path to build_info.yaml (default: /opt/cisco/etc/build_info.yaml)
    pub build_info: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
            platform_py: PathBuf::from(DEFAULT_PLATFORM_PY),
            build_info: PathBuf::from(DEFAULT_BUILD_INFO),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from an explicit variable map.
    ///
    /// Unset or empty variables fall back to the defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let path = |key: &str, default: &str| {
            vars.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            python: path("CISCO_SHOW_PYTHON", DEFAULT_PYTHON),
            platform_py: path("CISCO_SHOW_PLATFORM_PY", DEFAULT_PLATFORM_PY),
            build_info: path("CISCO_SHOW_BUILD_INFO", DEFAULT_BUILD_INFO),
        }
    }
}
