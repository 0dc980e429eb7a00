//! Shared test utilities for the extension tests.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use cisco8000_show::config::Config;
use cisco8000_show::host::Host;
use cisco8000_show::registry::Context;
use tempfile::TempDir;

/// Temporary stand-ins for the platform tools and build_info.yaml.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    pub base_dir: PathBuf,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config = Config {
            python: base_dir.join("python3"),
            platform_py: base_dir.join("platform.py"),
            build_info: base_dir.join("build_info.yaml"),
        };

        Self {
            _temp_dir: temp_dir,
            base_dir,
            config,
        }
    }

    pub fn write_build_info(&self, yaml: &str) {
        fs::write(&self.config.build_info, yaml)
            .expect("Failed to write build_info.yaml");
    }

    /// Install a fake tool that records its arguments, one per line, and
    /// exits with `code`.
    pub fn install_recording_tool(&self, path: &Path, code: i32) {
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nexit {}\n",
            self.args_file(path).display(),
            code
        );
        fs::write(path, script).expect("Failed to write fake tool");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
    }

    /// Arguments recorded by the fake tool at `path`, or None if it never ran.
    pub fn recorded_args(&self, path: &Path) -> Option<Vec<String>> {
        let content = fs::read_to_string(self.args_file(path)).ok()?;
        Some(content.lines().map(str::to_string).collect())
    }

    fn args_file(&self, path: &Path) -> PathBuf {
        let name = path.file_name().expect("tool path has a file name");
        let file = format!("{}.args", name.to_string_lossy());
        self.base_dir.join(file)
    }

    /// Run `show <args>` with the Cisco 8000 extension loaded.
    pub fn show(&self, args: &[&str]) -> (anyhow::Result<()>, String) {
        let extension = cisco8000_show::commands::extension();
        let host = Host::load(extension).expect("extension loads");
        let matches = host
            .try_parse(std::iter::once("show").chain(args.iter().copied()))
            .expect("command line parses");

        let mut out = Vec::new();
        let result = {
            let mut ctx = Context {
                config: &self.config,
                out: &mut out,
            };
            host.run(&matches, &mut ctx)
        };
        (result, String::from_utf8(out).expect("output is UTF-8"))
    }
}
