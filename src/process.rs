//! Best-effort command execution for platform tools.
//!
//! Platform tools own the terminal while they run: stdio is inherited and the
//! caller blocks until the child exits. A failing tool is reported with a
//! warning line but is never an error for the caller.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// One subprocess call: the argument vector and how it ended.
#[derive(Debug)]
pub struct ProcessInvocation {
    /// Program followed by its arguments, exactly as executed.
    pub argv: Vec<String>,
    /// Exit status, or the error that prevented the program from starting.
    pub outcome: io::Result<ExitStatus>,
}

impl ProcessInvocation {
    /// Returns true if the program ran and exited with status zero.
    pub fn success(&self) -> bool {
        matches!(&self.outcome, Ok(status) if status.success())
    }

    /// Get the exit code, or -1 if terminated by signal or never started.
    pub fn code(&self) -> i32 {
        match &self.outcome {
            Ok(status) => status.code().unwrap_or(-1),
            Err(_) => -1,
        }
    }

    /// The argument vector as one display string.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Builder for a platform tool invocation.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
        }
    }

    /// Create a command builder for a program given by path.
    pub fn from_path(program: &Path) -> Self {
        Self::new(program.to_string_lossy())
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Program followed by arguments.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Run the command with inherited stdio and wait for it.
    ///
    /// Arguments are passed to the program as-is; no shell is involved.
    pub fn execute(self) -> ProcessInvocation {
        let argv = self.argv();
        tracing::debug!(command = %argv.join(" "), "running platform tool");

        let outcome = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        ProcessInvocation { argv, outcome }
    }

    /// Run the command and report a failure on `out`.
    ///
    /// Never fails: a non-zero exit, a signal, or a program that cannot be
    /// started all produce a single warning line naming the command.
    pub fn invoke(self, out: &mut dyn Write) {
        let invocation = self.execute();
        if invocation.success() {
            return;
        }

        let warning = Failure(&invocation);
        tracing::debug!(code = invocation.code(), "{}", warning);
        // Reporting is best effort.
        let _ = writeln!(out, "Warning: {}", warning);
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

struct Failure<'a>(&'a ProcessInvocation);

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inv = self.0;
        match &inv.outcome {
            Ok(status) => match status.code() {
                Some(code) => write!(
                    f,
                    "'{}' failed (exit code {})",
                    inv.command_line(),
                    code
                ),
                None => write!(f, "'{}' terminated by signal", inv.command_line()),
            },
            Err(e) => write!(f, "failed to execute '{}': {}", inv.command_line(), e),
        }
    }
}

/// Run `argv[0]` with the remaining arguments, reporting failure on `out`.
///
/// An empty vector runs nothing.
pub fn invoke<S: AsRef<str>>(argv: &[S], out: &mut dyn Write) {
    let Some((program, args)) = argv.split_first() else {
        return;
    };
    Cmd::new(program).args(args).invoke(out);
}

// =============================================================================
// Tests
// =============================================================================
