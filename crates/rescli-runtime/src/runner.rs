//! Subprocess invocation of the container runtime CLI.

use std::process::{Command, Stdio};

use rescli_common::error::{ResCliError, Result};

/// Output of a runtime invocation whose streams were captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Standard output followed by standard error.
    pub output: String,
    /// Exit status (-1 when the child was killed by a signal).
    pub exit_code: i32,
}

impl CapturedOutput {
    /// Returns whether the child exited with status 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launches the container runtime with a given argument vector.
///
/// Implementors decide how the child is spawned; callers only see the
/// captured output or the exit status.
pub trait ProcessRunner {
    /// Name of the program being invoked, used in diagnostics.
    fn program(&self) -> &str;

    /// Runs the runtime to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Spawn` if the child cannot be started.
    fn run_capturing(&self, args: &[String]) -> Result<CapturedOutput>;

    /// Runs the runtime attached to the invoking terminal.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Spawn` if the child cannot be started.
    fn run_interactive(&self, args: &[String]) -> Result<i32>;

    /// Runs the runtime and treats a non-zero exit as an error.
    ///
    /// Returns the captured output on success.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Runtime` carrying the captured output when the
    /// child exits non-zero, or `ResCliError::Spawn` if it cannot start.
    fn run_checked(&self, args: &[String]) -> Result<String> {
        let captured = self.run_capturing(args)?;
        if captured.success() {
            return Ok(captured.output);
        }
        Err(ResCliError::Runtime {
            command: command_line(self.program(), args),
            exit_code: captured.exit_code,
            output: captured.output.trim_end().to_string(),
        })
    }
}

/// Runs the container runtime as a child process.
#[derive(Debug, Clone)]
pub struct RuntimeCli {
    program: String,
}

impl RuntimeCli {
    /// Creates a runner for the given runtime binary (`docker`, `podman`, ...).
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns whether the runtime binary can be found on `PATH`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn spawn_error(&self, source: std::io::Error) -> ResCliError {
        ResCliError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl ProcessRunner for RuntimeCli {
    fn program(&self) -> &str {
        &self.program
    }

    fn run_capturing(&self, args: &[String]) -> Result<CapturedOutput> {
        tracing::info!(program = %self.program, ?args, "running runtime command");
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!(exit_code, "runtime command finished");

        Ok(CapturedOutput {
            output: combined,
            exit_code,
        })
    }

    fn run_interactive(&self, args: &[String]) -> Result<i32> {
        tracing::info!(program = %self.program, ?args, "attaching terminal to runtime command");
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.spawn_error(e))?;
        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(exit_code, "interactive command finished");
        Ok(exit_code)
    }
}

/// Renders a command line for diagnostics.
#[must_use]
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
