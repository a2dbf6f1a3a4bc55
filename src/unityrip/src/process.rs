//! External process invocation
//!
//! All external tools are run through [`ToolCommand`] — a typed descriptor
//! (program, argument list, timeout) executed without any shell involvement.
//! Results come back as a structured [`ToolOutput`]; a deadline overrun kills
//! the child and surfaces as [`ProcessError::TimedOut`].

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Polling interval while waiting for a child to exit.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Errors from invoking an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout_secs}s")]
    TimedOut { program: String, timeout_secs: u64 },

    #[error("i/o error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

/// Captured result of a completed invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// The child is killed if it outlives the configured timeout. Output is
    /// drained on separate threads so a chatty tool cannot deadlock against
    /// a full pipe while we poll for exit.
    pub fn run(&self) -> Result<ToolOutput, ProcessError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: self.program_name(),
                source,
            })?;

        let stdout_reader = child.stdout.take().map(spawn_drain);
        let stderr_reader = child.stderr.take().map(spawn_drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ProcessError::TimedOut {
                            program: self.program_name(),
                            timeout_secs: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(WAIT_POLL);
                }
                Err(source) => {
                    return Err(ProcessError::Io {
                        program: self.program_name(),
                        source,
                    })
                }
            }
        };

        Ok(ToolOutput {
            success: status.success(),
            exit_code: status.code(),
            stdout: join_drain(stdout_reader),
            stderr: join_drain(stderr_reader),
        })
    }

    /// Capability probe: true when the command runs and exits successfully
    /// within its timeout. Spawn failures and timeouts both mean "tool not
    /// available" — never an error.
    pub fn probe(&self) -> bool {
        matches!(self.run(), Ok(output) if output.success)
    }
}

fn spawn_drain<R: Read + Send + 'static>(mut reader: R) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drain(handle: Option<std::thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_binary_is_false() {
        let cmd = ToolCommand::new("/nonexistent/unityrip-no-such-tool", Duration::from_secs(1));
        assert!(!cmd.probe());
    }

    #[test]
    fn test_run_missing_binary_is_spawn_error() {
        let cmd = ToolCommand::new("/nonexistent/unityrip-no-such-tool", Duration::from_secs(1));
        match cmd.run() {
            Err(ProcessError::Spawn { .. }) => {}
            other => panic!("expected spawn error, got {:?}", other.map(|o| o.success)),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captures_output() {
        let output = ToolCommand::new("echo", Duration::from_secs(5))
            .arg("hello")
            .run()
            .unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_kills_on_timeout() {
        let result = ToolCommand::new("sleep", Duration::from_millis(200))
            .arg("10")
            .run();

        match result {
            Err(ProcessError::TimedOut { .. }) => {}
            other => panic!("expected timeout, got {:?}", other.is_ok()),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_probe_nonzero_exit_is_false() {
        let cmd = ToolCommand::new("false", Duration::from_secs(5));
        assert!(!cmd.probe());
    }
}
