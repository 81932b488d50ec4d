//! External command execution.
//!
//! The resolver never shells out directly: tool discovery and invocation go
//! through [`CommandRunner`], so "tool absent", "tool failed", and "tool
//! succeeded" are explicit, injectable results in tests.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

/// Outcome of a failed tool invocation.
#[derive(Error, Debug)]
pub enum RunError {
    /// The executable could not be started at all.
    #[error("failed to start {tool}: {message}")]
    Spawn { tool: String, message: String },

    /// The tool ran and exited non-zero.
    #[error("{tool} exited with status {status}: {stderr}")]
    Failed {
        tool: String,
        status: i32,
        stderr: String,
    },
}

impl RunError {
    /// Whether this failure means the input was not actually encrypted (or
    /// sops reported a decode-shape error). This is the sole recoverable
    /// condition that triggers the plaintext fallback; the substring match is
    /// confined to this one place.
    pub fn is_not_encrypted(&self) -> bool {
        match self {
            RunError::Spawn { .. } => false,
            RunError::Failed { stderr, .. } => {
                stderr.contains("sops metadata not found")
                    || stderr.contains("Error unmarshalling input")
            }
        }
    }
}

/// Runs external tools and probes for their presence.
pub trait CommandRunner {
    /// Probe the executable search path for a tool, `which`-style.
    fn lookup(&self, tool: &str) -> Option<PathBuf>;

    /// Run a tool and capture its stdout as text.
    fn run(&self, tool: &str, args: &[&str]) -> Result<String, RunError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn lookup(&self, tool: &str) -> Option<PathBuf> {
        (**self).lookup(tool)
    }

    fn run(&self, tool: &str, args: &[&str]) -> Result<String, RunError> {
        (**self).run(tool, args)
    }
}

/// The real runner: `which` for discovery, `std::process` for invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn lookup(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }

    fn run(&self, tool: &str, args: &[&str]) -> Result<String, RunError> {
        let output = Command::new(tool)
            .args(args)
            .output()
            .map_err(|e| RunError::Spawn {
                tool: tool.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(RunError::Failed {
                tool: tool.to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(stderr: &str) -> RunError {
        RunError::Failed {
            tool: "sops".to_string(),
            status: 1,
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_not_encrypted_classifier() {
        assert!(failed("sops metadata not found").is_not_encrypted());
        assert!(failed("Error unmarshalling input yaml").is_not_encrypted());
        assert!(!failed("Error getting data key").is_not_encrypted());
        assert!(!failed("permission denied").is_not_encrypted());
    }

    #[test]
    fn test_spawn_is_never_recoverable() {
        let err = RunError::Spawn {
            tool: "sops".to_string(),
            message: "sops metadata not found".to_string(),
        };
        assert!(!err.is_not_encrypted());
    }

    #[test]
    fn test_lookup_missing_tool() {
        assert!(SystemRunner
            .lookup("definitely-not-a-real-tool-kp3x")
            .is_none());
    }

    #[test]
    fn test_run_missing_tool_is_spawn_error() {
        let err = SystemRunner
            .run("definitely-not-a-real-tool-kp3x", &[])
            .unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout() {
        let out = SystemRunner.run("sh", &["-c", "echo hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_captures_stderr() {
        let err = SystemRunner
            .run("sh", &["-c", "echo boom >&2; exit 3"])
            .unwrap_err();
        match err {
            RunError::Failed { status, stderr, .. } => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
