// Capture-output interface for external executables (docker, speedtest-cli, curl).

use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
    #[error("{program} produced no output")]
    EmptyOutput { program: String },
}

/// Runs a program to completion and returns its trimmed stdout.
///
/// Non-zero exit and empty output are errors, so callers can treat every
/// `Err` as "source unavailable".
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// Runs real processes. No timeout is applied beyond what the command itself enforces.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        if stdout.is_empty() {
            return Err(CommandError::EmptyOutput {
                program: program.to_string(),
            });
        }
        Ok(stdout)
    }
}
